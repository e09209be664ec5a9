//! Codec generators for the structs of this crate.
//!
//! `wire_struct!` declares a struct's field layout and implements the codec traits for
//! it; `struct_codec!` does the latter for a struct whose schema lives elsewhere (the
//! args of a method, whose layout is part of the method schema).
//!
//! Fields are listed as `id => rust_name("wireName"): optional|required Type`. Optional
//! fields must be `Option<T>`; required fields are plain `T`.

macro_rules! wire_struct {
    (
        $ty:ident as $name:literal {
            $($id:literal => $field:ident ($wname:literal): $req:ident $wire:ident),* $(,)?
        }
    ) => {
        impl $ty {
            /// Field layout of this struct.
            pub fn wire_schema() -> &'static ::wirerpc::StructSchema {
                static SCHEMA: ::wirerpc::StructSchema = ::wirerpc::StructSchema::new(
                    $name,
                    &[$(::wirerpc::FieldSpec::$req($id, $wname, ::wirepack::Type::$wire)),*],
                );
                &SCHEMA
            }
        }

        struct_codec!($ty, $ty::wire_schema(), { $($id => $field: $req),* });
    };
}

macro_rules! struct_codec {
    ($ty:ident, $schema:expr, { $($id:literal => $field:ident: $req:ident),* $(,)? }) => {
        impl ::wirerpc::WireType for $ty {
            const TYPE: ::wirepack::Type = ::wirepack::Type::Struct;
        }

        impl ::wirerpc::ToWire for $ty {
            fn to_wire(&self) -> ::wirerpc::Result<::wirepack::Value> {
                let mut w = ::wirerpc::StructWriter::new($schema);
                $(struct_codec!(@write w, $req, $id, self.$field);)*
                w.finish()
            }
        }

        impl ::wirerpc::FromWire for $ty {
            fn from_wire(value: &::wirepack::Value) -> ::wirerpc::Result<Self> {
                let mut r = ::wirerpc::StructReader::new($schema, value)?;
                $(let mut $field = None;)*
                for (id, v) in r.by_ref() {
                    match id {
                        $($id => ::wirerpc::codec::read_into(&mut $field, v)?,)*
                        _ => {}
                    }
                }
                r.finish()?;
                Ok(Self {
                    $($field: struct_codec!(@take $req, $field, $schema, $id),)*
                })
            }
        }
    };
    (@write $w:ident, optional, $id:literal, $value:expr) => {
        $w.optional($id, $value.as_ref())?
    };
    (@write $w:ident, required, $id:literal, $value:expr) => {
        $w.field($id, &$value)?
    };
    (@take optional, $field:ident, $schema:expr, $id:literal) => {
        $field
    };
    (@take required, $field:ident, $schema:expr, $id:literal) => {
        ::wirerpc::codec::required($field, $schema, $id)?
    };
}

macro_rules! wire_enum {
    ($ty:ident { $($variant:ident = $value:literal),* $(,)? }) => {
        impl ::wirerpc::WireType for $ty {
            const TYPE: ::wirepack::Type = ::wirepack::Type::I32;
        }

        impl ::wirerpc::ToWire for $ty {
            fn to_wire(&self) -> ::wirerpc::Result<::wirepack::Value> {
                Ok(::wirepack::Value::I32(*self as i32))
            }
        }

        impl ::wirerpc::FromWire for $ty {
            fn from_wire(value: &::wirepack::Value) -> ::wirerpc::Result<Self> {
                match value.as_i32()? {
                    $($value => Ok($ty::$variant),)*
                    other => Err(::wirerpc::Error::UnknownVariant { name: stringify!($ty), value: other }),
                }
            }
        }
    };
}
