//! # Codec
//!
//! The translation layer between typed Rust structures and the `wirepack` value tree.
//!
//! Primitive types, strings, blobs, lists and maps implement [`ToWire`] and
//! [`FromWire`] here. Structs implement them with [`StructWriter`] and
//! [`StructReader`], which check every field against a [`StructSchema`].
//!
//! ## Invariants
//! - **Schema Order**: A writer appends fields in the order it is called, which for
//!   generated structs is declaration order. Absent optional fields are omitted.
//! - **Lenient Reads**: Unknown field IDs, fields whose wire type differs from the
//!   declaration, and containers whose element types differ are skipped, so older
//!   readers accept newer writers.
//! - **No Partial Success**: A reader reports a missing required field instead of
//!   handing back a half-built struct.

use std::collections::BTreeMap;

use tracing::trace;
use wirepack::Field;
use wirepack::List;
use wirepack::Map;
use wirepack::Struct;
use wirepack::Type;
use wirepack::Value;

use crate::error::Error;
use crate::error::Result;
use crate::schema::StructSchema;

/// A Rust type with a fixed wire type.
pub trait WireType {
    const TYPE: Type;
}

/// Converts a typed value into its wire representation.
pub trait ToWire: WireType {
    fn to_wire(&self) -> Result<Value>;
}

/// Builds a typed value from its wire representation.
pub trait FromWire: WireType + Sized {
    fn from_wire(value: &Value) -> Result<Self>;
}

macro_rules! scalar_wire {
    ($($ty:ty => $var:ident, $get:ident);* $(;)?) => {
        $(
            impl WireType for $ty {
                const TYPE: Type = Type::$var;
            }

            impl ToWire for $ty {
                fn to_wire(&self) -> Result<Value> {
                    Ok(Value::$var(*self))
                }
            }

            impl FromWire for $ty {
                fn from_wire(value: &Value) -> Result<Self> {
                    Ok(value.$get()?)
                }
            }
        )*
    };
}

scalar_wire! {
    bool => Bool, as_bool;
    i8 => I8, as_i8;
    i16 => I16, as_i16;
    i32 => I32, as_i32;
    i64 => I64, as_i64;
    f64 => Double, as_double;
}

impl WireType for String {
    const TYPE: Type = Type::Binary;
}

impl ToWire for String {
    fn to_wire(&self) -> Result<Value> {
        Ok(Value::Binary(self.as_bytes().to_vec()))
    }
}

impl FromWire for String {
    fn from_wire(value: &Value) -> Result<Self> {
        Ok(value.as_str()?.to_string())
    }
}

/// An opaque blob (`binary` in the IDL).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Binary(pub Vec<u8>);

impl Binary {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Binary {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl WireType for Binary {
    const TYPE: Type = Type::Binary;
}

impl ToWire for Binary {
    fn to_wire(&self) -> Result<Value> {
        Ok(Value::Binary(self.0.clone()))
    }
}

impl FromWire for Binary {
    fn from_wire(value: &Value) -> Result<Self> {
        Ok(Self(value.as_binary()?.to_vec()))
    }
}

/// The payload of a void method: an empty struct that never reaches the wire.
impl WireType for () {
    const TYPE: Type = Type::Struct;
}

impl ToWire for () {
    fn to_wire(&self) -> Result<Value> {
        Ok(Value::Struct(Struct::empty()))
    }
}

impl FromWire for () {
    fn from_wire(value: &Value) -> Result<Self> {
        value.as_struct()?;
        Ok(())
    }
}

impl<T: WireType> WireType for Vec<T> {
    const TYPE: Type = Type::List;
}

impl<T: ToWire> ToWire for Vec<T> {
    fn to_wire(&self) -> Result<Value> {
        let items = self.iter().map(ToWire::to_wire).collect::<Result<Vec<_>>>()?;
        Ok(Value::List(List::new(T::TYPE, items)?))
    }
}

impl<T: FromWire> FromWire for Vec<T> {
    fn from_wire(value: &Value) -> Result<Self> {
        let list = value.as_list()?;
        if list.elem_type() != T::TYPE {
            return Err(wirepack::Error::ElementType { expected: T::TYPE, found: list.elem_type() }.into());
        }
        list.items().iter().map(T::from_wire).collect()
    }
}

impl<K: WireType, V: WireType> WireType for BTreeMap<K, V> {
    const TYPE: Type = Type::Map;
}

impl<K: ToWire, V: ToWire> ToWire for BTreeMap<K, V> {
    fn to_wire(&self) -> Result<Value> {
        let pairs = self
            .iter()
            .map(|(k, v)| Ok((k.to_wire()?, v.to_wire()?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Map(Map::new(K::TYPE, V::TYPE, pairs)?))
    }
}

impl<K: FromWire + Ord, V: FromWire> FromWire for BTreeMap<K, V> {
    fn from_wire(value: &Value) -> Result<Self> {
        let map = value.as_map()?;
        if map.key_type() != K::TYPE {
            return Err(wirepack::Error::ElementType { expected: K::TYPE, found: map.key_type() }.into());
        }
        if map.value_type() != V::TYPE {
            return Err(wirepack::Error::ElementType { expected: V::TYPE, found: map.value_type() }.into());
        }
        map.pairs()
            .iter()
            .map(|(k, v)| Ok((K::from_wire(k)?, V::from_wire(v)?)))
            .collect()
    }
}

// ============================================================================
//  STRUCTS
// ============================================================================

/// Builds a struct value field by field.
pub struct StructWriter {
    schema: &'static StructSchema,
    fields: Vec<Field>,
}

impl StructWriter {
    pub fn new(schema: &'static StructSchema) -> Self {
        Self { schema, fields: Vec::with_capacity(schema.fields.len()) }
    }

    /// Appends a present field.
    ///
    /// # Errors
    /// Returns `Error::UnknownField` if the schema has no field `id`, and
    /// `Error::FieldType` if the value's wire type differs from the declared one.
    pub fn field<T: ToWire + ?Sized>(&mut self, id: u16, value: &T) -> Result<()> {
        let spec = self
            .schema
            .field(id)
            .ok_or(Error::UnknownField { strukt: self.schema.name, id })?;
        let value = value.to_wire()?;
        if value.ty() != spec.ty {
            return Err(Error::FieldType {
                strukt: self.schema.name,
                field: spec.name,
                expected: spec.ty,
                found: value.ty(),
            });
        }
        self.fields.push(Field::new(id, value));
        Ok(())
    }

    /// Appends the field if it is present.
    pub fn optional<T: ToWire>(&mut self, id: u16, value: Option<&T>) -> Result<()> {
        match value {
            Some(v) => self.field(id, v),
            None => Ok(()),
        }
    }

    pub fn finish(self) -> Result<Value> {
        Ok(Value::Struct(Struct::new(self.fields)?))
    }
}

/// Walks the fields of a struct value that the schema understands.
///
/// Yields `(id, value)` for every field that is declared with the wire type it carries.
/// Call [`StructReader::finish`] once done to check required fields.
pub struct StructReader<'v> {
    schema: &'static StructSchema,
    fields: std::slice::Iter<'v, Field>,
    seen: Vec<u16>,
}

impl<'v> StructReader<'v> {
    /// # Errors
    /// Returns a decode-shape error if `value` is not a struct.
    pub fn new(schema: &'static StructSchema, value: &'v Value) -> Result<Self> {
        let strukt = value.as_struct()?;
        Ok(Self { schema, fields: strukt.fields().iter(), seen: Vec::new() })
    }

    /// Fails with `Error::MissingField` for the first required field never yielded.
    pub fn finish(self) -> Result<()> {
        match self.schema.fields.iter().find(|f| f.required && !self.seen.contains(&f.id)) {
            Some(f) => Err(Error::MissingField { strukt: self.schema.name, field: f.name }),
            None => Ok(()),
        }
    }
}

impl<'v> Iterator for StructReader<'v> {
    type Item = (u16, &'v Value);

    fn next(&mut self) -> Option<Self::Item> {
        for field in self.fields.by_ref() {
            match self.schema.field(field.id) {
                Some(spec) if spec.ty == field.value.ty() => {
                    self.seen.push(field.id);
                    return Some((field.id, &field.value));
                }
                Some(spec) => trace!(
                    strukt = self.schema.name,
                    field = spec.name,
                    found = %field.value.ty(),
                    "skipping field of unexpected type"
                ),
                None => trace!(strukt = self.schema.name, id = field.id, "skipping unknown field"),
            }
        }
        None
    }
}

/// Reads a field into `slot`.
///
/// A list or map whose element types differ from the declaration leaves the slot
/// empty, like any other mistyped field.
pub fn read_into<T: FromWire>(slot: &mut Option<T>, value: &Value) -> Result<()> {
    match T::from_wire(value) {
        Ok(v) => *slot = Some(v),
        Err(Error::Wire(wirepack::Error::ElementType { expected, found })) => {
            trace!(%expected, %found, "skipping container of unexpected element type");
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Unwraps a required field after [`StructReader::finish`] has vouched for it.
pub fn required<T>(slot: Option<T>, schema: &StructSchema, id: u16) -> Result<T> {
    slot.ok_or_else(|| Error::MissingField {
        strukt: schema.name,
        field: schema.field(id).map_or("?", |f| f.name),
    })
}
