//! # Value Model
//!
//! A closed, recursive representation of anything a field-tagged struct can hold.
//!
//! ## Invariants
//! - **Immutable**: Containers validate on construction and expose read-only views.
//! - **Unique IDs**: A `Struct` never carries the same field ID twice.
//! - **Homogeneous Containers**: Every `List` item (and every `Map` key/value) has the
//!   container's declared type, so an empty container still knows what it holds.

use std::collections::BTreeSet;

use crate::Error;
use crate::Result;

/// Identifies the type of an encoded value.
///
/// The discriminants are the type codes written on the wire.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Bool = 2,
    I8 = 3,
    Double = 4,
    I16 = 6,
    I32 = 8,
    I64 = 10,
    Binary = 11,
    Struct = 12,
    Map = 13,
    List = 15,
}

impl Type {
    /// Returns the Type for a given wire byte, or `None` if invalid.
    pub const fn from_u8(b: u8) -> Option<Self> {
        match b {
            2 => Some(Type::Bool),
            3 => Some(Type::I8),
            4 => Some(Type::Double),
            6 => Some(Type::I16),
            8 => Some(Type::I32),
            10 => Some(Type::I64),
            11 => Some(Type::Binary),
            12 => Some(Type::Struct),
            13 => Some(Type::Map),
            15 => Some(Type::List),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Type::Bool => "bool",
            Type::I8 => "i8",
            Type::Double => "double",
            Type::I16 => "i16",
            Type::I32 => "i32",
            Type::I64 => "i64",
            Type::Binary => "binary",
            Type::Struct => "struct",
            Type::Map => "map",
            Type::List => "list",
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A protocol-neutral value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Double(f64),
    Binary(Vec<u8>),
    Struct(Struct),
    List(List),
    Map(Map),
}

/// Generates checked `as_*` accessors for the copyable scalar variants.
macro_rules! scalar_accessors {
    ($($name:ident => $var:ident: $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Returns the `", stringify!($ty), "` payload, or an error naming the actual type.")]
            pub fn $name(&self) -> Result<$ty> {
                match self {
                    Value::$var(v) => Ok(*v),
                    _ => Err(self.unexpected(Type::$var)),
                }
            }
        )*
    };
}

impl Value {
    /// The wire type of this value.
    pub fn ty(&self) -> Type {
        match self {
            Value::Bool(_) => Type::Bool,
            Value::I8(_) => Type::I8,
            Value::I16(_) => Type::I16,
            Value::I32(_) => Type::I32,
            Value::I64(_) => Type::I64,
            Value::Double(_) => Type::Double,
            Value::Binary(_) => Type::Binary,
            Value::Struct(_) => Type::Struct,
            Value::List(_) => Type::List,
            Value::Map(_) => Type::Map,
        }
    }

    fn unexpected(&self, expected: Type) -> Error {
        Error::UnexpectedType { expected, found: self.ty() }
    }

    scalar_accessors! {
        as_bool => Bool: bool,
        as_i8 => I8: i8,
        as_i16 => I16: i16,
        as_i32 => I32: i32,
        as_i64 => I64: i64,
        as_double => Double: f64,
    }

    pub fn as_binary(&self) -> Result<&[u8]> {
        match self {
            Value::Binary(b) => Ok(b),
            _ => Err(self.unexpected(Type::Binary)),
        }
    }

    /// Returns a Binary payload as UTF-8 text.
    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(self.as_binary()?).map_err(|_| Error::InvalidUtf8)
    }

    pub fn as_struct(&self) -> Result<&Struct> {
        match self {
            Value::Struct(s) => Ok(s),
            _ => Err(self.unexpected(Type::Struct)),
        }
    }

    pub fn as_list(&self) -> Result<&List> {
        match self {
            Value::List(l) => Ok(l),
            _ => Err(self.unexpected(Type::List)),
        }
    }

    pub fn as_map(&self) -> Result<&Map> {
        match self {
            Value::Map(m) => Ok(m),
            _ => Err(self.unexpected(Type::Map)),
        }
    }
}

/// One `(id, value)` pair of a struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub id: u16,
    pub value: Value,
}

impl Field {
    pub fn new(id: u16, value: Value) -> Self {
        Self { id, value }
    }
}

/// An ordered sequence of uniquely numbered fields.
///
/// Order is insertion order and carries no meaning.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Struct {
    fields: Vec<Field>,
}

impl Struct {
    /// Builds a struct from its fields.
    ///
    /// # Errors
    /// Returns `Error::DuplicateField` if two fields share an ID.
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for field in &fields {
            if !seen.insert(field.id) {
                return Err(Error::DuplicateField(field.id));
            }
        }
        Ok(Self { fields })
    }

    /// A struct with no fields.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by ID.
    pub fn get(&self, id: u16) -> Option<&Value> {
        self.fields.iter().find(|f| f.id == id).map(|f| &f.value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Struct> for Value {
    fn from(s: Struct) -> Self {
        Value::Struct(s)
    }
}

/// A homogeneous sequence of values.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    elem: Type,
    items: Vec<Value>,
}

impl List {
    /// # Errors
    /// Returns `Error::ElementType` if an item is not of type `elem`.
    pub fn new(elem: Type, items: Vec<Value>) -> Result<Self> {
        if let Some(bad) = items.iter().find(|v| v.ty() != elem) {
            return Err(Error::ElementType { expected: elem, found: bad.ty() });
        }
        Ok(Self { elem, items })
    }

    pub fn elem_type(&self) -> Type {
        self.elem
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<List> for Value {
    fn from(l: List) -> Self {
        Value::List(l)
    }
}

/// A homogeneous sequence of key/value pairs.
///
/// Pairs keep insertion order; keys are not deduplicated at this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    key: Type,
    value: Type,
    pairs: Vec<(Value, Value)>,
}

impl Map {
    /// # Errors
    /// Returns `Error::ElementType` if a key or value does not match its declared type.
    pub fn new(key: Type, value: Type, pairs: Vec<(Value, Value)>) -> Result<Self> {
        for (k, v) in &pairs {
            if k.ty() != key {
                return Err(Error::ElementType { expected: key, found: k.ty() });
            }
            if v.ty() != value {
                return Err(Error::ElementType { expected: value, found: v.ty() });
            }
        }
        Ok(Self { key, value, pairs })
    }

    pub fn key_type(&self) -> Type {
        self.key
    }

    pub fn value_type(&self) -> Type {
        self.value
    }

    pub fn pairs(&self) -> &[(Value, Value)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}
