//! # Wirepack
//!
//! A small, strict value tree and binary protocol for field-tagged RPC structs.
//!
//! ## Philosophy
//!
//! - **One Intermediate Form**: Typed structures never touch bytes directly. They become a
//!   `Value` tree first, and only the tree is serialized.
//! - **Self-Describing**: Every field carries its numeric ID and wire type, so a reader can
//!   skip what it does not understand.
//! - **Bounded**: Decoders are bounds-checked views with an explicit nesting limit.
//!
//! ## Format
//!
//! - **Scalars**: `[Data: N]` (big-endian)
//! - **Binary**: `[Len: i32][Data: Len]`
//! - **Struct**: `([Type: 1b][Id: 2b][Value])* [Stop: 0x00]`
//! - **List**: `[ElemType: 1b][Count: i32][Items]`
//! - **Map**: `[KeyType: 1b][ValType: 1b][Count: i32][Pairs]`
//!
//! The layout is the Thrift binary protocol, so payloads interoperate with other
//! implementations of the same method schemas.

pub mod binary;
pub mod envelope;
pub mod value;


pub use binary::decode;
pub use binary::encode;
pub use binary::Decoder;
pub use binary::Encoder;
pub use binary::Limits;
pub use envelope::Envelope;
pub use envelope::EnvelopeType;
pub use value::Field;
pub use value::List;
pub use value::Map;
pub use value::Struct;
pub use value::Type;
pub use value::Value;

/// Wirepack serialization and deserialization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer exhausted while reading.
    UnexpectedEnd,
    /// Byte does not correspond to a valid wire `Type`.
    InvalidType(u8),
    /// Byte does not correspond to a valid `EnvelopeType`.
    InvalidEnvelopeType(u8),
    /// Envelope header is not a strict version 1 header.
    BadVersion(u32),
    /// A length or count prefix was negative.
    NegativeLength(i32),
    /// Blob or container length exceeds `i32::MAX`.
    BlobTooLarge(usize),
    /// Containers are nested deeper than the configured limit.
    DepthExceeded(usize),
    /// String data is not valid UTF-8.
    InvalidUtf8,
    /// A struct carries the same field ID twice.
    DuplicateField(u16),
    /// A list or map item does not have the container's declared type.
    ElementType { expected: Type, found: Type },
    /// Accessor used on a value of another type.
    UnexpectedType { expected: Type, found: Type },
    /// Bytes left over after a complete value.
    TrailingBytes(usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnexpectedEnd => write!(f, "unexpected end of input"),
            Error::InvalidType(b) => write!(f, "invalid type byte: {:#04x}", b),
            Error::InvalidEnvelopeType(b) => write!(f, "invalid envelope type: {}", b),
            Error::BadVersion(v) => write!(f, "unsupported envelope version: {:#010x}", v),
            Error::NegativeLength(n) => write!(f, "negative length: {}", n),
            Error::BlobTooLarge(n) => write!(f, "length {} exceeds i32::MAX", n),
            Error::DepthExceeded(max) => write!(f, "values nested deeper than {}", max),
            Error::InvalidUtf8 => write!(f, "binary value is not valid utf-8"),
            Error::DuplicateField(id) => write!(f, "field {} appears more than once", id),
            Error::ElementType { expected, found } => {
                write!(f, "container item of type {} in a container of {}", found, expected)
            }
            Error::UnexpectedType { expected, found } => {
                write!(f, "cannot extract {} from value of type {}", expected, found)
            }
            Error::TrailingBytes(n) => write!(f, "{} trailing bytes after value", n),
        }
    }
}

impl std::error::Error for Error {}

/// Specialized `Result` for Wirepack operations.
pub type Result<T> = std::result::Result<T, Error>;
