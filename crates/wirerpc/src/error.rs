//! # Error Definitions
//!
//! The central ledger of all codec and classification failures.

use wirepack::EnvelopeType;
use wirepack::Error as WireError;
use wirepack::Type;

/// Failures of the method codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The underlying wire model or binary protocol failed (includes decode-shape errors).
    Wire(WireError),
    /// A required field was absent after decoding.
    MissingField { strukt: &'static str, field: &'static str },
    /// A field produced a value of a type other than the one it declares.
    FieldType { strukt: &'static str, field: &'static str, expected: Type, found: Type },
    /// A writer was handed a field ID the struct does not declare.
    UnknownField { strukt: &'static str, id: u16 },
    /// An i32 on the wire does not name a variant of the enum.
    UnknownVariant { name: &'static str, value: i32 },
    /// A result union has more populated variants than allowed.
    ResultArity { method: &'static str, count: usize },
    /// A non-void result has no populated variant.
    EmptyResult { method: &'static str },
    /// An exception of a kind the method does not declare was put into its result.
    UndeclaredException { method: &'static str, kind: &'static str },
    /// An exception table entry names a kind the service error type cannot decode.
    UnknownException(&'static str),
    /// An envelope addressed to another method, or of the wrong type.
    EnvelopeMismatch {
        method: &'static str,
        expected: EnvelopeType,
        found_name: String,
        found: EnvelopeType,
    },
    /// A dispatcher received a call for a method it does not know.
    UnknownMethod(String),
    /// A schema or registry definition is inconsistent.
    Schema(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Wire(e) => write!(f, "{}", e),
            Error::MissingField { strukt, field } => {
                write!(f, "field {} of {} is required", field, strukt)
            }
            Error::FieldType { strukt, field, expected, found } => write!(
                f,
                "field {} of {} is declared {} but produced {}",
                field, strukt, expected, found
            ),
            Error::UnknownField { strukt, id } => write!(f, "{} has no field {}", strukt, id),
            Error::UnknownVariant { name, value } => {
                write!(f, "unknown enum value {} for {}", value, name)
            }
            Error::ResultArity { method, count } => write!(
                f,
                "{} result should have exactly one field: got {} fields",
                method, count
            ),
            Error::EmptyResult { method } => {
                write!(f, "expected a non-void result from {}", method)
            }
            Error::UndeclaredException { method, kind } => {
                write!(f, "{} does not declare exception {}", method, kind)
            }
            Error::UnknownException(kind) => write!(f, "unknown exception kind {}", kind),
            Error::EnvelopeMismatch { method, expected, found_name, found } => write!(
                f,
                "expected {} envelope for {}, got {} envelope for {}",
                expected, method, found, found_name
            ),
            Error::UnknownMethod(name) => write!(f, "unknown method {}", name),
            Error::Schema(msg) => write!(f, "invalid schema: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Wire(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WireError> for Error {
    fn from(e: WireError) -> Self {
        Self::Wire(e)
    }
}

/// A specialized Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
