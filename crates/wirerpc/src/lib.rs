//! # WireRPC
//!
//! Typed method structures over `wirepack` values.
//!
//! ## Architecture
//!
//! Every remote method has two structures: its args, sent in a `Call`, and its result
//! union, sent back in a `Reply`. Both are described by a static [`MethodSchema`] and
//! convert to and from `wirepack::Value` through [`ToWire`] / [`FromWire`].
//!
//! - **Schema**: numbered fields, a success slot, and a closed table of exceptions.
//! - **Codec**: lenient readers (unknown fields skipped) and strict writers (declared
//!   types only).
//! - **Union**: the result holds exactly one populated slot, or none for a void
//!   success. This is checked whenever a result is encoded or decoded.
//! - **Helpers**: [`MethodHelper`] classifies a handler's error as a declared exception
//!   or passes it through unchanged.

pub mod codec;
pub mod error;
pub mod helper;
pub mod method;
pub mod registry;
pub mod schema;


pub use codec::Binary;
pub use codec::FromWire;
pub use codec::StructReader;
pub use codec::StructWriter;
pub use codec::ToWire;
pub use codec::WireType;
pub use error::Error;
pub use error::Result;
pub use helper::MethodHelper;
pub use method::check_arity;
pub use method::ArgsStruct;
pub use method::Method;
pub use method::MethodResult;
pub use method::Payload;
pub use method::ServiceException;
pub use registry::ServiceRegistry;
pub use schema::ExceptionSpec;
pub use schema::FieldSpec;
pub use schema::MethodSchema;
pub use schema::StructSchema;
pub use schema::SuccessSpec;
pub use schema::SUCCESS_ID;
