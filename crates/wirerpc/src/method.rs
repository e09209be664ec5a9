//! # Methods
//!
//! The per-method pair of structures: an args struct travelling in a `Call` and a
//! result union travelling in a `Reply`.
//!
//! A result union has one success slot (field 0, absent for void methods) and one
//! slot per declared exception. In memory it is a [`MethodResult`], so at most one
//! slot can ever be populated; on the wire the count is checked by [`check_arity`]
//! in both directions.

use std::fmt;

use tracing::trace;
use wirepack::EnvelopeType;
use wirepack::Field;
use wirepack::Struct;
use wirepack::Type;
use wirepack::Value;

use crate::codec::FromWire;
use crate::codec::ToWire;
use crate::codec::WireType;
use crate::error::Error;
use crate::error::Result;
use crate::schema::MethodSchema;
use crate::schema::SuccessSpec;
use crate::schema::SUCCESS_ID;

/// The arguments struct of one method.
pub trait ArgsStruct: ToWire + FromWire {
    /// The parameters in declaration order, as a tuple.
    type Params;

    fn schema() -> &'static MethodSchema;

    fn from_params(params: Self::Params) -> Self;

    fn method_name(&self) -> &'static str {
        Self::schema().name
    }

    fn envelope_type(&self) -> EnvelopeType {
        EnvelopeType::Call
    }
}

/// A success payload.
///
/// Void methods use `()`, which is the only payload that may be absent on the wire.
pub trait Payload: ToWire + FromWire {
    /// The value of an empty success slot, if this payload may be empty.
    fn void() -> Option<Self> {
        None
    }
}

impl Payload for () {
    fn void() -> Option<Self> {
        Some(())
    }
}

macro_rules! value_payloads {
    ($($ty:ty),* $(,)?) => {
        $(impl Payload for $ty {})*
    };
}

value_payloads!(bool, i8, i16, i32, i64, f64, String, crate::codec::Binary);

impl<T: ToWire + FromWire> Payload for Vec<T> {}

/// The error type a service's methods fail with.
///
/// Declared exceptions are variants that report a `kind`; anything else (transport
/// failures, timeouts) reports `None` and is never placed in a result union.
pub trait ServiceException: Sized {
    fn kind(&self) -> Option<&'static str>;

    /// Encodes the payload of a declared exception.
    fn encode_exception(&self) -> Result<Value>;

    /// Decodes the payload of an exception of `kind`.
    fn decode_exception(kind: &'static str, value: &Value) -> Result<Self>;
}

/// Ties a method's args, success payload and error type together.
pub trait Method: 'static {
    type Args: ArgsStruct;
    type Success: Payload;
    type Error: ServiceException;

    fn schema() -> &'static MethodSchema {
        <Self::Args as ArgsStruct>::schema()
    }
}

/// Checks the number of populated result slots.
///
/// Non-void methods need exactly one. Void methods accept zero (success) or one
/// (an exception).
pub fn check_arity(schema: &MethodSchema, count: usize) -> Result<()> {
    match (count, schema.success) {
        (1, _) | (0, SuccessSpec::Void) => Ok(()),
        (0, SuccessSpec::Value(_)) => Err(Error::EmptyResult { method: schema.name }),
        (count, _) => Err(Error::ResultArity { method: schema.name, count }),
    }
}

/// The result union of method `M`.
pub enum MethodResult<M: Method> {
    Success(M::Success),
    Exception(M::Error),
}

impl<M: Method> MethodResult<M> {
    pub fn method_name(&self) -> &'static str {
        M::schema().name
    }

    pub fn envelope_type(&self) -> EnvelopeType {
        EnvelopeType::Reply
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MethodResult::Success(_))
    }

    /// Converts into the `(success, error)` pair a caller consumes.
    pub fn into_result(self) -> std::result::Result<M::Success, M::Error> {
        match self {
            MethodResult::Success(s) => Ok(s),
            MethodResult::Exception(e) => Err(e),
        }
    }
}

impl<M: Method> WireType for MethodResult<M> {
    const TYPE: Type = Type::Struct;
}

impl<M: Method> ToWire for MethodResult<M> {
    fn to_wire(&self) -> Result<Value> {
        let schema = M::schema();
        let mut fields = Vec::with_capacity(1);
        match self {
            MethodResult::Success(success) => match schema.success {
                SuccessSpec::Value(ty) => {
                    let value = success.to_wire()?;
                    if value.ty() != ty {
                        return Err(Error::FieldType {
                            strukt: schema.name,
                            field: "success",
                            expected: ty,
                            found: value.ty(),
                        });
                    }
                    fields.push(Field::new(SUCCESS_ID, value));
                }
                SuccessSpec::Void if M::Success::void().is_none() => {
                    return Err(Error::Schema(format!(
                        "{} is void but its success payload is not",
                        schema.name
                    )));
                }
                SuccessSpec::Void => {}
            },
            MethodResult::Exception(err) => {
                let kind = err.kind().unwrap_or("unclassified");
                let slot = schema
                    .exception_by_kind(kind)
                    .ok_or(Error::UndeclaredException { method: schema.name, kind })?;
                fields.push(Field::new(slot.id, err.encode_exception()?));
            }
        }
        check_arity(schema, fields.len())?;
        Ok(Value::Struct(Struct::new(fields)?))
    }
}

impl<M: Method> FromWire for MethodResult<M> {
    fn from_wire(value: &Value) -> Result<Self> {
        let schema = M::schema();
        let strukt = value.as_struct()?;
        let mut success = None;
        let mut exception = None;
        let mut count = 0;

        for field in strukt.fields() {
            if field.id == SUCCESS_ID {
                if let SuccessSpec::Value(ty) = schema.success {
                    if field.value.ty() == ty {
                        success = Some(M::Success::from_wire(&field.value)?);
                        count += 1;
                    }
                }
                continue;
            }
            match schema.exception_by_id(field.id) {
                Some(slot) if field.value.ty() == Type::Struct => {
                    exception = Some(M::Error::decode_exception(slot.kind, &field.value)?);
                    count += 1;
                }
                _ => trace!(method = schema.name, id = field.id, "skipping result field"),
            }
        }

        check_arity(schema, count)?;
        match (exception, success) {
            (Some(e), _) => Ok(MethodResult::Exception(e)),
            (None, Some(s)) => Ok(MethodResult::Success(s)),
            (None, None) => M::Success::void()
                .map(MethodResult::Success)
                .ok_or(Error::EmptyResult { method: schema.name }),
        }
    }
}

impl<M: Method> Clone for MethodResult<M>
where
    M::Success: Clone,
    M::Error: Clone,
{
    fn clone(&self) -> Self {
        match self {
            MethodResult::Success(s) => MethodResult::Success(s.clone()),
            MethodResult::Exception(e) => MethodResult::Exception(e.clone()),
        }
    }
}

impl<M: Method> PartialEq for MethodResult<M>
where
    M::Success: PartialEq,
    M::Error: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MethodResult::Success(a), MethodResult::Success(b)) => a == b,
            (MethodResult::Exception(a), MethodResult::Exception(b)) => a == b,
            _ => false,
        }
    }
}

impl<M: Method> fmt::Debug for MethodResult<M>
where
    M::Success: fmt::Debug,
    M::Error: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodResult::Success(s) => f.debug_tuple("Success").field(s).finish(),
            MethodResult::Exception(e) => f.debug_tuple("Exception").field(e).finish(),
        }
    }
}

/// Prints `Service_Method_Result{Success: ...}` or `Service_Method_Result{SlotName: ...}`.
impl<M: Method> fmt::Display for MethodResult<M>
where
    M::Success: fmt::Debug,
    M::Error: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schema = M::schema();
        write!(f, "{}{{", schema.result_name())?;
        match self {
            MethodResult::Success(s) if !schema.is_void() => write!(f, "Success: {:?}", s)?,
            MethodResult::Success(_) => {}
            MethodResult::Exception(e) => {
                let slot = e.kind().and_then(|k| schema.exception_by_kind(k));
                let mut name = slot.map_or("Exception", |s| s.name).chars();
                if let Some(first) = name.next() {
                    write!(f, "{}{}: {:?}", first.to_ascii_uppercase(), name.as_str(), e)?;
                }
            }
        }
        write!(f, "}}")
    }
}
