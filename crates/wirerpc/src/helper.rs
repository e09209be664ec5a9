//! # Method Helpers
//!
//! One helper bundle per method: builds args, classifies errors, and moves between a
//! handler's `(success, error)` pair and the method's result union.
//!
//! Helpers are zero-sized, `Copy`, and carry no state beyond the static schema, so a
//! single bundle can be shared by any number of concurrent callers.

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;
use wirepack::Envelope;
use wirepack::EnvelopeType;
use wirepack::Value;

use crate::codec::FromWire;
use crate::codec::ToWire;
use crate::error::Error;
use crate::error::Result;
use crate::method::ArgsStruct;
use crate::method::Method;
use crate::method::MethodResult;
use crate::method::ServiceException;
use crate::schema::MethodSchema;

type Params<M> = <<M as Method>::Args as ArgsStruct>::Params;

/// The helper bundle of method `M`.
pub struct MethodHelper<M> {
    schema: &'static MethodSchema,
    _method: PhantomData<fn() -> M>,
}

impl<M: Method> MethodHelper<M> {
    pub(crate) fn new() -> Self {
        Self { schema: M::schema(), _method: PhantomData }
    }

    pub fn schema(&self) -> &'static MethodSchema {
        self.schema
    }

    pub fn method_name(&self) -> &'static str {
        self.schema.name
    }

    /// Builds the args struct from the parameters in declaration order.
    pub fn args(&self, params: Params<M>) -> M::Args {
        M::Args::from_params(params)
    }

    /// Returns true if `err` is one of the exceptions this method declares.
    pub fn is_exception(&self, err: &M::Error) -> bool {
        err.kind().is_some_and(|kind| self.schema.exception_by_kind(kind).is_some())
    }

    /// Places a handler's outcome into the result union.
    ///
    /// # Errors
    /// An error this method does not declare is handed back unchanged; no result is built.
    pub fn wrap_response(
        &self,
        response: std::result::Result<M::Success, M::Error>,
    ) -> std::result::Result<MethodResult<M>, M::Error> {
        match response {
            Ok(success) => Ok(MethodResult::Success(success)),
            Err(err) if self.is_exception(&err) => {
                trace!(method = self.schema.name, kind = ?err.kind(), "wrapping declared exception");
                Ok(MethodResult::Exception(err))
            }
            Err(err) => {
                trace!(method = self.schema.name, "passing through unclassified error");
                Err(err)
            }
        }
    }

    /// Extracts the `(success, error)` pair from a result union.
    pub fn unwrap_response(&self, result: MethodResult<M>) -> std::result::Result<M::Success, M::Error> {
        result.into_result()
    }

    /// Decodes a result union and unwraps it.
    ///
    /// The outer `Result` reports codec failures, including a non-void result with no
    /// populated slot (`Error::EmptyResult`); the inner one is the method's outcome.
    pub fn unwrap_wire(&self, value: &Value) -> Result<std::result::Result<M::Success, M::Error>> {
        Ok(self.unwrap_response(MethodResult::<M>::from_wire(value)?))
    }

    pub fn encode_args(&self, args: &M::Args) -> Result<Value> {
        args.to_wire()
    }

    pub fn decode_args(&self, value: &Value) -> Result<M::Args> {
        M::Args::from_wire(value)
    }

    pub fn encode_result(&self, result: &MethodResult<M>) -> Result<Value> {
        result.to_wire()
    }

    pub fn decode_result(&self, value: &Value) -> Result<MethodResult<M>> {
        MethodResult::from_wire(value)
    }

    /// Wraps args into a `Call` envelope.
    pub fn call(&self, seq_id: i32, args: &M::Args) -> Result<Envelope> {
        trace!(method = self.schema.name, seq_id, "encoding call");
        Ok(Envelope::new(self.schema.name, EnvelopeType::Call, seq_id, args.to_wire()?))
    }

    /// Wraps a result union into a `Reply` envelope.
    pub fn reply(&self, seq_id: i32, result: &MethodResult<M>) -> Result<Envelope> {
        trace!(method = self.schema.name, seq_id, success = result.is_success(), "encoding reply");
        Ok(Envelope::new(self.schema.name, EnvelopeType::Reply, seq_id, result.to_wire()?))
    }

    /// Decodes the args of a `Call` envelope addressed to this method.
    pub fn read_call(&self, envelope: &Envelope) -> Result<M::Args> {
        self.expect(envelope, EnvelopeType::Call)?;
        M::Args::from_wire(&envelope.value)
    }

    /// Decodes the result union of a `Reply` envelope from this method.
    pub fn read_reply(&self, envelope: &Envelope) -> Result<MethodResult<M>> {
        self.expect(envelope, EnvelopeType::Reply)?;
        MethodResult::from_wire(&envelope.value)
    }

    fn expect(&self, envelope: &Envelope, kind: EnvelopeType) -> Result<()> {
        if envelope.name != self.schema.name || envelope.kind != kind {
            return Err(Error::EnvelopeMismatch {
                method: self.schema.name,
                expected: kind,
                found_name: envelope.name.clone(),
                found: envelope.kind,
            });
        }
        Ok(())
    }
}

impl<M> Clone for MethodHelper<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for MethodHelper<M> {}

impl<M> fmt::Debug for MethodHelper<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodHelper").field("method", &self.schema.name).finish()
    }
}
