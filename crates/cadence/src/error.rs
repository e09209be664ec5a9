//! # Service Errors
//!
//! Everything a `WorkflowService` call can fail with: one variant per exception the
//! service declares, plus failures that never travel inside a result union.

use std::fmt;
use std::sync::Arc;

use wirepack::Value;
use wirerpc::FromWire;
use wirerpc::ServiceException;
use wirerpc::ToWire;

use crate::shared::*;

/// A failure of a `WorkflowService` call.
#[derive(Debug, Clone)]
pub enum ServiceError {
    BadRequest(BadRequestError),
    InternalService(InternalServiceError),
    EntityNotExists(EntityNotExistsError),
    ServiceBusy(ServiceBusyError),
    ClientVersionNotSupported(ClientVersionNotSupportedError),
    WorkflowExecutionAlreadyStarted(WorkflowExecutionAlreadyStartedError),
    DomainNotActive(DomainNotActiveError),
    LimitExceeded(LimitExceededError),
    /// Any other failure (transport, timeout, cancellation). Compared by identity.
    Other(Arc<dyn std::error::Error + Send + Sync>),
}

impl ServiceError {
    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other(Arc::new(err))
    }
}

impl PartialEq for ServiceError {
    fn eq(&self, other: &Self) -> bool {
        use ServiceError::*;
        match (self, other) {
            (BadRequest(a), BadRequest(b)) => a == b,
            (InternalService(a), InternalService(b)) => a == b,
            (EntityNotExists(a), EntityNotExists(b)) => a == b,
            (ServiceBusy(a), ServiceBusy(b)) => a == b,
            (ClientVersionNotSupported(a), ClientVersionNotSupported(b)) => a == b,
            (WorkflowExecutionAlreadyStarted(a), WorkflowExecutionAlreadyStarted(b)) => a == b,
            (DomainNotActive(a), DomainNotActive(b)) => a == b,
            (LimitExceeded(a), LimitExceeded(b)) => a == b,
            (Other(a), Other(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::BadRequest(e) => write!(f, "{}", e),
            ServiceError::InternalService(e) => write!(f, "{}", e),
            ServiceError::EntityNotExists(e) => write!(f, "{}", e),
            ServiceError::ServiceBusy(e) => write!(f, "{}", e),
            ServiceError::ClientVersionNotSupported(e) => write!(f, "{}", e),
            ServiceError::WorkflowExecutionAlreadyStarted(e) => write!(f, "{}", e),
            ServiceError::DomainNotActive(e) => write!(f, "{}", e),
            ServiceError::LimitExceeded(e) => write!(f, "{}", e),
            ServiceError::Other(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Other(e) => Some(&**e),
            _ => None,
        }
    }
}

macro_rules! exception_kinds {
    ($($variant:ident($ty:ident)),* $(,)?) => {
        $(
            impl From<$ty> for ServiceError {
                fn from(e: $ty) -> Self {
                    ServiceError::$variant(e)
                }
            }
        )*

        impl ServiceException for ServiceError {
            fn kind(&self) -> Option<&'static str> {
                match self {
                    $(ServiceError::$variant(_) => Some(stringify!($ty)),)*
                    ServiceError::Other(_) => None,
                }
            }

            fn encode_exception(&self) -> wirerpc::Result<Value> {
                match self {
                    $(ServiceError::$variant(e) => e.to_wire(),)*
                    ServiceError::Other(_) => Err(wirerpc::Error::UnknownException("unclassified")),
                }
            }

            fn decode_exception(kind: &'static str, value: &Value) -> wirerpc::Result<Self> {
                match kind {
                    $(stringify!($ty) => Ok(ServiceError::$variant($ty::from_wire(value)?)),)*
                    other => Err(wirerpc::Error::UnknownException(other)),
                }
            }
        }
    };
}

exception_kinds! {
    BadRequest(BadRequestError),
    InternalService(InternalServiceError),
    EntityNotExists(EntityNotExistsError),
    ServiceBusy(ServiceBusyError),
    ClientVersionNotSupported(ClientVersionNotSupportedError),
    WorkflowExecutionAlreadyStarted(WorkflowExecutionAlreadyStartedError),
    DomainNotActive(DomainNotActiveError),
    LimitExceeded(LimitExceededError),
}
