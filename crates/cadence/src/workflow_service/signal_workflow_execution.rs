//! `SignalWorkflowExecution`: delivers a named signal to a running workflow. Returns
//! nothing on success.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use wirepack::Type;
use wirerpc::ArgsStruct;
use wirerpc::ExceptionSpec;
use wirerpc::FieldSpec;
use wirerpc::Method;
use wirerpc::MethodResult;
use wirerpc::MethodSchema;
use wirerpc::StructSchema;
use wirerpc::SuccessSpec;

use super::SERVICE_NAME;
use crate::error::ServiceError;
use crate::shared::SignalWorkflowExecutionRequest;

pub static SCHEMA: MethodSchema = MethodSchema {
    service: SERVICE_NAME,
    name: "SignalWorkflowExecution",
    args: StructSchema::new(
        "WorkflowService_SignalWorkflowExecution_Args",
        &[FieldSpec::optional(1, "signalRequest", Type::Struct)],
    ),
    success: SuccessSpec::Void,
    exceptions: &[
        ExceptionSpec::new(1, "badRequestError", "BadRequestError"),
        ExceptionSpec::new(2, "internalServiceError", "InternalServiceError"),
        ExceptionSpec::new(3, "entityNotExistError", "EntityNotExistsError"),
        ExceptionSpec::new(4, "serviceBusyError", "ServiceBusyError"),
        ExceptionSpec::new(5, "domainNotActiveError", "DomainNotActiveError"),
        ExceptionSpec::new(6, "limitExceededError", "LimitExceededError"),
        ExceptionSpec::new(7, "clientVersionNotSupportedError", "ClientVersionNotSupportedError"),
    ],
};

pub struct SignalWorkflowExecution;

impl Method for SignalWorkflowExecution {
    type Args = SignalWorkflowExecutionArgs;
    type Success = ();
    type Error = ServiceError;
}

pub type SignalWorkflowExecutionResult = MethodResult<SignalWorkflowExecution>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalWorkflowExecutionArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_request: Option<SignalWorkflowExecutionRequest>,
}

struct_codec!(SignalWorkflowExecutionArgs, &SCHEMA.args, {
    1 => signal_request: optional,
});

impl ArgsStruct for SignalWorkflowExecutionArgs {
    type Params = (Option<SignalWorkflowExecutionRequest>,);

    fn schema() -> &'static MethodSchema {
        &SCHEMA
    }

    fn from_params((signal_request,): Self::Params) -> Self {
        Self { signal_request }
    }
}

impl fmt::Display for SignalWorkflowExecutionArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", SCHEMA.args.name)?;
        if let Some(req) = &self.signal_request {
            write!(f, "SignalRequest: {:?}", req)?;
        }
        write!(f, "}}")
    }
}
