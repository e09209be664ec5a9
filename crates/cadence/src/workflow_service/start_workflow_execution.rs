//! `StartWorkflowExecution`: starts a new run of a workflow and returns its run ID.

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
use wirerpc::Payload;
use wirerpc::StructSchema;
use wirerpc::SuccessSpec;

use super::SERVICE_NAME;
use crate::error::ServiceError;
use crate::shared::StartWorkflowExecutionRequest;
use crate::shared::StartWorkflowExecutionResponse;

pub static SCHEMA: MethodSchema = MethodSchema {
    service: SERVICE_NAME,
    name: "StartWorkflowExecution",
    args: StructSchema::new(
        "WorkflowService_StartWorkflowExecution_Args",
        &[FieldSpec::optional(1, "startRequest", Type::Struct)],
    ),
    success: SuccessSpec::Value(Type::Struct),
    exceptions: &[
        ExceptionSpec::new(1, "badRequestError", "BadRequestError"),
        ExceptionSpec::new(2, "internalServiceError", "InternalServiceError"),
        ExceptionSpec::new(3, "sessionAlreadyExistError", "WorkflowExecutionAlreadyStartedError"),
        ExceptionSpec::new(4, "serviceBusyError", "ServiceBusyError"),
        ExceptionSpec::new(5, "domainNotActiveError", "DomainNotActiveError"),
        ExceptionSpec::new(6, "limitExceededError", "LimitExceededError"),
        ExceptionSpec::new(7, "entityNotExistError", "EntityNotExistsError"),
        ExceptionSpec::new(8, "clientVersionNotSupportedError", "ClientVersionNotSupportedError"),
    ],
};

pub struct StartWorkflowExecution;

impl Method for StartWorkflowExecution {
    type Args = StartWorkflowExecutionArgs;
    type Success = StartWorkflowExecutionResponse;
    type Error = ServiceError;
}

pub type StartWorkflowExecutionResult = MethodResult<StartWorkflowExecution>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartWorkflowExecutionArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_request: Option<StartWorkflowExecutionRequest>,
}

struct_codec!(StartWorkflowExecutionArgs, &SCHEMA.args, {
    1 => start_request: optional,
});

impl ArgsStruct for StartWorkflowExecutionArgs {
    type Params = (Option<StartWorkflowExecutionRequest>,);

    fn schema() -> &'static MethodSchema {
        &SCHEMA
    }

    fn from_params((start_request,): Self::Params) -> Self {
        Self { start_request }
    }
}

impl fmt::Display for StartWorkflowExecutionArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", SCHEMA.args.name)?;
        if let Some(req) = &self.start_request {
            write!(f, "StartRequest: {:?}", req)?;
        }
        write!(f, "}}")
    }
}

impl Payload for StartWorkflowExecutionResponse {}
