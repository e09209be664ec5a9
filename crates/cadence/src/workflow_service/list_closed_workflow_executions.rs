//! `ListClosedWorkflowExecutions`: pages through the executions of a domain that have
//! closed, optionally filtered by start time, ID, type or close status.

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
use crate::shared::ListClosedWorkflowExecutionsRequest;
use crate::shared::ListClosedWorkflowExecutionsResponse;

pub static SCHEMA: MethodSchema = MethodSchema {
    service: SERVICE_NAME,
    name: "ListClosedWorkflowExecutions",
    args: StructSchema::new(
        "WorkflowService_ListClosedWorkflowExecutions_Args",
        &[FieldSpec::optional(1, "listRequest", Type::Struct)],
    ),
    success: SuccessSpec::Value(Type::Struct),
    exceptions: &[
        ExceptionSpec::new(1, "badRequestError", "BadRequestError"),
        ExceptionSpec::new(2, "internalServiceError", "InternalServiceError"),
        ExceptionSpec::new(3, "entityNotExistError", "EntityNotExistsError"),
        ExceptionSpec::new(4, "serviceBusyError", "ServiceBusyError"),
        ExceptionSpec::new(5, "clientVersionNotSupportedError", "ClientVersionNotSupportedError"),
    ],
};

pub struct ListClosedWorkflowExecutions;

impl Method for ListClosedWorkflowExecutions {
    type Args = ListClosedWorkflowExecutionsArgs;
    type Success = ListClosedWorkflowExecutionsResponse;
    type Error = ServiceError;
}

pub type ListClosedWorkflowExecutionsResult = MethodResult<ListClosedWorkflowExecutions>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClosedWorkflowExecutionsArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_request: Option<ListClosedWorkflowExecutionsRequest>,
}

struct_codec!(ListClosedWorkflowExecutionsArgs, &SCHEMA.args, {
    1 => list_request: optional,
});

impl ArgsStruct for ListClosedWorkflowExecutionsArgs {
    type Params = (Option<ListClosedWorkflowExecutionsRequest>,);

    fn schema() -> &'static MethodSchema {
        &SCHEMA
    }

    fn from_params((list_request,): Self::Params) -> Self {
        Self { list_request }
    }
}

impl fmt::Display for ListClosedWorkflowExecutionsArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", SCHEMA.args.name)?;
        if let Some(req) = &self.list_request {
            write!(f, "ListRequest: {:?}", req)?;
        }
        write!(f, "}}")
    }
}

impl Payload for ListClosedWorkflowExecutionsResponse {}
