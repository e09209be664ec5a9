//! # Shared Types
//!
//! Requests, responses and exceptions used by more than one `WorkflowService` method.
//!
//! Field IDs follow the service IDL and never change. Every struct converts to and from
//! the wire with [`wirerpc::ToWire`] / [`wirerpc::FromWire`] and to and from JSON with
//! serde (camelCase names, absent optional fields omitted, blobs as base64).

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use wirerpc::Binary;

// ============================================================================
//  ENUMS
// ============================================================================

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowExecutionCloseStatus {
    Completed = 0,
    Failed = 1,
    Canceled = 2,
    Terminated = 3,
    ContinuedAsNew = 4,
    TimedOut = 5,
}

wire_enum!(WorkflowExecutionCloseStatus {
    Completed = 0,
    Failed = 1,
    Canceled = 2,
    Terminated = 3,
    ContinuedAsNew = 4,
    TimedOut = 5,
});

impl WorkflowExecutionCloseStatus {
    pub const ALL: [Self; 6] = [
        Self::Completed,
        Self::Failed,
        Self::Canceled,
        Self::Terminated,
        Self::ContinuedAsNew,
        Self::TimedOut,
    ];
}

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskListKind {
    #[default]
    Normal = 0,
    Sticky = 1,
}

wire_enum!(TaskListKind { Normal = 0, Sticky = 1 });

// ============================================================================
//  SMALL STRUCTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

wire_struct!(WorkflowExecution as "WorkflowExecution" {
    10 => workflow_id("workflowId"): optional Binary,
    20 => run_id("runId"): optional Binary,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

wire_struct!(WorkflowType as "WorkflowType" {
    10 => name("name"): optional Binary,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TaskListKind>,
}

wire_struct!(TaskList as "TaskList" {
    10 => name("name"): optional Binary,
    20 => kind("kind"): optional I32,
});

/// Workflow metadata that is not indexed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::json::base64_map")]
    pub fields: Option<BTreeMap<String, Binary>>,
}

wire_struct!(Memo as "Memo" {
    10 => fields("fields"): optional Map,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTimeFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_time: Option<i64>,
}

wire_struct!(StartTimeFilter as "StartTimeFilter" {
    10 => earliest_time("earliestTime"): optional I64,
    20 => latest_time("latestTime"): optional I64,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecutionFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

wire_struct!(WorkflowExecutionFilter as "WorkflowExecutionFilter" {
    10 => workflow_id("workflowId"): optional Binary,
    20 => run_id("runId"): optional Binary,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTypeFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

wire_struct!(WorkflowTypeFilter as "WorkflowTypeFilter" {
    10 => name("name"): optional Binary,
});

// ============================================================================
//  REQUESTS AND RESPONSES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClosedWorkflowExecutionsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_page_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::json::base64")]
    pub next_page_token: Option<Binary>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "StartTimeFilter")]
    pub start_time_filter: Option<StartTimeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_filter: Option<WorkflowExecutionFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_filter: Option<WorkflowTypeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<WorkflowExecutionCloseStatus>,
}

wire_struct!(ListClosedWorkflowExecutionsRequest as "ListClosedWorkflowExecutionsRequest" {
    10 => domain("domain"): optional Binary,
    20 => maximum_page_size("maximumPageSize"): optional I32,
    30 => next_page_token("nextPageToken"): optional Binary,
    40 => start_time_filter("StartTimeFilter"): optional Struct,
    50 => execution_filter("executionFilter"): optional Struct,
    60 => type_filter("typeFilter"): optional Struct,
    70 => status_filter("statusFilter"): optional I32,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecutionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<WorkflowExecution>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub workflow_type: Option<WorkflowType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_status: Option<WorkflowExecutionCloseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_length: Option<i64>,
}

wire_struct!(WorkflowExecutionInfo as "WorkflowExecutionInfo" {
    10 => execution("execution"): optional Struct,
    20 => workflow_type("type"): optional Struct,
    30 => start_time("startTime"): optional I64,
    40 => close_time("closeTime"): optional I64,
    50 => close_status("closeStatus"): optional I32,
    60 => history_length("historyLength"): optional I64,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClosedWorkflowExecutionsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executions: Option<Vec<WorkflowExecutionInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::json::base64")]
    pub next_page_token: Option<Binary>,
}

wire_struct!(ListClosedWorkflowExecutionsResponse as "ListClosedWorkflowExecutionsResponse" {
    10 => executions("executions"): optional List,
    20 => next_page_token("nextPageToken"): optional Binary,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartWorkflowExecutionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_type: Option<WorkflowType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_list: Option<TaskList>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::json::base64")]
    pub input: Option<Binary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_start_to_close_timeout_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_start_to_close_timeout_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_schedule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<Memo>,
}

wire_struct!(StartWorkflowExecutionRequest as "StartWorkflowExecutionRequest" {
    10 => domain("domain"): optional Binary,
    20 => workflow_id("workflowId"): optional Binary,
    30 => workflow_type("workflowType"): optional Struct,
    40 => task_list("taskList"): optional Struct,
    50 => input("input"): optional Binary,
    60 => execution_start_to_close_timeout_seconds("executionStartToCloseTimeoutSeconds"): optional I32,
    70 => task_start_to_close_timeout_seconds("taskStartToCloseTimeoutSeconds"): optional I32,
    80 => identity("identity"): optional Binary,
    90 => request_id("requestId"): optional Binary,
    130 => cron_schedule("cronSchedule"): optional Binary,
    140 => memo("memo"): optional Struct,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartWorkflowExecutionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

wire_struct!(StartWorkflowExecutionResponse as "StartWorkflowExecutionResponse" {
    10 => run_id("runId"): optional Binary,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalWorkflowExecutionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_execution: Option<WorkflowExecution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::json::base64")]
    pub input: Option<Binary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::json::base64")]
    pub control: Option<Binary>,
}

wire_struct!(SignalWorkflowExecutionRequest as "SignalWorkflowExecutionRequest" {
    10 => domain("domain"): optional Binary,
    20 => workflow_execution("workflowExecution"): optional Struct,
    30 => signal_name("signalName"): optional Binary,
    40 => input("input"): optional Binary,
    50 => identity("identity"): optional Binary,
    60 => request_id("requestId"): optional Binary,
    70 => control("control"): optional Binary,
});

// ============================================================================
//  EXCEPTIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadRequestError {
    pub message: String,
}

wire_struct!(BadRequestError as "BadRequestError" {
    1 => message("message"): required Binary,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalServiceError {
    pub message: String,
}

wire_struct!(InternalServiceError as "InternalServiceError" {
    1 => message("message"): required Binary,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityNotExistsError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_cluster: Option<String>,
}

wire_struct!(EntityNotExistsError as "EntityNotExistsError" {
    1 => message("message"): required Binary,
    2 => current_cluster("currentCluster"): optional Binary,
    3 => active_cluster("activeCluster"): optional Binary,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBusyError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

wire_struct!(ServiceBusyError as "ServiceBusyError" {
    1 => message("message"): required Binary,
    2 => reason("reason"): optional Binary,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientVersionNotSupportedError {
    pub feature_version: String,
    pub client_impl: String,
    pub supported_versions: String,
}

wire_struct!(ClientVersionNotSupportedError as "ClientVersionNotSupportedError" {
    1 => feature_version("featureVersion"): required Binary,
    2 => client_impl("clientImpl"): required Binary,
    3 => supported_versions("supportedVersions"): required Binary,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecutionAlreadyStartedError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

wire_struct!(WorkflowExecutionAlreadyStartedError as "WorkflowExecutionAlreadyStartedError" {
    1 => message("message"): optional Binary,
    2 => start_request_id("startRequestId"): optional Binary,
    3 => run_id("runId"): optional Binary,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainNotActiveError {
    pub message: String,
    pub domain_name: String,
    pub current_cluster: String,
    pub active_cluster: String,
}

wire_struct!(DomainNotActiveError as "DomainNotActiveError" {
    1 => message("message"): required Binary,
    2 => domain_name("domainName"): required Binary,
    3 => current_cluster("currentCluster"): required Binary,
    4 => active_cluster("activeCluster"): required Binary,
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitExceededError {
    pub message: String,
}

wire_struct!(LimitExceededError as "LimitExceededError" {
    1 => message("message"): required Binary,
});

impl fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BadRequestError{{Message: {}}}", self.message)
    }
}

impl fmt::Display for InternalServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternalServiceError{{Message: {}}}", self.message)
    }
}

impl fmt::Display for EntityNotExistsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityNotExistsError{{Message: {}", self.message)?;
        if let Some(cluster) = &self.current_cluster {
            write!(f, ", CurrentCluster: {}", cluster)?;
        }
        if let Some(cluster) = &self.active_cluster {
            write!(f, ", ActiveCluster: {}", cluster)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for ServiceBusyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceBusyError{{Message: {}", self.message)?;
        if let Some(reason) = &self.reason {
            write!(f, ", Reason: {}", reason)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for ClientVersionNotSupportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClientVersionNotSupportedError{{FeatureVersion: {}, ClientImpl: {}, SupportedVersions: {}}}",
            self.feature_version, self.client_impl, self.supported_versions
        )
    }
}

impl fmt::Display for WorkflowExecutionAlreadyStartedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            ("Message", &self.message),
            ("StartRequestId", &self.start_request_id),
            ("RunId", &self.run_id),
        ];
        let fields: Vec<String> = parts
            .iter()
            .filter_map(|(name, v)| v.as_ref().map(|v| format!("{}: {}", name, v)))
            .collect();
        write!(f, "WorkflowExecutionAlreadyStartedError{{{}}}", fields.join(", "))
    }
}

impl fmt::Display for DomainNotActiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DomainNotActiveError{{Message: {}, DomainName: {}, CurrentCluster: {}, ActiveCluster: {}}}",
            self.message, self.domain_name, self.current_cluster, self.active_cluster
        )
    }
}

impl fmt::Display for LimitExceededError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LimitExceededError{{Message: {}}}", self.message)
    }
}

impl std::error::Error for BadRequestError {}
impl std::error::Error for InternalServiceError {}
impl std::error::Error for EntityNotExistsError {}
impl std::error::Error for ServiceBusyError {}
impl std::error::Error for ClientVersionNotSupportedError {}
impl std::error::Error for WorkflowExecutionAlreadyStartedError {}
impl std::error::Error for DomainNotActiveError {}
impl std::error::Error for LimitExceededError {}
