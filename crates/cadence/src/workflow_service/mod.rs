//! # WorkflowService
//!
//! The method family of the workflow frontend. Each submodule holds one method: its
//! schema, its args struct, and its result union.
//!
//! [`WorkflowService`] registers every method once and hands out the helper bundles;
//! build it at startup and share it (it is `Send + Sync` and cheap to clone).

pub mod list_closed_workflow_executions;
pub mod signal_workflow_execution;
pub mod start_workflow_execution;

use tracing::debug;
use wirerpc::MethodHelper;
use wirerpc::ServiceRegistry;

pub use list_closed_workflow_executions::ListClosedWorkflowExecutions;
pub use list_closed_workflow_executions::ListClosedWorkflowExecutionsArgs;
pub use list_closed_workflow_executions::ListClosedWorkflowExecutionsResult;
pub use signal_workflow_execution::SignalWorkflowExecution;
pub use signal_workflow_execution::SignalWorkflowExecutionArgs;
pub use signal_workflow_execution::SignalWorkflowExecutionResult;
pub use start_workflow_execution::StartWorkflowExecution;
pub use start_workflow_execution::StartWorkflowExecutionArgs;
pub use start_workflow_execution::StartWorkflowExecutionResult;

pub const SERVICE_NAME: &str = "WorkflowService";

/// The helper bundles of every `WorkflowService` method.
#[derive(Debug, Clone)]
pub struct WorkflowService {
    registry: ServiceRegistry,
    pub list_closed_workflow_executions: MethodHelper<ListClosedWorkflowExecutions>,
    pub start_workflow_execution: MethodHelper<StartWorkflowExecution>,
    pub signal_workflow_execution: MethodHelper<SignalWorkflowExecution>,
}

impl WorkflowService {
    /// Validates every method schema and builds the helpers.
    pub fn new() -> wirerpc::Result<Self> {
        let mut registry = ServiceRegistry::new(SERVICE_NAME);
        let list_closed_workflow_executions = registry.register::<ListClosedWorkflowExecutions>()?;
        let start_workflow_execution = registry.register::<StartWorkflowExecution>()?;
        let signal_workflow_execution = registry.register::<SignalWorkflowExecution>()?;
        debug!(service = SERVICE_NAME, methods = registry.methods().count(), "service helpers ready");
        Ok(Self {
            registry,
            list_closed_workflow_executions,
            start_workflow_execution,
            signal_workflow_execution,
        })
    }

    /// The registered methods, for routing incoming envelopes.
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }
}
