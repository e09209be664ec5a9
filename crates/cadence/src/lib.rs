//! # Cadence
//!
//! Wire structures of the Cadence `WorkflowService`, built on `wirerpc`.
//!
//! ## Layout
//!
//! - [`shared`]: requests, responses and exception structs shared across methods.
//! - [`error`]: [`ServiceError`], the error every method fails with. Declared
//!   exceptions travel inside result unions; [`ServiceError::Other`] never does.
//! - [`workflow_service`]: one module per method, and the [`WorkflowService`] bundle of
//!   method helpers.
//!
//! ## Example
//!
//! ```
//! use cadence::shared::ListClosedWorkflowExecutionsRequest;
//! use cadence::WorkflowService;
//!
//! let service = WorkflowService::new()?;
//! let list = service.list_closed_workflow_executions;
//! let request = ListClosedWorkflowExecutionsRequest {
//!     domain: Some("samples".into()),
//!     ..Default::default()
//! };
//! let call = list.call(1, &list.args((Some(request),)))?;
//! assert_eq!(call.name, "ListClosedWorkflowExecutions");
//! # Ok::<(), wirerpc::Error>(())
//! ```

#[macro_use]
mod macros;

pub mod error;
mod json;
pub mod shared;
pub mod workflow_service;

#[cfg(test)]
mod tests;

pub use error::ServiceError;
pub use workflow_service::WorkflowService;
pub use workflow_service::SERVICE_NAME;
