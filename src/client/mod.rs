//! Calls to the workflow backend.

mod http;

use crate::core::session::WorkflowId;
use crate::core::template::{SaveRequest, SaveResponse, WorkflowTemplate};
use crate::errors::Error;
use async_trait::async_trait;

pub use http::HttpPersistenceClient;

/// Backend the editor persists workflows to
#[async_trait]
pub trait PersistenceClient: std::fmt::Debug + Send + Sync {
    /// Saves a workflow. A non-2xx answer is returned as [`Error::RequestFailed`]
    /// carrying the best message available.
    async fn save_workflow(
        &self,
        id: &WorkflowId,
        request: &SaveRequest,
    ) -> Result<SaveResponse, Error>;

    /// Loads one stored workflow
    async fn fetch_workflow(&self, id: &WorkflowId) -> Result<WorkflowTemplate, Error>;

    /// Loads every stored workflow
    async fn list_workflows(&self) -> Result<Vec<WorkflowTemplate>, Error>;
}
