//! API routes configuration module

use crate::api::handlers::{
    delete_workflow, edit_workflow, get_workflow, list_workflows, toggle_workflow,
};
use crate::api::store::WorkflowStore;
use axum::{
    routing::{get, post},
    Extension, Router,
};

/// Creates and configures the API router with all routes
///
/// # Arguments
/// * `store` - Template store shared across handlers
///
/// # Returns
/// * `Router` - Configured router with the admin workflow endpoints
pub fn app(store: WorkflowStore) -> Router {
    Router::new()
        .route("/admin/workflows", get(list_workflows))
        .route("/admin/workflows/:id", get(get_workflow))
        .route("/admin/workflows/:id/edit", post(edit_workflow))
        .route("/admin/workflows/:id/toggle", post(toggle_workflow))
        .route("/admin/workflows/:id/delete", post(delete_workflow))
        .layer(Extension(store))
}
