use crate::api::errors::ApiError;
use crate::api::store::{StoreError, WorkflowStore, WorkflowUpdate};
use crate::core::{WorkflowId, WorkflowTemplate};
use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Represents the request payload for editing a workflow
#[derive(Deserialize)]
pub struct EditWorkflowRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub definition: Value,
    #[serde(default)]
    pub is_active: bool,
}

/// Response carrying a human readable message
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response of the toggle route
#[derive(Serialize)]
pub struct ToggleResponse {
    pub message: String,
    pub is_active: bool,
}

/// Lists every workflow template
pub async fn list_workflows(
    Extension(store): Extension<WorkflowStore>,
) -> Json<Vec<WorkflowTemplate>> {
    Json(store.list())
}

/// Returns one workflow template
pub async fn get_workflow(
    Extension(store): Extension<WorkflowStore>,
    Path(id): Path<String>,
) -> Result<Json<WorkflowTemplate>, ApiError> {
    store
        .get(&WorkflowId::new(id))
        .map(Json)
        .ok_or_else(|| StoreError::NotFound.into())
}

/// Replaces name, description, definition and active flag of a workflow
///
/// # Returns
/// * `Result<Json<MessageResponse>, ApiError>` - Success message or error with status
#[axum::debug_handler]
pub async fn edit_workflow(
    Extension(store): Extension<WorkflowStore>,
    Path(id): Path<String>,
    Json(payload): Json<EditWorkflowRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = WorkflowId::new(id);
    let update = WorkflowUpdate {
        name: payload.name,
        description: payload.description,
        definition: payload.definition,
        is_active: payload.is_active,
    };

    match store.update(&id, update) {
        Ok(template) => {
            info!("Updated workflow template: {}", template.name);
            Ok(Json(MessageResponse {
                message: format!("Workflow '{}' updated successfully", template.name),
            }))
        }
        Err(e) => {
            warn!("Failed to update workflow template {}: {}", id, e);
            Err(e.into())
        }
    }
}

/// Flips a workflow's active flag
pub async fn toggle_workflow(
    Extension(store): Extension<WorkflowStore>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let template = store
        .toggle(&WorkflowId::new(id))
        .map_err(ApiError::from)?;
    let status = if template.is_active {
        "activated"
    } else {
        "deactivated"
    };
    info!("Workflow template {} {}", template.name, status);

    Ok(Json(ToggleResponse {
        message: format!("Workflow '{}' {}", template.name, status),
        is_active: template.is_active,
    }))
}

/// Deletes a workflow template
pub async fn delete_workflow(
    Extension(store): Extension<WorkflowStore>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let template = store
        .delete(&WorkflowId::new(id))
        .map_err(ApiError::from)?;
    info!("Deleted workflow template: {}", template.name);

    Ok(Json(MessageResponse {
        message: format!("Workflow '{}' deleted", template.name),
    }))
}
