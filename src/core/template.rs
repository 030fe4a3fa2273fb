use super::definition::{DerivedDefinition, WorkflowDefinition};
use super::session::{WorkflowDetails, WorkflowId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stored workflow template as the backend returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    pub id: WorkflowId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Definition exactly as stored; may predate the current editor
    #[serde(default)]
    pub definition: Value,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl WorkflowTemplate {
    pub fn details(&self) -> WorkflowDetails {
        WorkflowDetails {
            name: self.name.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
        }
    }

    /// The stored definition in the sparse form the editor would emit for it
    pub fn derived_definition(&self) -> DerivedDefinition {
        WorkflowDefinition::from_seed(&self.definition).derive()
    }
}

/// Body of `POST /admin/workflows/{id}/edit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub definition: DerivedDefinition,
    #[serde(default)]
    pub is_active: bool,
}

/// Success body of a save; `message` is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Failure body returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}
