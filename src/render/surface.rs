use super::views::{FieldView, StepView};
use crate::constants::ACTION_FIELDS_PREFIX;
use crate::core::session::WorkflowId;
use crate::core::validation::ValidationStatus;

/// Target the editor draws its sessions onto.
///
/// Elements are addressed by a fixed prefix plus the workflow id. An
/// implementation that has no element for an address must ignore the call.
pub trait RenderSurface: Send + Sync {
    /// Replaces the whole step list of a workflow
    fn render_steps(&self, id: &WorkflowId, steps: &[StepView]);

    /// Brings one step's controls in line with an edit made without redrawing the list.
    ///
    /// Controls that keep their own input, such as form fields on a page, need
    /// nothing here.
    fn update_step(&self, _id: &WorkflowId, _index: usize, _step: &StepView) {}

    /// Replaces the action-specific field group of one step
    fn render_action_fields(&self, id: &WorkflowId, index: usize, fields: &[FieldView]);

    /// Sets the human readable JSON preview
    fn set_preview(&self, id: &WorkflowId, json: &str);

    /// Sets the hidden field holding the JSON that gets persisted
    fn set_hidden_value(&self, id: &WorkflowId, json: &str);

    fn show_validation(&self, id: &WorkflowId, status: &ValidationStatus);

    /// Disables and relabels the save control while a save is in flight
    fn set_save_busy(&self, id: &WorkflowId, busy: bool);
}

/// Element id built from a prefix and a workflow id
pub fn element_id(prefix: &str, id: &WorkflowId) -> String {
    format!("{}{}", prefix, id)
}

/// Element id of one step's action-specific field group
pub fn action_fields_id(id: &WorkflowId, index: usize) -> String {
    format!("{}{}_{}", ACTION_FIELDS_PREFIX, id, index)
}
