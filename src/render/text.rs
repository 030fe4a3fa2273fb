//! Rendering surface that keeps its elements in memory and prints them as text.
//!
//! Elements only exist after [`TextSurface::mount`] has been called for a
//! workflow, which mirrors an edit dialog being present on the page. Calls for
//! unmounted workflows are dropped.

use super::surface::{action_fields_id, element_id, RenderSurface};
use super::views::{FieldView, StepView};
use crate::constants::*;
use crate::core::session::WorkflowId;
use crate::core::validation::ValidationStatus;
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::RwLock;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    StepList(Vec<StepView>),
    FieldGroup(Vec<FieldView>),
    Text(String),
    Hidden(String),
    Status(Option<ValidationStatus>),
    Button { label: String, disabled: bool },
}

#[derive(Debug, Default)]
struct Elements {
    by_id: HashMap<String, Element>,
    renders: HashMap<String, usize>,
}

impl Elements {
    /// Replaces an existing element; returns false when the element is absent
    fn replace(&mut self, element_id: &str, element: Element) -> bool {
        match self.by_id.get_mut(element_id) {
            Some(slot) => {
                *slot = element;
                *self.renders.entry(element_id.to_string()).or_default() += 1;
                true
            }
            None => {
                trace!("Element {} missing, skipping render", element_id);
                false
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct TextSurface {
    elements: RwLock<Elements>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the elements of a workflow's edit dialog
    pub fn mount(&self, id: &WorkflowId) {
        let mut elements = self.write();
        let initial = [
            (STEPS_CONTAINER_PREFIX, Element::StepList(Vec::new())),
            (JSON_PREVIEW_PREFIX, Element::Text(String::new())),
            (HIDDEN_DEFINITION_PREFIX, Element::Hidden(String::new())),
            (VALIDATION_STATUS_PREFIX, Element::Status(None)),
            (
                SAVE_BUTTON_PREFIX,
                Element::Button {
                    label: SAVE_LABEL.to_string(),
                    disabled: false,
                },
            ),
        ];
        for (prefix, element) in initial {
            elements.by_id.insert(element_id(prefix, id), element);
        }
    }

    /// Removes every element belonging to a workflow
    pub fn unmount(&self, id: &WorkflowId) {
        let mut elements = self.write();
        for prefix in [
            STEPS_CONTAINER_PREFIX,
            JSON_PREVIEW_PREFIX,
            HIDDEN_DEFINITION_PREFIX,
            VALIDATION_STATUS_PREFIX,
            SAVE_BUTTON_PREFIX,
        ] {
            elements.by_id.remove(&element_id(prefix, id));
        }
        let step_groups = format!("{}{}_", ACTION_FIELDS_PREFIX, id);
        elements.by_id.retain(|key, _| !key.starts_with(&step_groups));
    }

    pub fn is_mounted(&self, id: &WorkflowId) -> bool {
        self.read()
            .by_id
            .contains_key(&element_id(STEPS_CONTAINER_PREFIX, id))
    }

    pub fn element(&self, element_id: &str) -> Option<Element> {
        self.read().by_id.get(element_id).cloned()
    }

    /// How many times an element has been re-rendered
    pub fn render_count(&self, element_id: &str) -> usize {
        self.read()
            .renders
            .get(element_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn steps(&self, id: &WorkflowId) -> Option<Vec<StepView>> {
        match self.element(&element_id(STEPS_CONTAINER_PREFIX, id)) {
            Some(Element::StepList(steps)) => Some(steps),
            _ => None,
        }
    }

    pub fn action_fields(&self, id: &WorkflowId, index: usize) -> Option<Vec<FieldView>> {
        match self.element(&action_fields_id(id, index)) {
            Some(Element::FieldGroup(fields)) => Some(fields),
            _ => None,
        }
    }

    pub fn preview(&self, id: &WorkflowId) -> Option<String> {
        match self.element(&element_id(JSON_PREVIEW_PREFIX, id)) {
            Some(Element::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn hidden_value(&self, id: &WorkflowId) -> Option<String> {
        match self.element(&element_id(HIDDEN_DEFINITION_PREFIX, id)) {
            Some(Element::Hidden(value)) => Some(value),
            _ => None,
        }
    }

    pub fn validation(&self, id: &WorkflowId) -> Option<ValidationStatus> {
        match self.element(&element_id(VALIDATION_STATUS_PREFIX, id)) {
            Some(Element::Status(status)) => status,
            _ => None,
        }
    }

    /// Label and disabled flag of the save control
    pub fn save_button(&self, id: &WorkflowId) -> Option<(String, bool)> {
        match self.element(&element_id(SAVE_BUTTON_PREFIX, id)) {
            Some(Element::Button { label, disabled }) => Some((label, disabled)),
            _ => None,
        }
    }

    /// Plain text rendering of a workflow's dialog
    pub fn to_text(&self, id: &WorkflowId) -> String {
        let mut out = String::new();
        let Some(steps) = self.steps(id) else {
            return out;
        };

        if steps.is_empty() {
            let _ = writeln!(out, "{}", EMPTY_STEPS_PLACEHOLDER);
        }
        for step in &steps {
            let _ = writeln!(out, "{}", step.title());
            let _ = writeln!(
                out,
                "  Action: {:<22} Target: {}",
                step.action.selected_label().unwrap_or("-"),
                step.target.selected_label().unwrap_or("-")
            );
            if !step.template.is_empty() {
                let _ = writeln!(out, "  Template: {}", step.template);
            }
            if !step.conditions.is_empty() {
                let _ = writeln!(out, "  Conditions: {}", step.conditions);
            }
            let fields = self
                .action_fields(id, step.index)
                .unwrap_or_else(|| step.action_fields.clone());
            for field in fields {
                let _ = writeln!(out, "  {}: {}", field.label, field.display_value());
            }
        }

        if let Some(status) = self.validation(id) {
            let _ = writeln!(out, "\nStatus: {}", status);
        }
        if let Some(preview) = self.preview(id) {
            let _ = writeln!(out, "\n{}", preview);
        }
        out
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Elements> {
        match self.elements.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Elements> {
        match self.elements.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl RenderSurface for TextSurface {
    fn render_steps(&self, id: &WorkflowId, steps: &[StepView]) {
        let mut elements = self.write();
        if !elements.replace(
            &element_id(STEPS_CONTAINER_PREFIX, id),
            Element::StepList(steps.to_vec()),
        ) {
            return;
        }

        // The list is redrawn from scratch, so every step gets a fresh field group.
        let stale = format!("{}{}_", ACTION_FIELDS_PREFIX, id);
        elements.by_id.retain(|key, _| !key.starts_with(&stale));
        for step in steps {
            elements.by_id.insert(
                action_fields_id(id, step.index),
                Element::FieldGroup(step.action_fields.clone()),
            );
        }
    }

    fn update_step(&self, id: &WorkflowId, index: usize, step: &StepView) {
        let mut elements = self.write();
        // Edited in place: the list itself is not redrawn.
        if let Some(Element::StepList(steps)) = elements
            .by_id
            .get_mut(&element_id(STEPS_CONTAINER_PREFIX, id))
        {
            if let Some(slot) = steps.get_mut(index) {
                *slot = step.clone();
            }
        }
    }

    fn render_action_fields(&self, id: &WorkflowId, index: usize, fields: &[FieldView]) {
        self.write().replace(
            &action_fields_id(id, index),
            Element::FieldGroup(fields.to_vec()),
        );
    }

    fn set_preview(&self, id: &WorkflowId, json: &str) {
        self.write().replace(
            &element_id(JSON_PREVIEW_PREFIX, id),
            Element::Text(json.to_string()),
        );
    }

    fn set_hidden_value(&self, id: &WorkflowId, json: &str) {
        self.write().replace(
            &element_id(HIDDEN_DEFINITION_PREFIX, id),
            Element::Hidden(json.to_string()),
        );
    }

    fn show_validation(&self, id: &WorkflowId, status: &ValidationStatus) {
        self.write().replace(
            &element_id(VALIDATION_STATUS_PREFIX, id),
            Element::Status(Some(*status)),
        );
    }

    fn set_save_busy(&self, id: &WorkflowId, busy: bool) {
        let label = if busy { SAVING_LABEL } else { SAVE_LABEL };
        self.write().replace(
            &element_id(SAVE_BUTTON_PREFIX, id),
            Element::Button {
                label: label.to_string(),
                disabled: busy,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::step::Step;
    use crate::render::views::{step_view, step_views};

    #[test]
    fn unmounted_workflow_ignores_renders() {
        let surface = TextSurface::new();
        let id = WorkflowId::from("9");
        surface.set_preview(&id, "{}");
        surface.show_validation(&id, &ValidationStatus::Valid);
        assert_eq!(surface.preview(&id), None);
        assert_eq!(surface.validation(&id), None);
        assert!(!surface.is_mounted(&id));
    }

    #[test]
    fn render_steps_recreates_field_groups() {
        let surface = TextSurface::new();
        let id = WorkflowId::from("3");
        surface.mount(&id);

        let steps = vec![
            Step {
                action: "create_task".into(),
                ..Step::default()
            },
            Step::default(),
        ];
        surface.render_steps(&id, &step_views(&steps));
        assert_eq!(surface.action_fields(&id, 0).unwrap().len(), 2);
        assert!(surface.action_fields(&id, 1).unwrap().is_empty());

        surface.render_steps(&id, &step_views(&steps[1..]));
        assert!(surface.action_fields(&id, 1).is_none());
        assert_eq!(surface.render_count("stepsContainer3"), 2);
    }

    #[test]
    fn save_button_toggles_busy_label() {
        let surface = TextSurface::new();
        let id = WorkflowId::from("5");
        surface.mount(&id);

        surface.set_save_busy(&id, true);
        assert_eq!(surface.save_button(&id), Some(("Saving...".into(), true)));
        surface.set_save_busy(&id, false);
        assert_eq!(surface.save_button(&id), Some(("Save Workflow".into(), false)));
    }

    #[test]
    fn text_output_lists_steps_and_status() {
        let surface = TextSurface::new();
        let id = WorkflowId::from("1");
        assert!(surface.to_text(&id).is_empty());

        surface.mount(&id);
        surface.render_steps(&id, &[]);
        assert!(surface.to_text(&id).contains("No steps defined."));

        let steps = vec![Step {
            action: "send_notification".into(),
            target: "problem_reporter".into(),
            template: "problem_escalation".into(),
            ..Step::default()
        }];
        surface.render_steps(&id, &step_views(&steps));
        surface.show_validation(&id, &ValidationStatus::NoTriggers);

        let text = surface.to_text(&id);
        assert!(text.contains("Step 1"));
        assert!(text.contains("Send Notification"));
        assert!(text.contains("Template: problem_escalation"));
        assert!(text.contains("Status: No triggers selected."));
    }

    #[test]
    fn update_step_replaces_one_entry_in_place() {
        let surface = TextSurface::new();
        let id = WorkflowId::from("4");
        surface.mount(&id);
        let mut steps = vec![Step::default(), Step::default()];
        surface.render_steps(&id, &step_views(&steps));

        steps[1].target = "case_creator".into();
        surface.update_step(&id, 1, &step_view(1, &steps[1]));
        surface.update_step(&id, 5, &step_view(5, &steps[1]));

        let stored = surface.steps(&id).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].target.selected_label(), None);
        assert_eq!(stored[1].target.selected_label(), Some("Case Creator"));
        assert_eq!(surface.render_count("stepsContainer4"), 1);
    }

    #[test]
    fn unmount_removes_elements() {
        let surface = TextSurface::new();
        let id = WorkflowId::from("2");
        let other = WorkflowId::from("12");
        surface.mount(&id);
        surface.mount(&other);
        surface.render_steps(&id, &step_views(&[Step::default()]));
        surface.unmount(&id);
        assert!(!surface.is_mounted(&id));
        assert!(surface.action_fields(&id, 0).is_none());
        assert!(surface.is_mounted(&other));
    }
}
