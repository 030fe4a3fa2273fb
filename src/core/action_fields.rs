use super::step::{Action, Assignee, StatusChoice, Step, StepField};
use crate::constants::{DEFAULT_DUE_DAYS, MAX_DUE_DAYS, MIN_DUE_DAYS};

/// Input control used for an action-specific field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Select control; options are `(value, label)` pairs
    Select {
        placeholder: &'static str,
        options: Vec<(&'static str, &'static str)>,
    },
    /// Integer input with bounds and the value shown when unset
    Number { min: u32, max: u32, default: u32 },
}

/// Describes one extra field a step shows for its action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: StepField,
    pub label: &'static str,
    pub kind: FieldKind,
}

/// Returns the extra fields an action needs. Adding an action type only touches this table.
pub fn fields_for_action(action: Option<Action>) -> Vec<FieldDescriptor> {
    match action {
        Some(Action::CreateTask) => vec![
            FieldDescriptor {
                field: StepField::Assignee,
                label: "Assignee",
                kind: FieldKind::Select {
                    placeholder: "Select Assignee",
                    options: Assignee::ALL.iter().map(|a| (a.as_str(), a.label())).collect(),
                },
            },
            FieldDescriptor {
                field: StepField::DueDays,
                label: "Due Days",
                kind: FieldKind::Number {
                    min: MIN_DUE_DAYS,
                    max: MAX_DUE_DAYS,
                    default: DEFAULT_DUE_DAYS,
                },
            },
        ],
        Some(Action::UpdateStatus) => vec![FieldDescriptor {
            field: StepField::NewStatus,
            label: "New Status",
            kind: FieldKind::Select {
                placeholder: "Select Status",
                options: StatusChoice::ALL
                    .iter()
                    .map(|s| (s.as_str(), s.label()))
                    .collect(),
            },
        }],
        Some(Action::SendNotification)
        | Some(Action::AssignUser)
        | Some(Action::ConditionalApproval)
        | None => Vec::new(),
    }
}

/// Value a field control displays for a step, falling back to the number default
pub fn displayed_value(descriptor: &FieldDescriptor, step: &Step) -> String {
    let value = step.field_value(descriptor.field);
    match &descriptor.kind {
        FieldKind::Number { default, .. } if value.is_empty() => default.to_string(),
        _ => value,
    }
}
