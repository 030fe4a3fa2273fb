use crate::core::action_fields::{displayed_value, fields_for_action, FieldDescriptor, FieldKind};
use crate::core::step::{Action, Step, StepField, Target};

/// One option of a select control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A select control together with its options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView {
    pub placeholder: String,
    pub options: Vec<OptionView>,
}

impl SelectView {
    fn build<'a>(
        placeholder: &str,
        options: impl Iterator<Item = (&'a str, &'a str)>,
        current: &str,
    ) -> Self {
        SelectView {
            placeholder: placeholder.to_string(),
            options: options
                .map(|(value, label)| OptionView {
                    value: value.to_string(),
                    label: label.to_string(),
                    selected: value == current,
                })
                .collect(),
        }
    }

    /// Label of the selected option, if any option is selected
    pub fn selected_label(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.selected)
            .map(|o| o.label.as_str())
    }
}

/// Rendered control of an action-specific field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldControl {
    Select(SelectView),
    Number { value: String, min: u32, max: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: StepField,
    pub label: String,
    pub control: FieldControl,
}

impl FieldView {
    fn from_descriptor(descriptor: &FieldDescriptor, step: &Step) -> Self {
        let current = displayed_value(descriptor, step);
        let control = match &descriptor.kind {
            FieldKind::Select {
                placeholder,
                options,
            } => FieldControl::Select(SelectView::build(
                placeholder,
                options.iter().copied(),
                &current,
            )),
            FieldKind::Number { min, max, .. } => FieldControl::Number {
                value: current,
                min: *min,
                max: *max,
            },
        };
        FieldView {
            field: descriptor.field,
            label: descriptor.label.to_string(),
            control,
        }
    }

    /// Text the control currently shows
    pub fn display_value(&self) -> String {
        match &self.control {
            FieldControl::Select(select) => select.selected_label().unwrap_or("").to_string(),
            FieldControl::Number { value, .. } => value.clone(),
        }
    }
}

/// Everything needed to draw one step of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub index: usize,
    pub action: SelectView,
    pub target: SelectView,
    pub template: String,
    /// Conditions joined back into the comma separated form the input edits
    pub conditions: String,
    pub action_fields: Vec<FieldView>,
}

impl StepView {
    /// 1-based number shown in the step heading
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn title(&self) -> String {
        format!("Step {}", self.number())
    }
}

/// Action-specific field group for a step
pub fn action_field_views(step: &Step) -> Vec<FieldView> {
    fields_for_action(step.action_kind())
        .iter()
        .map(|descriptor| FieldView::from_descriptor(descriptor, step))
        .collect()
}

pub fn step_view(index: usize, step: &Step) -> StepView {
    StepView {
        index,
        action: SelectView::build(
            "Select Action",
            Action::ALL.iter().map(|a| (a.as_str(), a.label())),
            &step.action,
        ),
        target: SelectView::build(
            "Select Target",
            Target::ALL.iter().map(|t| (t.as_str(), t.label())),
            &step.target,
        ),
        template: step.template.clone(),
        conditions: step.conditions.join(", "),
        action_fields: action_field_views(step),
    }
}

pub fn step_views(steps: &[Step]) -> Vec<StepView> {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| step_view(index, step))
        .collect()
}
