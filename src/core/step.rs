use crate::constants::{MAX_DUE_DAYS, MIN_DUE_DAYS};
use crate::errors::Error;
use std::fmt;
use std::str::FromStr;

/// Declares a closed set of select options with their wire value and display label.
macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($value:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every option, in the order the select control lists them
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum!(
    /// Kind of work a step performs
    Action {
        SendNotification => ("send_notification", "Send Notification"),
        CreateTask => ("create_task", "Create Task"),
        UpdateStatus => ("update_status", "Update Status"),
        AssignUser => ("assign_user", "Assign User"),
        ConditionalApproval => ("conditional_approval", "Conditional Approval"),
    }
);

choice_enum!(
    /// Role a step is directed at
    Target {
        DepartmentManager => ("department_manager", "Department Manager"),
        ProjectManager => ("project_manager", "Project Manager"),
        BusinessAnalyst => ("business_analyst", "Business Analyst"),
        ProblemReporter => ("problem_reporter", "Problem Reporter"),
        CaseCreator => ("case_creator", "Case Creator"),
    }
);

choice_enum!(
    /// Role a created task is assigned to
    Assignee {
        BusinessAnalyst => ("business_analyst", "Business Analyst"),
        ProjectManager => ("project_manager", "Project Manager"),
        DepartmentManager => ("department_manager", "Department Manager"),
    }
);

choice_enum!(
    /// Status an `update_status` step moves the subject to
    StatusChoice {
        InProgress => ("In Progress", "In Progress"),
        OnHold => ("On Hold", "On Hold"),
        Resolved => ("Resolved", "Resolved"),
        UnderReview => ("Under Review", "Under Review"),
    }
);

/// Named step field that can be edited through `update_step_field`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepField {
    Action,
    Target,
    Template,
    Assignee,
    DueDays,
    NewStatus,
}

impl StepField {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepField::Action => "action",
            StepField::Target => "target",
            StepField::Template => "template",
            StepField::Assignee => "assignee",
            StepField::DueDays => "due_days",
            StepField::NewStatus => "new_status",
        }
    }
}

impl FromStr for StepField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "action" => Ok(StepField::Action),
            "target" => Ok(StepField::Target),
            "template" => Ok(StepField::Template),
            "assignee" => Ok(StepField::Assignee),
            "due_days" => Ok(StepField::DueDays),
            "new_status" => Ok(StepField::NewStatus),
            other => Err(Error::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for StepField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a workflow as held by the edit form.
///
/// Select values are kept as the raw strings the controls hold so that values
/// coming from a stored definition survive a session untouched, even when they
/// fall outside the options the editor offers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    pub action: String,
    pub target: String,
    pub template: String,
    pub conditions: Vec<String>,
    pub assignee: String,
    pub due_days: Option<u32>,
    pub new_status: String,
}

impl Step {
    /// The action as a known variant, if it is one
    pub fn action_kind(&self) -> Option<Action> {
        self.action.parse().ok()
    }

    /// Sets a named field from its form value
    pub fn set_field(&mut self, field: StepField, value: &str) {
        match field {
            StepField::Action => self.action = value.to_string(),
            StepField::Target => self.target = value.to_string(),
            StepField::Template => self.template = value.to_string(),
            StepField::Assignee => self.assignee = value.to_string(),
            StepField::DueDays => self.due_days = parse_due_days(value),
            StepField::NewStatus => self.new_status = value.to_string(),
        }
    }

    /// Current form value of a named field
    pub fn field_value(&self, field: StepField) -> String {
        match field {
            StepField::Action => self.action.clone(),
            StepField::Target => self.target.clone(),
            StepField::Template => self.template.clone(),
            StepField::Assignee => self.assignee.clone(),
            StepField::DueDays => self.due_days.map(|d| d.to_string()).unwrap_or_default(),
            StepField::NewStatus => self.new_status.clone(),
        }
    }
}

/// Splits a comma separated condition list, trimming pieces and dropping empty ones
pub fn parse_conditions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a `due_days` form value, clamped to the allowed range.
/// Blank or non-numeric input clears the value.
pub fn parse_due_days(raw: &str) -> Option<u32> {
    let days = raw.trim().parse::<i64>().ok()?;
    Some(days.clamp(MIN_DUE_DAYS as i64, MAX_DUE_DAYS as i64) as u32)
}
