use super::definition::DerivedDefinition;
use crate::constants::{
    INCOMPLETE_STEPS_MESSAGE, NO_STEPS_MESSAGE, NO_TRIGGERS_MESSAGE, VALID_MESSAGE,
};
use std::fmt;

/// Outcome of checking a derived definition, in the order the checks run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    NoTriggers,
    NoSteps,
    IncompleteSteps,
    Valid,
}

impl ValidationStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationStatus::Valid)
    }

    pub fn message(&self) -> &'static str {
        match self {
            ValidationStatus::NoTriggers => NO_TRIGGERS_MESSAGE,
            ValidationStatus::NoSteps => NO_STEPS_MESSAGE,
            ValidationStatus::IncompleteSteps => INCOMPLETE_STEPS_MESSAGE,
            ValidationStatus::Valid => VALID_MESSAGE,
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Checks a derived definition. The first failing check decides the status.
pub fn validate_definition(definition: &DerivedDefinition) -> ValidationStatus {
    if definition.triggers.is_empty() {
        return ValidationStatus::NoTriggers;
    }
    if definition.steps.is_empty() {
        return ValidationStatus::NoSteps;
    }
    if definition.steps.iter().any(|step| !step.is_complete()) {
        return ValidationStatus::IncompleteSteps;
    }
    ValidationStatus::Valid
}
