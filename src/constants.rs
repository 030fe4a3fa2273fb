/// Element id prefixes; the rendered element id is the prefix followed by the workflow id
pub const STEPS_CONTAINER_PREFIX: &str = "stepsContainer";
pub const ACTION_FIELDS_PREFIX: &str = "actionFields";
pub const JSON_PREVIEW_PREFIX: &str = "jsonPreview";
pub const HIDDEN_DEFINITION_PREFIX: &str = "template_content";
pub const VALIDATION_STATUS_PREFIX: &str = "validationStatus";
pub const SAVE_BUTTON_PREFIX: &str = "saveWorkflowBtn";
pub const EDIT_MODAL_PREFIX: &str = "editWorkflowModal";

/// Placeholder shown in the steps container when a workflow has no steps
pub const EMPTY_STEPS_PLACEHOLDER: &str = "No steps defined. Click \"Add Step\" to create one.";

pub const NO_TRIGGERS_MESSAGE: &str = "No triggers selected.";
pub const NO_STEPS_MESSAGE: &str = "No steps defined.";
pub const INCOMPLETE_STEPS_MESSAGE: &str = "Some steps are incomplete.";
pub const VALID_MESSAGE: &str = "Workflow is valid.";

pub const NO_DATA_TO_SAVE_MESSAGE: &str = "No workflow data to save";
pub const FIX_VALIDATION_MESSAGE: &str = "Please fix validation errors before saving";
pub const SAVE_SUCCESS_MESSAGE: &str = "Workflow saved successfully!";
pub const SAVE_FAILURE_PREFIX: &str = "Failed to save workflow";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Label shown on the save control while a save request is in flight
pub const SAVING_LABEL: &str = "Saving...";
pub const SAVE_LABEL: &str = "Save Workflow";

/// Default value displayed for `due_days` when the step does not set one
pub const DEFAULT_DUE_DAYS: u32 = 3;
pub const MIN_DUE_DAYS: u32 = 1;
pub const MAX_DUE_DAYS: u32 = 30;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_SERVER_PORT: u16 = 5000;
pub const DEFAULT_REFRESH_DEBOUNCE: &str = "100ms";
pub const DEFAULT_RELOAD_DELAY: &str = "1s";
pub const DEFAULT_SUCCESS_DISMISS: &str = "3s";
pub const DEFAULT_ERROR_DISMISS: &str = "5s";

pub const BASE_URL_ENV: &str = "WORKFLOW_EDITOR_BASE_URL";
pub const CONFIG_DIR_NAME: &str = "workflow-editor";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// JSON schema enforced by the reference backend on submitted definitions
pub const DEFINITION_SCHEMA: &str = r#"{
  "type": "object",
  "required": ["triggers", "steps"],
  "properties": {
    "triggers": { "type": "array", "items": { "type": "string" } },
    "steps": {
      "type": "array",
      "items": {
        "type": "object",
        "required": ["action"],
        "properties": {
          "action": { "type": "string", "minLength": 1 },
          "target": { "type": "string" },
          "template": { "type": "string" },
          "assignee": { "type": "string" },
          "due_days": { "type": "integer", "minimum": 1, "maximum": 30 },
          "new_status": { "type": "string" },
          "conditions": { "type": "array", "items": { "type": "string" } }
        }
      }
    }
  }
}"#;
