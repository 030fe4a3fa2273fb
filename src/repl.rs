//! Line commands of the interactive edit session.

use crate::core::{SaveOutcome, StepField, WorkflowDetails, WorkflowEditor, WorkflowId};
use std::fmt;

pub const HELP: &str = "\
Commands:
  add                          append an empty step
  remove <n>                   remove step n
  set <n> <field> <value>      set action, target, template, assignee, due_days or new_status
  conditions <n> <a, b, ...>   set step conditions (comma separated)
  triggers <a,b,...>           select triggers (empty clears them)
  name <text>                  set the workflow name
  description <text>           set the workflow description
  active <on|off>              set whether the workflow is active
  show                         print the workflow
  validate                     check the workflow
  save                         save and close
  quit                         close without saving
  help                         show this help";

/// One parsed line of input. Step numbers are 1-based as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Add,
    Remove(usize),
    Set {
        step: usize,
        field: StepField,
        value: String,
    },
    Conditions {
        step: usize,
        raw: String,
    },
    Triggers(Vec<String>),
    Name(String),
    Description(String),
    Active(bool),
    Show,
    Validate,
    Save,
    Quit,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseError {}

fn step_number(raw: Option<&str>, usage: &str) -> Result<usize, ParseError> {
    raw.and_then(|n| n.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| ParseError(format!("Usage: {}", usage)))
}

/// Parses one input line
pub fn parse_command(line: &str) -> Result<EditCommand, ParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "add" => Ok(EditCommand::Add),
        "remove" | "rm" => Ok(EditCommand::Remove(step_number(
            Some(rest),
            "remove <n>",
        )?)),
        "set" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            let step = step_number(parts.next(), "set <n> <field> <value>")?;
            let field = parts
                .next()
                .ok_or_else(|| ParseError("Usage: set <n> <field> <value>".into()))?
                .parse::<StepField>()
                .map_err(|e| ParseError(e.to_string()))?;
            let value = parts.next().unwrap_or("").trim().to_string();
            Ok(EditCommand::Set { step, field, value })
        }
        "conditions" => {
            let (n, raw) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let step = step_number(Some(n), "conditions <n> <a, b, ...>")?;
            Ok(EditCommand::Conditions {
                step,
                raw: raw.to_string(),
            })
        }
        "triggers" => Ok(EditCommand::Triggers(
            rest.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        "name" => Ok(EditCommand::Name(rest.to_string())),
        "description" => Ok(EditCommand::Description(rest.to_string())),
        "active" => match rest {
            "on" | "yes" | "true" => Ok(EditCommand::Active(true)),
            "off" | "no" | "false" => Ok(EditCommand::Active(false)),
            _ => Err(ParseError("Usage: active <on|off>".into())),
        },
        "show" | "" => Ok(EditCommand::Show),
        "validate" => Ok(EditCommand::Validate),
        "save" => Ok(EditCommand::Save),
        "quit" | "exit" | "close" => Ok(EditCommand::Quit),
        "help" | "?" => Ok(EditCommand::Help),
        other => Err(ParseError(format!(
            "Unknown command '{}', type 'help' for a list",
            other
        ))),
    }
}

/// What the session loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Print the dialog
    Show,
    Message(String),
    /// Session ended, either saved or discarded
    Finished,
}

/// Applies a command that does not need the network to the editor.
/// `Save` is left to the caller, which owns the busy indicator.
pub fn apply_command(editor: &WorkflowEditor, id: &WorkflowId, command: EditCommand) -> Flow {
    let missing = |step: usize| Flow::Message(format!("There is no step {}", step));

    match command {
        EditCommand::Add => {
            editor.add_step(id);
            Flow::Show
        }
        EditCommand::Remove(step) => {
            if editor.remove_step(id, index_of(step)) {
                Flow::Show
            } else {
                missing(step)
            }
        }
        EditCommand::Set { step, field, value } => {
            if editor.update_step_field(id, index_of(step), field, &value) {
                Flow::Continue
            } else {
                missing(step)
            }
        }
        EditCommand::Conditions { step, raw } => {
            if editor.update_step_conditions(id, index_of(step), &raw) {
                Flow::Continue
            } else {
                missing(step)
            }
        }
        EditCommand::Triggers(triggers) => {
            editor.set_triggers(id, triggers);
            Flow::Continue
        }
        EditCommand::Name(name) => update_details(editor, id, |d| d.name = name),
        EditCommand::Description(description) => {
            update_details(editor, id, |d| d.description = description)
        }
        EditCommand::Active(active) => update_details(editor, id, |d| d.is_active = active),
        EditCommand::Show => Flow::Show,
        EditCommand::Validate => match editor.validation_status(id) {
            Some(status) => Flow::Message(status.to_string()),
            None => Flow::Message("Nothing to validate".into()),
        },
        EditCommand::Save => Flow::Continue,
        EditCommand::Quit => {
            editor.close_session(id);
            Flow::Finished
        }
        EditCommand::Help => Flow::Message(HELP.to_string()),
    }
}

/// Index of a 1-based step number; 0 maps past any step so it stays a no-op
fn index_of(step: usize) -> usize {
    step.checked_sub(1).unwrap_or(usize::MAX)
}

fn update_details<F>(editor: &WorkflowEditor, id: &WorkflowId, change: F) -> Flow
where
    F: FnOnce(&mut WorkflowDetails),
{
    let Some(session) = editor.session(id) else {
        return Flow::Message("No open session".into());
    };
    let mut details = session.details;
    change(&mut details);
    editor.update_details(id, details);
    Flow::Continue
}

/// Loop flow after a save attempt
pub fn flow_after_save(outcome: &SaveOutcome) -> Flow {
    match outcome {
        SaveOutcome::Saved { .. } => Flow::Finished,
        _ => Flow::Continue,
    }
}
