//! Entry points of the CLI subcommands.

use crate::api::{server, WorkflowStore};
use crate::client::{HttpPersistenceClient, PersistenceClient};
use crate::config::{load_seed_file, EditorConfig};
use crate::core::{
    validate_definition, InMemorySessionStore, ValidationStatus, WorkflowDefinition,
    WorkflowEditor, WorkflowId,
};
use crate::errors::Error;
use crate::host::{ConsoleHost, ModalHost};
use crate::render::TextSurface;
use crate::repl::{apply_command, flow_after_save, parse_command, EditCommand, Flow};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Input};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Runs the reference backend until it is stopped
pub async fn run_serve(
    config: &EditorConfig,
    port: Option<u16>,
    seed: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let seed = seed.or_else(|| config.server.seed.as_ref().map(PathBuf::from));
    let templates = match seed {
        Some(path) => load_seed_file(&path)?,
        None => Vec::new(),
    };
    let store = WorkflowStore::new(templates)?;
    let port = port.unwrap_or(config.server.port);
    info!("Starting workflow backend on port {}", port);
    server::launch_server(port, store).await
}

/// Derived form and validation status of a definition file
pub fn check_definition_file(path: &Path) -> Result<(String, ValidationStatus), Error> {
    let raw = std::fs::read_to_string(path)?;
    let seed: Value = serde_json::from_str(&raw)?;
    let derived = WorkflowDefinition::from_seed(&seed).derive();
    Ok((derived.to_pretty_json(), validate_definition(&derived)))
}

/// Prints the derived definition of a file; returns whether it is valid
pub fn run_validate(path: &Path) -> Result<bool, Error> {
    let (json, status) = check_definition_file(path)?;
    println!("{}", json);
    if status.is_valid() {
        println!("{}", status.to_string().green());
    } else {
        println!("{}", status.to_string().yellow());
    }
    Ok(status.is_valid())
}

fn read_line(prompt: &str) -> Result<String, Error> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| Error::IoError(std::io::Error::other(e.to_string())))
}

/// Fetches a workflow and edits it interactively until it is saved or closed
pub async fn run_edit(
    config: &EditorConfig,
    workflow_id: &str,
    base_url: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let base_url = base_url.unwrap_or_else(|| config.backend.base_url.clone());
    let client = Arc::new(HttpPersistenceClient::new(&base_url)?);
    let id = WorkflowId::new(workflow_id);
    let template = client.fetch_workflow(&id).await?;

    let (success_dismiss, error_dismiss) = config.dismiss_durations()?;
    let surface = Arc::new(TextSurface::new());
    let host = Arc::new(ConsoleHost::new(success_dismiss, error_dismiss));
    let editor = WorkflowEditor::new(
        Arc::new(InMemorySessionStore::new()),
        surface.clone(),
        host.clone(),
        client,
        config.editor_settings()?,
    );

    surface.mount(&id);
    host.open(&id);
    editor.open_session_with_details(&id, &template.definition, template.details());

    println!(
        "{}",
        format!("Editing workflow {} ({})", template.name, id).bold().cyan()
    );
    println!("{}", surface.to_text(&id));
    println!("{}", "Type 'help' for the list of commands.".dimmed());

    loop {
        let line = read_line(&format!("workflow {}", id))?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e.to_string().yellow());
                continue;
            }
        };
        debug!("Command: {:?}", command);

        let flow = if command == EditCommand::Save {
            let spinner = ConsoleHost::busy_spinner(crate::constants::SAVING_LABEL);
            let outcome = editor.save(&id).await;
            spinner.finish_and_clear();
            flow_after_save(&outcome)
        } else {
            apply_command(&editor, &id, command)
        };

        match flow {
            Flow::Continue => {}
            Flow::Show => {
                // Let a pending action-field refresh land before printing.
                tokio::time::sleep(editor.settings().refresh_debounce).await;
                println!("{}", surface.to_text(&id));
            }
            Flow::Message(message) => println!("{}", message),
            Flow::Finished => break,
        }
    }

    host.close(&id);
    surface.unmount(&id);
    Ok(())
}
