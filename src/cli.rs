use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line interface for the application
#[derive(Parser)]
#[command(name = "workflow-editor", version, about = "Edit and validate workflow definitions")]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "warn"
    #[arg(long, default_value_t = String::from("warn"), global = true)]
    pub logging_level: String,

    /// Also write logs to daily rotating files in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the reference workflow backend
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
        /// YAML file with the templates to serve
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Open an interactive edit session for a stored workflow
    Edit {
        /// Identifier of the workflow template
        workflow_id: String,
        /// Backend root URL (defaults to the configured URL)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Check a workflow definition file and print its derived form
    Validate {
        /// JSON file holding a workflow definition
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edit_with_global_flags() {
        let cli = Cli::try_parse_from([
            "workflow-editor",
            "edit",
            "12",
            "--base-url",
            "http://localhost:8080",
            "--logging-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.logging_level, "debug");
        match cli.command {
            Command::Edit {
                workflow_id,
                base_url,
            } => {
                assert_eq!(workflow_id, "12");
                assert_eq!(base_url.as_deref(), Some("http://localhost:8080"));
            }
            _ => panic!("expected edit command"),
        }
    }

    #[test]
    fn serve_port_is_optional() {
        let cli = Cli::try_parse_from(["workflow-editor", "serve"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Serve {
                port: None,
                seed: None
            }
        ));
    }
}
