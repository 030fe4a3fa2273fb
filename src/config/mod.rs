mod parser;
use crate::constants::*;
use crate::core::EditorSettings;
use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use parser::{default_config_path, load_config, load_seed_file};

/// Main configuration of the editor and the reference backend
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct EditorConfig {
    /// Backend connection settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Editor timings
    #[serde(default)]
    pub editor: TimingConfig,
    /// Notification banner settings
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Reference server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Where the editor sends its requests
#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct BackendConfig {
    /// Root URL of the application backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Editor timings, written as human readable durations ("100ms", "1s")
#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct TimingConfig {
    /// Quiet period before action-specific fields are redrawn
    #[serde(default = "default_refresh_debounce")]
    pub refresh_debounce: String,
    /// Delay between a successful save and the reload
    #[serde(default = "default_reload_delay")]
    pub reload_delay: String,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            refresh_debounce: default_refresh_debounce(),
            reload_delay: default_reload_delay(),
        }
    }
}

/// How long banners stay visible
#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct NotificationConfig {
    #[serde(default = "default_success_dismiss")]
    pub success_dismiss: String,
    #[serde(default = "default_error_dismiss")]
    pub error_dismiss: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            success_dismiss: default_success_dismiss(),
            error_dismiss: default_error_dismiss(),
        }
    }
}

/// Reference backend settings
#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct ServerConfig {
    /// Port the server listens on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Optional YAML file with the templates to start with
    #[serde(default)]
    pub seed: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            seed: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_refresh_debounce() -> String {
    DEFAULT_REFRESH_DEBOUNCE.to_string()
}

fn default_reload_delay() -> String {
    DEFAULT_RELOAD_DELAY.to_string()
}

fn default_success_dismiss() -> String {
    DEFAULT_SUCCESS_DISMISS.to_string()
}

fn default_error_dismiss() -> String {
    DEFAULT_ERROR_DISMISS.to_string()
}

fn default_port() -> u16 {
    DEFAULT_SERVER_PORT
}

/// Parses a humantime duration such as "100ms" or "1s"
pub fn parse_duration(value: &str) -> Result<Duration, Error> {
    humantime::parse_duration(value.trim()).map_err(|source| Error::DurationError {
        value: value.to_string(),
        source,
    })
}

impl EditorConfig {
    /// Timings for [`WorkflowEditor`](crate::core::WorkflowEditor)
    pub fn editor_settings(&self) -> Result<EditorSettings, Error> {
        Ok(EditorSettings {
            refresh_debounce: parse_duration(&self.editor.refresh_debounce)?,
            reload_delay: parse_duration(&self.editor.reload_delay)?,
        })
    }

    /// Success and error banner lifetimes
    pub fn dismiss_durations(&self) -> Result<(Duration, Duration), Error> {
        Ok((
            parse_duration(&self.notifications.success_dismiss)?,
            parse_duration(&self.notifications.error_dismiss)?,
        ))
    }

    /// Applies environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.backend.base_url = base_url;
            }
        }
    }
}
