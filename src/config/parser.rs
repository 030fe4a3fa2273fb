use super::EditorConfig;
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::core::WorkflowTemplate;
use crate::errors::Error;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Default location of the configuration file, under the user's config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Loads the editor configuration from a TOML file
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file; when `None` the default location is
///   used if it exists, otherwise defaults apply
///
/// # Errors
///
/// Returns an error if:
/// * An explicitly given file cannot be read
/// * The TOML content cannot be parsed into an EditorConfig
pub fn load_config(file_path: Option<&Path>) -> Result<EditorConfig, Error> {
    let path = match file_path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => path,
            None => {
                debug!("No configuration file found, using defaults");
                return Ok(EditorConfig::default());
            }
        },
    };

    let toml_str = fs::read_to_string(&path)?;
    let config: EditorConfig = toml::from_str(&toml_str)?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Loads the templates a reference server starts with from a YAML file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a list of templates
pub fn load_seed_file(file_path: &Path) -> Result<Vec<WorkflowTemplate>, Error> {
    let yaml_str = fs::read_to_string(file_path)?;
    let templates: Vec<WorkflowTemplate> = serde_yaml::from_str(&yaml_str)?;
    info!(
        "Loaded {} workflow template(s) from {}",
        templates.len(),
        file_path.display()
    );
    Ok(templates)
}
