use std::io::Error as IoError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] IoError),
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("Invalid duration '{value}': {source}")]
    DurationError {
        value: String,
        source: humantime::DurationError,
    },
    #[error("Schema error: {0}")]
    SchemaError(String),
    #[error("Unknown step field '{0}'")]
    UnknownField(String),
    #[error("Workflow {0} not found")]
    WorkflowNotFound(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
}

impl<'a> From<jsonschema::ValidationError<'a>> for Error {
    fn from(err: jsonschema::ValidationError<'a>) -> Self {
        Error::SchemaError(err.to_string())
    }
}
