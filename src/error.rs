use thiserror::Error;

/// Errors raised while turning probe output into metadata
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A string looked like a typed literal but could not be converted
    #[error("Malformed {kind} literal: {literal:?}")]
    MalformedLiteral { kind: &'static str, literal: String },

    /// The format's creation_time tag is not a recognizable timestamp
    #[error("Invalid creation time {value:?}: {message}")]
    CreationTime { value: String, message: String },

    #[error("Failed to parse probe JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input file not found: {0}")]
    InputNotFound(String),

    /// Failure running the probe tool itself
    #[error("Probe failed: {0}")]
    Probe(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ProbeError {
    fn from(e: toml::de::Error) -> Self {
        ProbeError::Config(format!("Failed to parse config file: {}", e))
    }
}

impl From<toml::ser::Error> for ProbeError {
    fn from(e: toml::ser::Error) -> Self {
        ProbeError::Config(format!("Failed to serialize config: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
