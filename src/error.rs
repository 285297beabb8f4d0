use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("{case} failed: Expected {expected}, but got {actual}")]
    Mismatch {
        case: String,
        expected: String,
        actual: String,
    },

    #[error("Property {property} does not hold: {counterexample}")]
    PropertyViolated {
        property: String,
        counterexample: String,
    },

    #[error("{failed} of {total} cases failed")]
    RunFailed { failed: usize, total: usize },

    #[error("Unknown case: {0}")]
    UnknownCase(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),
}

impl HarnessError {
    /// Short machine-readable kind, used as a tracing field.
    pub fn kind(&self) -> &'static str {
        match self {
            HarnessError::Mismatch { .. } => "mismatch",
            HarnessError::PropertyViolated { .. } => "property",
            HarnessError::RunFailed { .. } => "run_failed",
            HarnessError::UnknownCase(_) => "unknown_case",
            HarnessError::Validation(_) => "validation",
            HarnessError::Config(_) => "config",
            HarnessError::Io(_) => "io",
            HarnessError::Serialization(_) => "serialization",
            HarnessError::TomlSerialization(_) => "toml",
        }
    }

    /// Structured record of an error the binary is about to report on stderr.
    pub fn log(&self) {
        debug!(error = %self, kind = self.kind(), "Harness error");
    }
}

pub type HarnessResult<T> = Result<T, HarnessError>;
