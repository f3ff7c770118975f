//! CLI error types.

use adakit_ops::OpsError;
use adakit_types::{ConfigError, ErrorCode, ValueError};
use thiserror::Error;

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error enum wrapping all crate errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Environment is missing a required value.
    #[error("{0}")]
    Env(#[from] ConfigError),

    /// Operations error.
    #[error("{0}")]
    Ops(#[from] OpsError),

    /// Amount or encoding error from a local conversion.
    #[error("{0}")]
    Value(#[from] ValueError),

    /// IO error.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// User-facing error with actionable message.
    #[error("{0}")]
    User(String),

    /// The user declined a confirmation prompt.
    #[error("Aborted")]
    Aborted,
}

impl CliError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a user-facing error.
    pub fn user(msg: impl Into<String>) -> Self {
        Self::User(msg.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) | Self::Aborted => 1,
            Self::Config(_) => 3,
            Self::Io(_) => 9,
            Self::Json(_) | Self::Toml(_) => 10,
            Self::Env(_) | Self::Ops(_) | Self::Value(_) => exit_code_for(self.error_code()),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Env(e) => e.error_code(),
            Self::Ops(e) => e.error_code(),
            Self::Value(e) => e.error_code(),
            Self::Config(_) | Self::Toml(_) | Self::User(_) | Self::Aborted => {
                ErrorCode::InvalidInput
            }
            Self::Io(_) | Self::Json(_) => ErrorCode::InternalError,
        }
    }
}

/// Process exit code for an error code.
///
/// 1 usage, 2 not found, 3 configuration, 4 malformed output,
/// 5 external failure, 6 timeout, 7 amount/encoding, 9 internal.
pub fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::UnknownCommand | ErrorCode::InvalidArguments | ErrorCode::InvalidInput => 1,
        ErrorCode::NotFound => 2,
        ErrorCode::MissingConfiguration => 3,
        ErrorCode::MalformedOutput => 4,
        ErrorCode::ExternalFailure | ErrorCode::SpawnFailed => 5,
        ErrorCode::Timeout => 6,
        ErrorCode::InvalidAmount | ErrorCode::InvalidEncoding => 7,
        _ => 9,
    }
}
