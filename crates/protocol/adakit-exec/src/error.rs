//! Error types for command dispatch.

use std::time::Duration;

use adakit_types::{ConfigError, ErrorCode};
use thiserror::Error;

/// Result type for dispatch.
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;

/// Errors that can occur while dispatching a command.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// No descriptor is registered under this name.
    #[error("unknown command: {name}")]
    UnknownCommand { name: String },

    /// Arguments did not satisfy the descriptor.
    #[error("invalid arguments for {command}: {}", .problems.join("; "))]
    InvalidArguments {
        command: String,
        problems: Vec<String>,
    },

    /// The network context is incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The binary exited with a non-zero status.
    #[error("{command} failed with exit code {exit_code}: {stderr}")]
    ExternalFailure {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// The binary did not finish before the deadline and was killed.
    #[error("{command} timed out after {}s", .after.as_secs())]
    Timeout { command: String, after: Duration },

    /// The binary could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the child's output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatchError {
    /// Get the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownCommand { .. } => ErrorCode::UnknownCommand,
            Self::InvalidArguments { .. } => ErrorCode::InvalidArguments,
            Self::Config(e) => e.error_code(),
            Self::ExternalFailure { .. } => ErrorCode::ExternalFailure,
            Self::Timeout { .. } => ErrorCode::Timeout,
            Self::Spawn { .. } => ErrorCode::SpawnFailed,
            Self::Io(_) => ErrorCode::InternalError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_arguments_lists_problems() {
        let err = DispatchError::InvalidArguments {
            command: "address-build".to_string(),
            problems: vec!["missing 'out_file'".to_string(), "unexpected 'x'".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("out_file"));
        assert!(msg.contains("unexpected 'x'"));
        assert_eq!(err.error_code(), ErrorCode::InvalidArguments);
    }

    #[test]
    fn test_external_failure_message() {
        let err = DispatchError::ExternalFailure {
            command: "query-tip".to_string(),
            exit_code: 1,
            stderr: "network error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "query-tip failed with exit code 1: network error"
        );
    }

    #[test]
    fn test_config_error_code_passes_through() {
        let err: DispatchError = ConfigError::MissingConfiguration {
            key: "CARDANO_NODE_SOCKET_PATH",
        }
        .into();
        assert_eq!(err.error_code(), ErrorCode::MissingConfiguration);
    }

    #[test]
    fn test_timeout_message() {
        let err = DispatchError::Timeout {
            command: "query-tip".to_string(),
            after: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "query-tip timed out after 30s");
    }
}
