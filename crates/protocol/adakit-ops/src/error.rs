//! Error types for the operations layer.

use std::path::PathBuf;

use adakit_exec::DispatchError;
use adakit_types::{ErrorCode, ParseError, ValueError};
use thiserror::Error;

/// Result type for operations.
pub type OpsResult<T> = std::result::Result<T, OpsError>;

/// Errors that can occur during toolkit operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OpsError {
    /// Dispatching to `cardano-cli` failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// `cardano-cli` output had an unexpected shape.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A local amount or encoding was rejected.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// A file the operation reads does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Wallet files already exist and overwriting was not requested.
    #[error("wallet '{name}' already exists at {}", .path.display())]
    WalletExists { name: String, path: PathBuf },

    /// A caller-supplied value was rejected before dispatch.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OpsError {
    /// Create an invalid-input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Get the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Dispatch(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Value(e) => e.error_code(),
            Self::FileNotFound(_) => ErrorCode::NotFound,
            Self::WalletExists { .. } | Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::Io(_) => ErrorCode::InternalError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = OpsError::from(ParseError::malformed("slot", "missing field"));
        assert_eq!(err.error_code(), ErrorCode::MalformedOutput);
        assert!(err.to_string().contains("slot"));

        let err = OpsError::FileNotFound(PathBuf::from("keys/payment.addr"));
        assert_eq!(err.error_code(), ErrorCode::NotFound);
        assert_eq!(err.to_string(), "file not found: keys/payment.addr");

        let err = OpsError::from(DispatchError::UnknownCommand {
            name: "x".to_string(),
        });
        assert_eq!(err.error_code(), ErrorCode::UnknownCommand);
    }
}
