//! Error types for adakit.
//!
//! [`ErrorCode`] is the stable, user-facing classification shared by every
//! crate in the workspace. The error enums defined here cover the failures
//! that can happen without touching a process: missing configuration,
//! malformed `cardano-cli` output, and bad local values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error classification.
///
/// Every error type in the workspace maps onto one of these codes so the
/// CLI can print a code, a hint and pick an exit status uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorCode {
    // =========================================================================
    // Configuration
    // =========================================================================
    /// A required environment value is absent
    MissingConfiguration,

    // =========================================================================
    // Dispatch
    // =========================================================================
    /// No command descriptor with the requested name
    UnknownCommand,
    /// Arguments do not satisfy the command descriptor
    InvalidArguments,
    /// The external binary exited with a non-zero status
    ExternalFailure,
    /// The external binary could not be started
    SpawnFailed,
    /// The external binary did not finish in time
    Timeout,

    // =========================================================================
    // Output
    // =========================================================================
    /// External output did not have the expected shape
    MalformedOutput,

    // =========================================================================
    // Local values
    // =========================================================================
    /// Amount is negative or not a well-formed number
    InvalidAmount,
    /// Hex input is malformed or does not decode to UTF-8
    InvalidEncoding,
    /// Caller-supplied value rejected before dispatch
    InvalidInput,
    /// A file the operation depends on does not exist
    NotFound,

    /// Anything else (I/O, serialization)
    InternalError,
}

impl ErrorCode {
    /// Get a short recovery hint for this error code.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MissingConfiguration => Some(
                "Export CARDANO_NODE_SOCKET_PATH pointing at your node socket, e.g. $HOME/cardano/db/node.socket.",
            ),
            Self::UnknownCommand => Some("Run 'adakit --help' to list the available commands."),
            Self::InvalidArguments => Some("Check the command's arguments with '--help'."),
            Self::ExternalFailure => Some(
                "cardano-cli reported an error. Check that the node is running and synced ('adakit check-sync').",
            ),
            Self::SpawnFailed => Some(
                "Could not start cardano-cli. Install it or set [cli] path in the config file.",
            ),
            Self::Timeout => Some("The node did not answer in time. Raise --timeout or check the node."),
            Self::MalformedOutput => Some(
                "Unexpected cardano-cli output. Your cardano-cli version may not be supported.",
            ),
            Self::InvalidAmount => Some("Amounts must be non-negative numbers, e.g. 1.5 or 1500000."),
            Self::InvalidEncoding => Some("Hex must have an even length and use only 0-9 and a-f."),
            Self::InvalidInput => None,
            Self::NotFound => Some("Run 'adakit init' to create the working directory layout."),
            Self::InternalError => None,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::MissingConfiguration => write!(f, "MISSING_CONFIGURATION"),
            ErrorCode::UnknownCommand => write!(f, "UNKNOWN_COMMAND"),
            ErrorCode::InvalidArguments => write!(f, "INVALID_ARGUMENTS"),
            ErrorCode::ExternalFailure => write!(f, "EXTERNAL_FAILURE"),
            ErrorCode::SpawnFailed => write!(f, "SPAWN_FAILED"),
            ErrorCode::Timeout => write!(f, "TIMEOUT"),
            ErrorCode::MalformedOutput => write!(f, "MALFORMED_OUTPUT"),
            ErrorCode::InvalidAmount => write!(f, "INVALID_AMOUNT"),
            ErrorCode::InvalidEncoding => write!(f, "INVALID_ENCODING"),
            ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// A required configuration value could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The named environment key is unset or empty.
    #[error("missing configuration: {key} is not set")]
    MissingConfiguration {
        /// Name of the missing key.
        key: &'static str,
    },
}

impl ConfigError {
    /// Get the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingConfiguration { .. } => ErrorCode::MissingConfiguration,
        }
    }
}

/// Result type for output parsing.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// External output did not match the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The named field is missing or has the wrong type.
    #[error("malformed output: field '{field}': {reason}")]
    MalformedOutput {
        /// Field that failed, `<root>` when the document itself is unusable.
        field: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl ParseError {
    /// Create a malformed-output error.
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedOutput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            Self::MalformedOutput { field, .. } => field,
        }
    }

    /// Get the error code.
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::MalformedOutput
    }
}

/// Result type for local value conversion.
pub type ValueResult<T> = std::result::Result<T, ValueError>;

/// A local value failed validation in the unit converter or hex codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValueError {
    /// Amount is negative, malformed, or out of range.
    #[error("invalid amount '{input}': {reason}")]
    InvalidAmount {
        /// Input as given.
        input: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Hex text is malformed or its bytes are not UTF-8.
    #[error("invalid encoding: {reason}")]
    InvalidEncoding {
        /// Why it was rejected.
        reason: String,
    },
}

impl ValueError {
    /// Create an invalid-amount error.
    pub fn invalid_amount(input: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidAmount {
            input: input.into(),
            reason,
        }
    }

    /// Create an invalid-encoding error.
    pub fn invalid_encoding(reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            reason: reason.into(),
        }
    }

    /// Get the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidAmount { .. } => ErrorCode::InvalidAmount,
            Self::InvalidEncoding { .. } => ErrorCode::InvalidEncoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(
            ErrorCode::MissingConfiguration.to_string(),
            "MISSING_CONFIGURATION"
        );
        assert_eq!(ErrorCode::ExternalFailure.to_string(), "EXTERNAL_FAILURE");
    }

    #[test]
    fn test_missing_configuration_names_key() {
        let err = ConfigError::MissingConfiguration {
            key: "CARDANO_NODE_SOCKET_PATH",
        };
        assert!(err.to_string().contains("CARDANO_NODE_SOCKET_PATH"));
        assert_eq!(err.error_code(), ErrorCode::MissingConfiguration);
    }

    #[test]
    fn test_parse_error_field() {
        let err = ParseError::malformed("slot", "missing field");
        assert_eq!(err.field(), "slot");
        assert!(err.to_string().contains("'slot'"));
    }

    #[test]
    fn test_suggestions() {
        assert!(ErrorCode::MissingConfiguration
            .suggestion()
            .unwrap()
            .contains("CARDANO_NODE_SOCKET_PATH"));
        assert!(ErrorCode::InternalError.suggestion().is_none());
    }
}
