//! Network context resolved from the environment.

use serde::Serialize;

use crate::constants::{DEFAULT_NETWORK_MAGIC, NETWORK_ID_VAR, NETWORK_MAGIC_VAR, SOCKET_PATH_VAR};
use crate::error::ConfigError;

/// Immutable set of network values forwarded to `cardano-cli`.
///
/// Resolved once per process and passed explicitly to every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkContext {
    socket_path: Option<String>,
    network_magic: String,
    network_id: Option<String>,
}

impl Default for NetworkContext {
    fn default() -> Self {
        Self {
            socket_path: None,
            network_magic: DEFAULT_NETWORK_MAGIC.to_string(),
            network_id: None,
        }
    }
}

impl NetworkContext {
    /// Resolve the context from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the context through an arbitrary key lookup.
    ///
    /// An empty `CARDANO_TESTNET_MAGIC` falls back to the default magic.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let network_magic = lookup(NETWORK_MAGIC_VAR)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_NETWORK_MAGIC.to_string());

        Self {
            socket_path: lookup(SOCKET_PATH_VAR),
            network_magic,
            network_id: lookup(NETWORK_ID_VAR).filter(|id| !id.is_empty()),
        }
    }

    /// Set the socket path.
    pub fn with_socket_path(mut self, path: impl Into<String>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    /// Set the network magic.
    pub fn with_network_magic(mut self, magic: impl Into<String>) -> Self {
        self.network_magic = magic.into();
        self
    }

    /// Set the network identifier.
    pub fn with_network_id(mut self, id: impl Into<String>) -> Self {
        self.network_id = Some(id.into());
        self
    }

    /// Socket path as set, possibly empty.
    pub fn socket_path(&self) -> Option<&str> {
        self.socket_path.as_deref()
    }

    /// Network magic, verbatim.
    pub fn network_magic(&self) -> &str {
        &self.network_magic
    }

    /// Informational network identifier.
    pub fn network_id(&self) -> Option<&str> {
        self.network_id.as_deref()
    }

    /// Return the socket path, or fail if it is absent or blank.
    pub fn require_socket_path(&self) -> Result<&str, ConfigError> {
        match self.socket_path.as_deref() {
            Some(path) if !path.trim().is_empty() => Ok(path),
            _ => Err(ConfigError::MissingConfiguration {
                key: SOCKET_PATH_VAR,
            }),
        }
    }

    /// Check that the context is complete enough to reach a node.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self)
    }
}

/// Check that the socket path is a non-empty string.
///
/// Must pass before anything that talks to the node is spawned.
pub fn validate(context: &NetworkContext) -> Result<(), ConfigError> {
    context.require_socket_path().map(|_| ())
}
