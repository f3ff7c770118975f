//! Working directory layout.
//!
//! A workspace is a user-chosen directory holding node config, the chain
//! database, logs, keys, scripts and minted token artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use adakit_types::WORKSPACE_DIRS;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::OpsResult;

/// File holding the default wallet address.
pub const DEFAULT_ADDRESS_FILE: &str = "payment.addr";

/// File receiving protocol parameters when no path is given.
pub const PROTOCOL_PARAMS_FILE: &str = "protocol-params.json";

/// Paths inside a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

/// Outcome of [`Workspace::setup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupReport {
    /// Workspace root.
    pub root: PathBuf,
    /// Subdirectories created by this call.
    pub created: Vec<String>,
    /// Subdirectories that were already present.
    pub existing: Vec<String>,
}

impl Workspace {
    /// Workspace rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Node configuration and protocol parameters.
    pub fn config_dir(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Key files and addresses.
    pub fn keys_dir(&self) -> PathBuf {
        self.root.join("keys")
    }

    /// Minting policy scripts.
    pub fn scripts_dir(&self) -> PathBuf {
        self.root.join("scripts")
    }

    /// Built token transactions.
    pub fn tokens_dir(&self) -> PathBuf {
        self.root.join("tokens")
    }

    /// `keys/payment.addr`.
    pub fn default_address_file(&self) -> PathBuf {
        self.keys_dir().join(DEFAULT_ADDRESS_FILE)
    }

    /// `config/protocol-params.json`.
    pub fn protocol_params_file(&self) -> PathBuf {
        self.config_dir().join(PROTOCOL_PARAMS_FILE)
    }

    /// Create every standard subdirectory that does not exist yet.
    ///
    /// Safe to run repeatedly; existing directories are left untouched.
    pub fn setup(&self) -> OpsResult<SetupReport> {
        let mut created = Vec::new();
        let mut existing = Vec::new();

        for name in WORKSPACE_DIRS {
            let dir = self.root.join(name);
            if dir.is_dir() {
                debug!(dir = %dir.display(), "directory already exists, skipping");
                existing.push(name.to_string());
            } else {
                fs::create_dir_all(&dir)?;
                info!(dir = %dir.display(), "created directory");
                created.push(name.to_string());
            }
        }

        Ok(SetupReport {
            root: self.root.clone(),
            created,
            existing,
        })
    }
}
