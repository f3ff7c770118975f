//! Wallet generation.

use std::fs;
use std::path::PathBuf;

use adakit_exec::{CommandArgs, ProcessRunner};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{OpsError, OpsResult};
use crate::query::read_address;
use crate::Operations;

/// Files written for a wallet, plus its address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletFiles {
    pub name: String,
    pub payment_vkey: PathBuf,
    pub payment_skey: PathBuf,
    pub stake_vkey: PathBuf,
    pub stake_skey: PathBuf,
    pub address_file: PathBuf,
    pub address: String,
}

impl WalletFiles {
    fn in_dir(dir: PathBuf, name: &str) -> Self {
        Self {
            name: name.to_string(),
            payment_vkey: dir.join(format!("{}.vkey", name)),
            payment_skey: dir.join(format!("{}.skey", name)),
            stake_vkey: dir.join(format!("{}-stake.vkey", name)),
            stake_skey: dir.join(format!("{}-stake.skey", name)),
            address_file: dir.join(format!("{}.addr", name)),
            address: String::new(),
        }
    }

    fn all_paths(&self) -> [&PathBuf; 5] {
        [
            &self.payment_vkey,
            &self.payment_skey,
            &self.stake_vkey,
            &self.stake_skey,
            &self.address_file,
        ]
    }
}

/// Check a wallet name: non-empty, ASCII letters, digits, `-` and `_`.
pub fn validate_wallet_name(name: &str) -> OpsResult<()> {
    if name.is_empty() {
        return Err(OpsError::invalid_input("wallet name must not be empty"));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(OpsError::invalid_input(format!(
            "wallet name {:?} may only contain letters, digits, '-' and '_'",
            name
        )));
    }
    Ok(())
}

impl<R: ProcessRunner> Operations<R> {
    /// Generate payment and stake key pairs and build the wallet's address.
    ///
    /// Files land in `keys/` as `<name>.vkey`, `<name>.skey`,
    /// `<name>-stake.vkey`, `<name>-stake.skey` and `<name>.addr`.
    /// Existing wallet files are only replaced when `overwrite` is set, and
    /// stay untouched if any step fails.
    pub fn generate_wallet(&self, name: &str, overwrite: bool) -> OpsResult<WalletFiles> {
        validate_wallet_name(name)?;

        let keys_dir = self.workspace().keys_dir();
        fs::create_dir_all(&keys_dir)?;
        let mut files = WalletFiles::in_dir(keys_dir.clone(), name);

        if let Some(existing) = files.all_paths().into_iter().find(|p| p.exists()) {
            if !overwrite {
                return Err(OpsError::WalletExists {
                    name: name.to_string(),
                    path: existing.clone(),
                });
            }
            debug!(wallet = name, path = %existing.display(), "replacing existing wallet");
        }

        // Existing files are only replaced once every new file is in place.
        let staging = tempfile::Builder::new()
            .prefix(&format!(".{}.", name))
            .tempdir_in(&keys_dir)?;
        let staged = WalletFiles::in_dir(staging.path().to_path_buf(), name);

        self.run(
            "address-key-gen",
            CommandArgs::new()
                .with_path("vkey", &staged.payment_vkey)
                .with_path("skey", &staged.payment_skey),
        )?;
        self.run(
            "stake-address-key-gen",
            CommandArgs::new()
                .with_path("vkey", &staged.stake_vkey)
                .with_path("skey", &staged.stake_skey),
        )?;
        self.run(
            "address-build",
            CommandArgs::new()
                .with_path("payment_vkey", &staged.payment_vkey)
                .with_path("stake_vkey", &staged.stake_vkey)
                .with_path("out_file", &staged.address_file),
        )?;
        let address = read_address(&staged.address_file)?;

        for (from, to) in staged.all_paths().into_iter().zip(files.all_paths()) {
            fs::rename(from, to)?;
        }

        files.address = address;
        info!(wallet = name, address = %files.address, "generated wallet");
        Ok(files)
    }
}
