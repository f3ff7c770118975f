//! Policy id and native asset minting.

use std::path::{Path, PathBuf};

use adakit_exec::{CommandArgs, ProcessRunner};
use adakit_types::{codec, parse_policy_id};
use serde::Serialize;
use tracing::info;

use crate::error::{OpsError, OpsResult};
use crate::Operations;

/// Longest asset name the ledger accepts, in bytes.
pub const MAX_ASSET_NAME_BYTES: usize = 32;

/// Parameters of a mint (or burn) transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    /// UTxO paying the fee, `<hash>#<index>`.
    pub tx_in: String,
    /// Address receiving change and minted tokens.
    pub change_address: String,
    /// Policy id of `script_file`.
    pub policy_id: String,
    /// Asset name as text; hex-encoded before dispatch.
    pub asset_name: String,
    /// Amount to mint; negative burns.
    pub quantity: i64,
    /// Minting policy script.
    pub script_file: PathBuf,
    /// Where to write the unsigned transaction (default under `tokens/`).
    pub out_file: Option<PathBuf>,
}

/// A built mint transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintPlan {
    pub out_file: PathBuf,
    pub policy_id: String,
    pub asset_name: String,
    pub asset_name_hex: String,
    pub quantity: i64,
    pub burn: bool,
}

impl<R: ProcessRunner> Operations<R> {
    /// Ask `cardano-cli` for the policy id of a script file.
    pub fn get_policy_id(&self, script_file: &Path) -> OpsResult<String> {
        if !script_file.is_file() {
            return Err(OpsError::FileNotFound(script_file.to_path_buf()));
        }
        let output = self.run(
            "policy-id",
            CommandArgs::new().with_path("script_file", script_file),
        )?;
        Ok(parse_policy_id(output.bytes())?)
    }

    /// Build an unsigned transaction minting `quantity` of an asset.
    ///
    /// A negative quantity burns; the sign is forwarded as-is.
    pub fn mint(&self, request: &MintRequest) -> OpsResult<MintPlan> {
        if request.quantity == 0 {
            return Err(OpsError::invalid_input("quantity must not be zero"));
        }
        if request.asset_name.is_empty() || request.asset_name.len() > MAX_ASSET_NAME_BYTES {
            return Err(OpsError::invalid_input(format!(
                "asset name must be 1 to {} bytes, got {}",
                MAX_ASSET_NAME_BYTES,
                request.asset_name.len()
            )));
        }
        if !request.script_file.is_file() {
            return Err(OpsError::FileNotFound(request.script_file.clone()));
        }

        let burn = request.quantity < 0;
        let asset_name_hex = codec::text_to_hex(&request.asset_name);
        let policy_id = request.policy_id.trim().to_ascii_lowercase();
        let out_file = match &request.out_file {
            Some(path) => path.clone(),
            None => {
                let suffix = if burn { "burn" } else { "mint" };
                self.workspace()
                    .tokens_dir()
                    .join(format!("{}-{}.raw", asset_name_hex, suffix))
            }
        };
        if let Some(parent) = out_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        self.run(
            "mint-build",
            CommandArgs::new()
                .with("tx_in", request.tx_in.as_str())
                .with("change_address", request.change_address.as_str())
                .with("quantity", request.quantity.to_string())
                .with("policy_id", policy_id.as_str())
                .with("asset_name", asset_name_hex.as_str())
                .with_path("script_file", &request.script_file)
                .with_path("out_file", &out_file),
        )?;

        info!(
            asset = %request.asset_name,
            quantity = request.quantity,
            out_file = %out_file.display(),
            "built mint transaction"
        );
        Ok(MintPlan {
            out_file,
            policy_id,
            asset_name: request.asset_name.clone(),
            asset_name_hex,
            quantity: request.quantity,
            burn,
        })
    }
}
