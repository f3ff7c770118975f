//! Node query operations.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use adakit_exec::{CommandArgs, ProcessRunner};
use adakit_types::{
    parse_protocol_params, parse_tip, parse_utxos, Lovelace, ParseError, TipSnapshot, Utxo,
    DEFAULT_OUTPUT_SIZE_BYTES, MIN_UTXO_OVERHEAD_BYTES, TX_HASH_HEX_LEN,
};
use serde::Serialize;
use tracing::debug;

use crate::error::{OpsError, OpsResult};
use crate::Operations;

/// Tip plus a synced verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    pub tip: TipSnapshot,
    pub synced: bool,
}

/// Funds held by an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub address: String,
    pub utxos: Vec<Utxo>,
    /// Sum of lovelace over all UTxOs.
    pub lovelace: Lovelace,
    /// Native asset totals keyed by `policy.asset_hex`.
    pub assets: BTreeMap<String, u64>,
}

/// Where protocol parameters were written and the value extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolParams {
    pub path: PathBuf,
    pub utxo_cost_per_byte: u64,
}

/// Minimum lovelace for an output of a given size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinUtxo {
    pub output_size: u64,
    pub utxo_cost_per_byte: u64,
    pub min_lovelace: Lovelace,
}

impl MinUtxo {
    /// `(160 + output_size) * utxo_cost_per_byte`.
    pub fn compute(output_size: u64, utxo_cost_per_byte: u64) -> OpsResult<Self> {
        let min = output_size
            .checked_add(MIN_UTXO_OVERHEAD_BYTES)
            .and_then(|bytes| bytes.checked_mul(utxo_cost_per_byte))
            .ok_or_else(|| OpsError::invalid_input(format!("output size {} too large", output_size)))?;
        Ok(Self {
            output_size,
            utxo_cost_per_byte,
            min_lovelace: Lovelace(min),
        })
    }
}

/// Unspent outputs of one transaction output reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOutputs {
    pub tx_in: String,
    pub utxos: Vec<Utxo>,
}

impl<R: ProcessRunner> Operations<R> {
    /// Query and parse the node's tip.
    pub fn get_tip(&self) -> OpsResult<TipSnapshot> {
        let output = self.run("query-tip", CommandArgs::new())?;
        Ok(parse_tip(output.bytes())?)
    }

    /// Query the tip and report whether the node is fully synced.
    pub fn check_sync(&self) -> OpsResult<SyncStatus> {
        let tip = self.get_tip()?;
        let synced = tip.is_synced();
        debug!(progress = %tip.sync_progress, synced, "checked sync");
        Ok(SyncStatus { tip, synced })
    }

    /// Sum the UTxOs of `address`, or of `keys/payment.addr` when `None`.
    pub fn get_balance(&self, address: Option<&str>) -> OpsResult<Balance> {
        let address = match address {
            Some(addr) => addr.trim().to_string(),
            None => read_address(&self.workspace().default_address_file())?,
        };
        if address.is_empty() {
            return Err(OpsError::invalid_input("address must not be empty"));
        }

        let output = self.run("query-utxo", CommandArgs::new().with("address", address.as_str()))?;
        let utxos = parse_utxos(output.bytes())?;

        let mut lovelace = Lovelace::ZERO;
        let mut assets: BTreeMap<String, u64> = BTreeMap::new();
        for utxo in &utxos {
            lovelace = lovelace
                .checked_add(utxo.lovelace)
                .ok_or_else(|| ParseError::malformed("lovelace", "total overflows u64"))?;
            for (unit, quantity) in &utxo.assets {
                let total = assets.entry(unit.clone()).or_default();
                *total = total
                    .checked_add(*quantity)
                    .ok_or_else(|| ParseError::malformed(unit.as_str(), "total overflows u64"))?;
            }
        }

        Ok(Balance {
            address,
            utxos,
            lovelace,
            assets,
        })
    }

    /// Look up the unspent output `<hash>#<index>`.
    pub fn get_tx(&self, hash: &str, index: u32) -> OpsResult<TxOutputs> {
        let hash = hash.trim();
        if hash.len() != TX_HASH_HEX_LEN || !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(OpsError::invalid_input(format!(
                "transaction hash must be {} hex characters, got {:?}",
                TX_HASH_HEX_LEN, hash
            )));
        }
        let tx_in = format!("{}#{}", hash.to_ascii_lowercase(), index);

        let output = self.run("query-tx-utxo", CommandArgs::new().with("tx_in", tx_in.as_str()))?;
        let utxos = parse_utxos(output.bytes())?;
        Ok(TxOutputs { tx_in, utxos })
    }

    /// Write protocol parameters to `out` (default `config/protocol-params.json`).
    pub fn get_protocol_params(&self, out: Option<&Path>) -> OpsResult<ProtocolParams> {
        let path = out
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.workspace().protocol_params_file());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        self.run(
            "query-protocol-parameters",
            CommandArgs::new().with_path("out_file", &path),
        )?;

        if !path.exists() {
            return Err(OpsError::FileNotFound(path));
        }
        let raw = fs::read(&path)?;
        let utxo_cost_per_byte = parse_protocol_params(&raw)?;
        Ok(ProtocolParams {
            path,
            utxo_cost_per_byte,
        })
    }

    /// Minimum lovelace for an output of `output_size` bytes (default: pure-ADA output).
    pub fn calc_min_utxo(&self, output_size: Option<u64>) -> OpsResult<MinUtxo> {
        let params = self.get_protocol_params(None)?;
        MinUtxo::compute(
            output_size.unwrap_or(DEFAULT_OUTPUT_SIZE_BYTES),
            params.utxo_cost_per_byte,
        )
    }
}

pub(crate) fn read_address(path: &Path) -> OpsResult<String> {
    if !path.exists() {
        return Err(OpsError::FileNotFound(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?.trim().to_string())
}
