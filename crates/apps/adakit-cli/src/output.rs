//! Output formatting for CLI.

use std::collections::BTreeMap;

use colored::Colorize;
use serde::Serialize;

use adakit_types::units::to_display_unit;
use adakit_types::{Lovelace, Utxo};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use 'human' or 'json'.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Trait for renderable output.
pub trait Render {
    /// Render as human-readable string.
    fn render_human(&self) -> String;

    /// Render as JSON string.
    fn render_json(&self) -> String;

    /// Render in the specified format.
    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Human => self.render_human(),
            OutputFormat::Json => self.render_json(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

// =============================================================================
// Output Types
// =============================================================================

/// Output for check-env command.
#[derive(Debug, Serialize)]
pub struct CheckEnvOutput {
    pub socket_path: String,
    pub network_magic: String,
    pub network_id: Option<String>,
}

impl Render for CheckEnvOutput {
    fn render_human(&self) -> String {
        let mut lines = vec![
            format!("{}", "Environment OK".green().bold()),
            format!("{} {}", "Socket:".bold(), self.socket_path),
            format!("{} {}", "Network magic:".bold(), self.network_magic),
        ];
        if let Some(id) = &self.network_id {
            lines.push(format!("{} {}", "Network id:".bold(), id));
        }
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for init command.
#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub root: String,
    pub created: Vec<String>,
    pub existing: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}

impl Render for InitOutput {
    fn render_human(&self) -> String {
        let mut lines = vec![format!("{} {}", "Workspace:".green().bold(), self.root)];
        for dir in &self.created {
            lines.push(format!("  {} {}", "created".green(), dir));
        }
        for dir in &self.existing {
            lines.push(format!("  {} {}", "exists ".dimmed(), dir));
        }
        if let Some(path) = &self.config_path {
            lines.push(format!("{} {}", "Configuration saved to:".green(), path));
        }
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for get-tip command.
#[derive(Debug, Serialize)]
pub struct TipOutput {
    pub sync_progress: String,
    pub slot: u64,
    pub block: u64,
    pub epoch: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub era: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl Render for TipOutput {
    fn render_human(&self) -> String {
        let mut lines = vec![
            format!("{} {}%", "Sync:".bold(), self.sync_progress),
            format!("{} {}", "Slot:".bold(), self.slot),
            format!("{} {}", "Block:".bold(), self.block),
            format!("{} {}", "Epoch:".bold(), self.epoch),
        ];
        if let Some(era) = &self.era {
            lines.push(format!("{} {}", "Era:".bold(), era));
        }
        if let Some(hash) = &self.hash {
            lines.push(format!("{} {}", "Hash:".bold(), hash));
        }
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for check-sync command.
#[derive(Debug, Serialize)]
pub struct SyncOutput {
    pub synced: bool,
    pub sync_progress: String,
    pub slot: u64,
    pub epoch: u64,
}

impl Render for SyncOutput {
    fn render_human(&self) -> String {
        if self.synced {
            format!(
                "{} (slot {}, epoch {})",
                "Node is fully synced".green().bold(),
                self.slot,
                self.epoch
            )
        } else {
            format!(
                "{} {}% (slot {}, epoch {})",
                "Node is syncing:".yellow().bold(),
                self.sync_progress,
                self.slot,
                self.epoch
            )
        }
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// One UTxO line.
#[derive(Debug, Serialize)]
pub struct UtxoSummary {
    pub tx_in: String,
    pub address: String,
    pub lovelace: u64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub assets: BTreeMap<String, u64>,
}

impl From<Utxo> for UtxoSummary {
    fn from(utxo: Utxo) -> Self {
        Self {
            tx_in: utxo.tx_in,
            address: utxo.address,
            lovelace: utxo.lovelace.as_u64(),
            assets: utxo.assets,
        }
    }
}

fn utxo_lines(utxos: &[UtxoSummary]) -> Vec<String> {
    let mut lines = Vec::with_capacity(utxos.len());
    for utxo in utxos {
        lines.push(format!(
            "  {}  {} ADA",
            utxo.tx_in,
            to_display_unit(Lovelace(utxo.lovelace))
        ));
        for (unit, quantity) in &utxo.assets {
            lines.push(format!("      {} {}", quantity, unit.dimmed()));
        }
    }
    lines
}

/// Output for get-balance command.
#[derive(Debug, Serialize)]
pub struct BalanceOutput {
    pub address: String,
    pub lovelace: u64,
    pub ada: String,
    pub assets: BTreeMap<String, u64>,
    pub utxos: Vec<UtxoSummary>,
}

impl Render for BalanceOutput {
    fn render_human(&self) -> String {
        let mut lines = vec![
            format!("{} {}", "Address:".bold(), self.address),
            format!(
                "{} {} ADA ({} lovelace)",
                "Balance:".green().bold(),
                self.ada,
                self.lovelace
            ),
        ];
        if !self.assets.is_empty() {
            lines.push(format!("{}", "Assets:".bold()));
            for (unit, quantity) in &self.assets {
                lines.push(format!("  {} {}", quantity, unit));
            }
        }
        if self.utxos.is_empty() {
            lines.push("No UTxOs found.".dimmed().to_string());
        } else {
            lines.push(format!("{} ({})", "UTxOs".bold(), self.utxos.len()));
            lines.extend(utxo_lines(&self.utxos));
        }
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for get-tx command.
#[derive(Debug, Serialize)]
pub struct TxOutput {
    pub tx_in: String,
    pub utxos: Vec<UtxoSummary>,
}

impl Render for TxOutput {
    fn render_human(&self) -> String {
        if self.utxos.is_empty() {
            return format!("{} {}", "No unspent output at".dimmed(), self.tx_in);
        }
        let mut lines = vec![format!("{} {}", "Output:".bold(), self.tx_in)];
        for utxo in &self.utxos {
            lines.push(format!("  {} {}", "Address:".bold(), utxo.address));
        }
        lines.extend(utxo_lines(&self.utxos));
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for generate-wallet command.
#[derive(Debug, Serialize)]
pub struct WalletOutput {
    pub name: String,
    pub address: String,
    pub files: Vec<String>,
}

impl Render for WalletOutput {
    fn render_human(&self) -> String {
        let mut lines = vec![
            format!("{} {}", "Wallet created:".green().bold(), self.name),
            format!("{} {}", "Address:".bold(), self.address),
            format!("{}", "Files:".bold()),
        ];
        for file in &self.files {
            lines.push(format!("  {}", file));
        }
        lines.push(
            "Keep the .skey files private; anyone holding them controls the funds."
                .yellow()
                .to_string(),
        );
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for get-protocol-params command.
#[derive(Debug, Serialize)]
pub struct ProtocolParamsOutput {
    pub path: String,
    pub utxo_cost_per_byte: u64,
}

impl Render for ProtocolParamsOutput {
    fn render_human(&self) -> String {
        format!(
            "{} {}\n{} {}",
            "Protocol parameters saved to:".green(),
            self.path,
            "utxoCostPerByte:".bold(),
            self.utxo_cost_per_byte
        )
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for calc-min-utxo command.
#[derive(Debug, Serialize)]
pub struct MinUtxoOutput {
    pub output_size: u64,
    pub utxo_cost_per_byte: u64,
    pub min_lovelace: u64,
    pub min_ada: String,
}

impl Render for MinUtxoOutput {
    fn render_human(&self) -> String {
        format!(
            "{} {} lovelace ({} ADA)\n{}",
            "Minimum UTxO:".green().bold(),
            self.min_lovelace,
            self.min_ada,
            format!(
                "(160 + {} bytes) x {} lovelace/byte",
                self.output_size, self.utxo_cost_per_byte
            )
            .dimmed()
        )
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for the pure conversion commands.
///
/// Human output is the bare value so it can be captured by scripts.
#[derive(Debug, Serialize)]
pub struct ConversionOutput {
    pub input: String,
    pub output: String,
}

impl Render for ConversionOutput {
    fn render_human(&self) -> String {
        self.output.clone()
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for get-policy-id command.
#[derive(Debug, Serialize)]
pub struct PolicyIdOutput {
    pub script_file: String,
    pub policy_id: String,
}

impl Render for PolicyIdOutput {
    fn render_human(&self) -> String {
        self.policy_id.clone()
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for mint command.
#[derive(Debug, Serialize)]
pub struct MintOutput {
    pub out_file: String,
    pub policy_id: String,
    pub asset_name: String,
    pub asset_name_hex: String,
    pub quantity: i64,
    pub burn: bool,
}

impl Render for MintOutput {
    fn render_human(&self) -> String {
        let action = if self.burn { "Burn" } else { "Mint" };
        format!(
            "{} {} {}\n{} {}.{}\n{} {}\n{}",
            format!("{} transaction built:", action).green().bold(),
            self.quantity.unsigned_abs(),
            self.asset_name,
            "Unit:".bold(),
            self.policy_id,
            self.asset_name_hex,
            "Unsigned tx:".bold(),
            self.out_file,
            "Sign and submit it with cardano-cli.".dimmed()
        )
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}
