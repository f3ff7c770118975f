//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// adakit command-line interface.
#[derive(Parser, Debug)]
#[command(name = "adakit")]
#[command(author = "adakit contributors")]
#[command(version)]
#[command(about = "Cardano node helper built on cardano-cli")]
#[command(
    long_about = "adakit wraps cardano-cli for everyday testnet chores: querying the tip and balances, generating wallets, computing minimum UTxO values, and minting native tokens.\n\nNode queries need CARDANO_NODE_SOCKET_PATH. Run 'adakit check-env' to verify."
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (human or json); defaults to the config file setting.
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormatArg>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Working directory holding keys, scripts and config.
    #[arg(short, long, global = true, env = "ADAKIT_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    /// Seconds to wait for each cardano-cli invocation.
    #[arg(short, long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

/// Output format argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormatArg {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // =========================================================================
    // Environment Commands
    // =========================================================================
    /// Check that the node socket is configured.
    ///
    /// Exits with code 3 when CARDANO_NODE_SOCKET_PATH is missing.
    #[command(alias = "check_env")]
    CheckEnv,

    /// Create the working directory layout.
    ///
    /// Creates config, db, logs, keys, scripts, tokens and nft under the
    /// working directory. Existing directories are left untouched.
    Init {
        /// Directory to initialize (defaults to the configured working directory).
        dir: Option<PathBuf>,
    },

    // =========================================================================
    // Node Query Commands
    // =========================================================================
    /// Show the node's current tip.
    #[command(alias = "get_tip")]
    GetTip,

    /// Report whether the node is fully synced.
    #[command(alias = "check_sync")]
    CheckSync,

    /// Show the balance of an address.
    ///
    /// Without an address, reads keys/payment.addr from the working directory.
    #[command(alias = "get_balance")]
    GetBalance {
        /// Address to query.
        address: Option<String>,
    },

    /// Look up an unspent transaction output.
    #[command(alias = "get_tx")]
    GetTx {
        /// Transaction hash (64 hex characters).
        hash: String,

        /// Output index.
        #[arg(short, long, default_value = "0")]
        index: u32,
    },

    /// Save the current protocol parameters to a file.
    #[command(alias = "get_protocol_params")]
    GetProtocolParams {
        /// Output file (defaults to config/protocol-params.json).
        out: Option<PathBuf>,
    },

    /// Compute the minimum lovelace an output must carry.
    #[command(alias = "calc_min_utxo")]
    CalcMinUtxo {
        /// Serialized output size in bytes (defaults to a pure-ADA output).
        #[arg(short = 's', long)]
        output_size: Option<u64>,
    },

    // =========================================================================
    // Wallet Commands
    // =========================================================================
    /// Generate payment and stake keys and build the address.
    #[command(alias = "generate_wallet")]
    GenerateWallet {
        /// Wallet name; files are written to keys/<name>.*.
        #[arg(default_value = "payment")]
        name: String,

        /// Overwrite existing wallet files without asking.
        #[arg(short = 'F', long)]
        force: bool,
    },

    // =========================================================================
    // Token Commands
    // =========================================================================
    /// Print the policy id of a minting script.
    #[command(alias = "get_policy_id")]
    GetPolicyId {
        /// Path to the policy script.
        script: PathBuf,
    },

    /// Build a transaction minting (or, with a negative quantity, burning) a token.
    Mint {
        /// UTxO paying the fee, <hash>#<index>.
        #[arg(long)]
        tx_in: String,

        /// Address receiving change and the minted tokens.
        #[arg(long)]
        change_address: String,

        /// Minting policy script.
        #[arg(long)]
        script: PathBuf,

        /// Asset name as plain text.
        #[arg(long)]
        asset_name: String,

        /// Quantity to mint; negative burns.
        #[arg(long, allow_hyphen_values = true)]
        quantity: i64,

        /// Policy id (computed from the script when omitted).
        #[arg(long)]
        policy_id: Option<String>,

        /// Where to write the unsigned transaction.
        #[arg(long)]
        out_file: Option<PathBuf>,
    },

    // =========================================================================
    // Conversion Commands
    // =========================================================================
    /// Convert lovelace to ADA.
    #[command(alias = "lovelace_to_ada")]
    LovelaceToAda {
        /// Amount in lovelace.
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Convert ADA to lovelace.
    #[command(alias = "ada_to_lovelace")]
    AdaToLovelace {
        /// Amount in ADA, up to six decimal places.
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Encode text as lowercase hex (e.g. for asset names).
    #[command(alias = "text_to_hex")]
    TextToHex {
        /// Text to encode.
        text: String,
    },

    /// Decode hex to text.
    #[command(alias = "hex_to_text")]
    HexToText {
        /// Hex to decode.
        hex: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: CompletionShell,
    },
}

/// Shells supported by the completions command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_snake_case_aliases() {
        let cli = Cli::try_parse_from(["adakit", "get_tip"]).unwrap();
        assert!(matches!(cli.command, Commands::GetTip));

        let cli = Cli::try_parse_from(["adakit", "calc_min_utxo", "--output-size", "100"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::CalcMinUtxo {
                output_size: Some(100)
            }
        ));
    }

    #[test]
    fn test_generate_wallet_default_name() {
        let cli = Cli::try_parse_from(["adakit", "generate-wallet"]).unwrap();
        match cli.command {
            Commands::GenerateWallet { name, force } => {
                assert_eq!(name, "payment");
                assert!(!force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_negative_amount_reaches_converter() {
        let cli = Cli::try_parse_from(["adakit", "ada-to-lovelace", "-1"]).unwrap();
        assert!(matches!(cli.command, Commands::AdaToLovelace { ref amount } if amount == "-1"));
    }

    #[test]
    fn test_mint_negative_quantity() {
        let cli = Cli::try_parse_from([
            "adakit",
            "mint",
            "--tx-in",
            "abc#0",
            "--change-address",
            "addr_test1",
            "--script",
            "policy.script",
            "--asset-name",
            "MyToken",
            "--quantity",
            "-5",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Mint { quantity: -5, .. }));
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::try_parse_from([
            "adakit", "get-tip", "--format", "json", "--timeout", "5", "-w", "/tmp/cardano",
        ])
        .unwrap();
        assert!(matches!(cli.format, Some(OutputFormatArg::Json)));
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.work_dir, Some(PathBuf::from("/tmp/cardano")));

        assert!(Cli::try_parse_from(["adakit", "get-tip", "--timeout", "0"]).is_err());
    }
}
