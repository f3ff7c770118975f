//! Command-line interface for adakit.
//!
//! This crate provides the `adakit` binary, a thin layer over `cardano-cli`
//! for testnet work. It includes commands for:
//!
//! - **Environment**: check the node socket, create the working directory
//! - **Node Queries**: tip, sync status, balances, outputs, protocol parameters
//! - **Wallets**: generate payment and stake keys with their address
//! - **Tokens**: policy ids, mint and burn transactions
//! - **Conversions**: lovelace/ADA and text/hex
//!
//! # Quick Start
//!
//! ```bash
//! # Create ~/cardano/{config,db,logs,keys,scripts,tokens,nft}
//! adakit init
//!
//! # Point at the node and check it
//! export CARDANO_NODE_SOCKET_PATH=$HOME/cardano/db/node.socket
//! adakit check-sync
//!
//! # Create keys/payment.* and show its balance
//! adakit generate-wallet
//! adakit get-balance
//! ```
//!
//! # Output Formats
//!
//! All commands support `--format` for output control:
//!
//! - `human` (default): Human-readable with colors
//! - `json`: Machine-readable JSON
//!
//! # Configuration
//!
//! Configuration is loaded from `config.toml` in the platform data directory
//! (or `$ADAKIT_DATA_DIR`). Override with `--config`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod progress;
pub mod prompt;

// Re-export main types
pub use cli::{Cli, Commands, OutputFormatArg};
pub use config::CliConfig;
pub use context::CliContext;
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Render};
