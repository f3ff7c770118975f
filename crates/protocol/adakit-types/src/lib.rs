//! Data types and pure helpers for adakit.
//!
//! This crate holds everything that does not touch a process or the file
//! system: the network context resolved from the environment, lovelace/ADA
//! conversion, the text/hex codec, and parsers for the JSON that
//! `cardano-cli` prints.
//!
//! # Module Organization
//!
//! - [`constants`] - Environment keys, defaults and fixed ratios
//! - [`context`] - Network context and the socket-path gate
//! - [`error`] - Error codes and the error types of this crate
//! - [`units`] - Lovelace/ADA conversion using exact decimal arithmetic
//! - [`codec`] - UTF-8 text to lowercase hex and back
//! - [`tip`] - Chain tip snapshot and sync progress
//! - [`utxo`] - UTxO entries as reported by `query utxo`
//! - [`parse`] - Parsers for `cardano-cli` output
//!
//! # Example
//!
//! ```
//! use adakit_types::{codec, units, Lovelace};
//!
//! assert_eq!(units::to_smallest_unit("1.5").unwrap(), Lovelace(1_500_000));
//! assert_eq!(units::to_display_unit(Lovelace(2_000_000)), "2.0");
//! assert_eq!(codec::text_to_hex("MyToken"), "4d79546f6b656e");
//! ```

/// Crate version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod codec;
pub mod constants;
pub mod context;
pub mod error;
pub mod parse;
pub mod tip;
pub mod units;
pub mod utxo;

pub use constants::*;
pub use context::{validate, NetworkContext};
pub use error::{ConfigError, ErrorCode, ParseError, ParseResult, ValueError, ValueResult};
pub use parse::{parse_policy_id, parse_protocol_params, parse_tip, parse_utxos};
pub use tip::{SyncProgress, TipSnapshot};
pub use units::Lovelace;
pub use utxo::{AssetUnit, Utxo};
