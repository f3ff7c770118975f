//! CLI command implementations.

pub mod check_env;
pub mod completions;
pub mod convert;
pub mod init;
pub mod params;
pub mod query;
pub mod token;
pub mod wallet;

// Re-export command handlers
pub use check_env::check_env;
pub use completions::completions;
pub use convert::{ada_to_lovelace, hex_to_text, lovelace_to_ada, text_to_hex};
pub use init::init;
pub use params::{calc_min_utxo, get_protocol_params};
pub use query::{check_sync, get_balance, get_tip, get_tx};
pub use token::{get_policy_id, mint, MintArgs};
pub use wallet::generate_wallet;
