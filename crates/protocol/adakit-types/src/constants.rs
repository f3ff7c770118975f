//! Fixed values shared across adakit crates.

/// Environment variable holding the node control socket path.
pub const SOCKET_PATH_VAR: &str = "CARDANO_NODE_SOCKET_PATH";

/// Environment variable holding the testnet magic number.
pub const NETWORK_MAGIC_VAR: &str = "CARDANO_TESTNET_MAGIC";

/// Environment variable holding the informational network identifier.
pub const NETWORK_ID_VAR: &str = "CARDANO_NODE_NETWORK_ID";

/// Network magic used when `CARDANO_TESTNET_MAGIC` is unset (preprod).
pub const DEFAULT_NETWORK_MAGIC: &str = "1";

/// Lovelace per ADA.
pub const LOVELACE_PER_ADA: u64 = 1_000_000;

/// Fractional digits of an ADA amount.
pub const ADA_DECIMALS: u32 = 6;

/// Constant overhead, in bytes, added to an output's size when computing
/// its minimum lovelace (Babbage-era rule).
pub const MIN_UTXO_OVERHEAD_BYTES: u64 = 160;

/// Serialized size of a pure-ADA output, used when no size is given.
pub const DEFAULT_OUTPUT_SIZE_BYTES: u64 = 65;

/// Length of a transaction hash in hex characters.
pub const TX_HASH_HEX_LEN: usize = 64;

/// Subdirectories created under a working directory by `init`.
pub const WORKSPACE_DIRS: [&str; 7] = ["config", "db", "logs", "keys", "scripts", "tokens", "nft"];
