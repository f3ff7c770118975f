//! Static registry of `cardano-cli` command descriptors.
//!
//! Each descriptor lists its typed parameters and an argument template.
//! Template tokens may contain `{name}` placeholders naming a parameter or
//! the context key `network_magic`; a token is never split, so
//! `"{quantity} {policy_id}.{asset_name}"` stays a single argv entry.

use std::path::Path;

/// Placeholder filled from the network context.
pub const NETWORK_MAGIC_KEY: &str = "network_magic";

/// Type of a descriptor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Non-empty free text.
    Text,
    /// Non-empty file system path.
    Path,
    /// Signed 64-bit integer.
    Integer,
    /// Unsigned 64-bit integer.
    Natural,
    /// Non-empty hex of even length.
    Hex,
}

impl ParamKind {
    /// Check a raw value against this kind, returning the reason on failure.
    pub fn check(self, value: &str) -> Result<(), &'static str> {
        match self {
            Self::Text if value.trim().is_empty() => Err("must not be empty"),
            Self::Text => Ok(()),
            Self::Path if value.is_empty() => Err("must not be empty"),
            Self::Path if value.contains('\0') => Err("must not contain NUL"),
            Self::Path if Path::new(value).file_name().is_none() => Err("must name a file"),
            Self::Path => Ok(()),
            Self::Integer => value
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| "must be an integer"),
            Self::Natural => value
                .parse::<u64>()
                .map(|_| ())
                .map_err(|_| "must be a non-negative integer"),
            Self::Hex if adakit_types::codec::is_hex(value) => Ok(()),
            Self::Hex => Err("must be hex with an even number of digits"),
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Path => write!(f, "path"),
            Self::Integer => write!(f, "integer"),
            Self::Natural => write!(f, "natural"),
            Self::Hex => write!(f, "hex"),
        }
    }
}

/// A named, typed parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
}

const fn param(name: &'static str, kind: ParamKind) -> ParamSpec {
    ParamSpec { name, kind }
}

/// Static description of one `cardano-cli` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Logical command name.
    pub name: &'static str,
    /// One-line description.
    pub summary: &'static str,
    /// Required parameters; every one must be supplied.
    pub params: &'static [ParamSpec],
    /// Whether the command talks to a running node.
    pub requires_node: bool,
    /// Argument template.
    pub template: &'static [&'static str],
}

impl CommandDescriptor {
    /// Look up a parameter by name.
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

static REGISTRY: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "query-tip",
        summary: "Query the node's current tip",
        params: &[],
        requires_node: true,
        template: &["query", "tip", "--testnet-magic", "{network_magic}"],
    },
    CommandDescriptor {
        name: "query-utxo",
        summary: "List UTxOs held by an address",
        params: &[param("address", ParamKind::Text)],
        requires_node: true,
        template: &[
            "query",
            "utxo",
            "--address",
            "{address}",
            "--testnet-magic",
            "{network_magic}",
            "--output-json",
        ],
    },
    CommandDescriptor {
        name: "query-tx-utxo",
        summary: "Look up an unspent output by reference",
        params: &[param("tx_in", ParamKind::Text)],
        requires_node: true,
        template: &[
            "query",
            "utxo",
            "--tx-in",
            "{tx_in}",
            "--testnet-magic",
            "{network_magic}",
            "--output-json",
        ],
    },
    CommandDescriptor {
        name: "query-protocol-parameters",
        summary: "Write current protocol parameters to a file",
        params: &[param("out_file", ParamKind::Path)],
        requires_node: true,
        template: &[
            "query",
            "protocol-parameters",
            "--testnet-magic",
            "{network_magic}",
            "--out-file",
            "{out_file}",
        ],
    },
    CommandDescriptor {
        name: "address-key-gen",
        summary: "Generate a payment key pair",
        params: &[param("vkey", ParamKind::Path), param("skey", ParamKind::Path)],
        requires_node: false,
        template: &[
            "address",
            "key-gen",
            "--verification-key-file",
            "{vkey}",
            "--signing-key-file",
            "{skey}",
        ],
    },
    CommandDescriptor {
        name: "stake-address-key-gen",
        summary: "Generate a stake key pair",
        params: &[param("vkey", ParamKind::Path), param("skey", ParamKind::Path)],
        requires_node: false,
        template: &[
            "stake-address",
            "key-gen",
            "--verification-key-file",
            "{vkey}",
            "--signing-key-file",
            "{skey}",
        ],
    },
    CommandDescriptor {
        name: "address-build",
        summary: "Build a base address from payment and stake keys",
        params: &[
            param("payment_vkey", ParamKind::Path),
            param("stake_vkey", ParamKind::Path),
            param("out_file", ParamKind::Path),
        ],
        requires_node: false,
        template: &[
            "address",
            "build",
            "--payment-verification-key-file",
            "{payment_vkey}",
            "--stake-verification-key-file",
            "{stake_vkey}",
            "--testnet-magic",
            "{network_magic}",
            "--out-file",
            "{out_file}",
        ],
    },
    CommandDescriptor {
        name: "policy-id",
        summary: "Compute the policy id of a minting script",
        params: &[param("script_file", ParamKind::Path)],
        requires_node: false,
        template: &["transaction", "policyid", "--script-file", "{script_file}"],
    },
    // A negative quantity burns; cardano-cli interprets the sign.
    CommandDescriptor {
        name: "mint-build",
        summary: "Build a transaction minting or burning a native asset",
        params: &[
            param("tx_in", ParamKind::Text),
            param("change_address", ParamKind::Text),
            param("quantity", ParamKind::Integer),
            param("policy_id", ParamKind::Hex),
            param("asset_name", ParamKind::Hex),
            param("script_file", ParamKind::Path),
            param("out_file", ParamKind::Path),
        ],
        requires_node: true,
        template: &[
            "transaction",
            "build",
            "--testnet-magic",
            "{network_magic}",
            "--tx-in",
            "{tx_in}",
            "--change-address",
            "{change_address}",
            "--mint",
            "{quantity} {policy_id}.{asset_name}",
            "--minting-script-file",
            "{script_file}",
            "--out-file",
            "{out_file}",
        ],
    },
];

/// All registered descriptors.
pub fn descriptors() -> &'static [CommandDescriptor] {
    REGISTRY
}

/// Find a descriptor by name.
pub fn lookup(name: &str) -> Option<&'static CommandDescriptor> {
    REGISTRY.iter().find(|d| d.name == name)
}
