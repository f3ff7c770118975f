//! UTxO entries as reported by `query utxo --output-json`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::units::Lovelace;

/// Native asset identifier: `<policy_id>.<asset_name_hex>`.
pub type AssetUnit = String;

/// One unspent output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Utxo {
    /// Output reference, `<tx_hash>#<index>`.
    pub tx_in: String,
    /// Address holding the output.
    pub address: String,
    /// Lovelace carried by the output.
    pub lovelace: Lovelace,
    /// Native asset quantities keyed by unit.
    pub assets: BTreeMap<AssetUnit, u64>,
}

impl Utxo {
    /// Transaction hash part of `tx_in`.
    pub fn tx_hash(&self) -> &str {
        self.tx_in
            .split_once('#')
            .map(|(hash, _)| hash)
            .unwrap_or(&self.tx_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_hash() {
        let utxo = Utxo {
            tx_in: "abcd#1".to_string(),
            address: "addr_test1".to_string(),
            lovelace: Lovelace(5),
            assets: BTreeMap::new(),
        };
        assert_eq!(utxo.tx_hash(), "abcd");
    }
}
