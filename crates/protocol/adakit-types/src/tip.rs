//! Chain tip as reported by `query tip`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ParseError;
use crate::units::{parse_fixed_point, Rounding};

/// Sync progress as a percentage with two decimal places.
///
/// Stored in hundredths of a percent so `"99.87"` compares exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SyncProgress(u32);

impl SyncProgress {
    /// Fully synced.
    pub const COMPLETE: SyncProgress = SyncProgress(100_00);

    /// Build from hundredths of a percent.
    pub fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    /// Hundredths of a percent.
    pub fn hundredths(self) -> u32 {
        self.0
    }

    /// Whether the node reports itself fully synced.
    pub fn is_synced(self) -> bool {
        self >= Self::COMPLETE
    }
}

impl fmt::Display for SyncProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for SyncProgress {
    type Err = ParseError;

    /// Digits past the second decimal place are dropped, so a node that is
    /// not quite done never reads as `100.00`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hundredths = parse_fixed_point(s.trim(), 2, Rounding::Truncate)
            .ok_or_else(|| ParseError::malformed("syncProgress", format!("not a percentage: {:?}", s)))?;
        if hundredths > u128::from(Self::COMPLETE.0) {
            return Err(ParseError::malformed(
                "syncProgress",
                format!("percentage above 100: {}", s),
            ));
        }
        Ok(Self(hundredths as u32))
    }
}

impl Serialize for SyncProgress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A fresh snapshot of the node's chain position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TipSnapshot {
    /// Percentage of the chain the node has synced.
    pub sync_progress: SyncProgress,
    /// Current absolute slot.
    pub slot: u64,
    /// Current block height.
    pub block: u64,
    /// Current epoch.
    pub epoch: u64,
    /// Ledger era, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub era: Option<String>,
    /// Tip block hash, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl TipSnapshot {
    /// Whether the node reports itself fully synced.
    pub fn is_synced(&self) -> bool {
        self.sync_progress.is_synced()
    }
}
