//! Parsers for `cardano-cli` output.
//!
//! Each parser names the first field that is missing or has the wrong type,
//! which is usually enough to spot a `cardano-cli` version mismatch.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::codec::is_hex;
use crate::error::{ParseError, ParseResult};
use crate::tip::{SyncProgress, TipSnapshot};
use crate::units::Lovelace;
use crate::utxo::Utxo;

/// Field name reported when the document itself cannot be used.
pub const ROOT_FIELD: &str = "<root>";

/// Parse `query tip` output.
///
/// Fields are checked in the order `syncProgress`, `slot`, `block`, `epoch`.
pub fn parse_tip(raw: &[u8]) -> ParseResult<TipSnapshot> {
    let obj = root_object(raw)?;

    let sync_progress = match obj.get("syncProgress") {
        None => return Err(ParseError::malformed("syncProgress", "missing field")),
        Some(Value::String(s)) => s.parse::<SyncProgress>()?,
        Some(Value::Number(n)) => n.to_string().parse::<SyncProgress>()?,
        Some(other) => {
            return Err(ParseError::malformed(
                "syncProgress",
                format!("expected string, found {}", kind(other)),
            ))
        }
    };

    Ok(TipSnapshot {
        sync_progress,
        slot: require_u64(&obj, "slot")?,
        block: require_u64(&obj, "block")?,
        epoch: require_u64(&obj, "epoch")?,
        era: optional_string(&obj, "era"),
        hash: optional_string(&obj, "hash"),
    })
}

/// Parse `query protocol-parameters` output, returning `utxoCostPerByte`.
pub fn parse_protocol_params(raw: &[u8]) -> ParseResult<u64> {
    let obj = root_object(raw)?;
    require_u64(&obj, "utxoCostPerByte")
}

/// Parse `transaction policyid` output into a lowercase hex policy id.
pub fn parse_policy_id(raw: &[u8]) -> ParseResult<String> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| ParseError::malformed("policyId", "output is not UTF-8"))?
        .trim();
    if text.is_empty() {
        return Err(ParseError::malformed("policyId", "empty output"));
    }
    if !is_hex(text) {
        return Err(ParseError::malformed(
            "policyId",
            format!("not a hex string: {:?}", text),
        ));
    }
    Ok(text.to_ascii_lowercase())
}

/// Parse `query utxo --output-json` output, sorted by `tx_in`.
pub fn parse_utxos(raw: &[u8]) -> ParseResult<Vec<Utxo>> {
    let obj = root_object(raw)?;
    let mut utxos = Vec::with_capacity(obj.len());

    for (tx_in, entry) in &obj {
        let entry = entry
            .as_object()
            .ok_or_else(|| ParseError::malformed(tx_in.as_str(), "expected object"))?;
        let address = entry
            .get("address")
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::malformed(format!("{}.address", tx_in), "missing field"))?
            .to_string();
        let value = entry
            .get("value")
            .and_then(Value::as_object)
            .ok_or_else(|| ParseError::malformed(format!("{}.value", tx_in), "missing field"))?;

        let mut lovelace = Lovelace::ZERO;
        let mut assets = BTreeMap::new();
        for (key, amount) in value {
            if key == "lovelace" {
                let field = format!("{}.value.lovelace", tx_in);
                lovelace = Lovelace(amount.as_u64().ok_or_else(|| {
                    ParseError::malformed(field, format!("expected integer, found {}", kind(amount)))
                })?);
                continue;
            }
            let policy_assets = amount.as_object().ok_or_else(|| {
                ParseError::malformed(format!("{}.value.{}", tx_in, key), "expected object")
            })?;
            for (asset_name, quantity) in policy_assets {
                let quantity = quantity.as_u64().ok_or_else(|| {
                    ParseError::malformed(
                        format!("{}.value.{}.{}", tx_in, key, asset_name),
                        "expected integer",
                    )
                })?;
                assets.insert(format!("{}.{}", key, asset_name), quantity);
            }
        }

        utxos.push(Utxo {
            tx_in: tx_in.clone(),
            address,
            lovelace,
            assets,
        });
    }

    utxos.sort_by(|a, b| a.tx_in.cmp(&b.tx_in));
    Ok(utxos)
}

fn root_object(raw: &[u8]) -> ParseResult<Map<String, Value>> {
    let value: Value = serde_json::from_slice(raw)
        .map_err(|e| ParseError::malformed(ROOT_FIELD, format!("invalid JSON: {}", e)))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::malformed(
            ROOT_FIELD,
            format!("expected object, found {}", kind(&other)),
        )),
    }
}

fn require_u64(obj: &Map<String, Value>, field: &str) -> ParseResult<u64> {
    match obj.get(field) {
        None => Err(ParseError::malformed(field, "missing field")),
        Some(value) => value.as_u64().ok_or_else(|| {
            ParseError::malformed(
                field,
                format!("expected non-negative integer, found {}", kind(value)),
            )
        }),
    }
}

fn optional_string(obj: &Map<String, Value>, field: &str) -> Option<String> {
    obj.get(field).and_then(Value::as_str).map(str::to_string)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
