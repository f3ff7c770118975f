//! Helper functions for creating test fixtures.
//!
//! Provides canned `cardano-cli` JSON, handlers that emulate the files
//! `cardano-cli` writes, and pre-configured `Operations` over a
//! `MockRunner`.

use std::fs;

use adakit_exec::{Dispatcher, Invocation, ProcessOutput};
use adakit_ops::{Operations, Workspace};
use adakit_types::NetworkContext;
use serde_json::{json, Map, Value};
use tempfile::TempDir;

use crate::MockRunner;

/// Socket path used by [`test_context`].
pub const TEST_SOCKET_PATH: &str = "/tmp/adakit-test/node.socket";

/// A context with a socket path and preprod magic.
pub fn test_context() -> NetworkContext {
    NetworkContext::default()
        .with_socket_path(TEST_SOCKET_PATH)
        .with_network_magic("1")
}

/// `query tip` output.
pub fn tip_json(sync_progress: &str, slot: u64, block: u64, epoch: u64) -> String {
    json!({
        "block": block,
        "epoch": epoch,
        "era": "Conway",
        "hash": "8f3a9b6c1d2e4f5061728394a5b6c7d8e9f00112233445566778899aabbccdd",
        "slot": slot,
        "slotInEpoch": slot % 432_000,
        "slotsToEpochEnd": 432_000 - slot % 432_000,
        "syncProgress": sync_progress
    })
    .to_string()
}

/// `query protocol-parameters` output with the given `utxoCostPerByte`.
pub fn protocol_params_json(utxo_cost_per_byte: u64) -> String {
    json!({
        "txFeeFixed": 155381,
        "txFeePerByte": 44,
        "maxTxSize": 16384,
        "utxoCostPerByte": utxo_cost_per_byte
    })
    .to_string()
}

/// `query utxo --output-json` output.
///
/// Each entry is `(tx_in, address, lovelace, assets)` where assets are
/// `(policy_id, asset_name_hex, quantity)`.
pub fn utxo_json(entries: &[(&str, &str, u64, &[(&str, &str, u64)])]) -> String {
    let mut root = Map::new();
    for (tx_in, address, lovelace, assets) in entries {
        let mut value = Map::new();
        value.insert("lovelace".to_string(), json!(lovelace));
        for (policy, name, quantity) in assets.iter() {
            let policy_entry = value
                .entry(policy.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(names) = policy_entry {
                names.insert(name.to_string(), json!(quantity));
            }
        }
        root.insert(
            tx_in.to_string(),
            json!({ "address": address, "datum": null, "value": Value::Object(value) }),
        );
    }
    Value::Object(root).to_string()
}

/// Handler that writes `contents` to the path following `flag` and succeeds.
///
/// Fails with exit code 1 when the flag is absent, like `cardano-cli` would.
pub fn write_file_at(
    flag: &'static str,
    contents: impl Into<String>,
) -> impl Fn(&Invocation) -> ProcessOutput + Send + Sync + 'static {
    let contents = contents.into();
    move |inv: &Invocation| match inv.flag_value(flag) {
        Some(path) => match fs::write(path, &contents) {
            Ok(()) => ProcessOutput::success(""),
            Err(e) => ProcessOutput::failure(1, e.to_string()),
        },
        None => ProcessOutput::failure(1, format!("Missing: {}", flag)),
    }
}

/// Handler emulating `key-gen`: writes both key files.
pub fn key_gen() -> impl Fn(&Invocation) -> ProcessOutput + Send + Sync + 'static {
    |inv: &Invocation| {
        for (flag, kind) in [
            ("--verification-key-file", "VerificationKey"),
            ("--signing-key-file", "SigningKey"),
        ] {
            let Some(path) = inv.flag_value(flag) else {
                return ProcessOutput::failure(1, format!("Missing: {}", flag));
            };
            let envelope = json!({ "type": kind, "description": "", "cborHex": "5820" });
            if let Err(e) = fs::write(path, envelope.to_string()) {
                return ProcessOutput::failure(1, e.to_string());
            }
        }
        ProcessOutput::success("")
    }
}

/// Operations over a fresh temporary workspace and a `MockRunner`.
///
/// Returns a clone of the runner for scripting and assertions, and the
/// `TempDir` that must outlive the test.
pub fn create_test_ops() -> (Operations<MockRunner>, MockRunner, TempDir) {
    create_test_ops_with_context(test_context())
}

/// Like [`create_test_ops`] with a caller-supplied context.
pub fn create_test_ops_with_context(
    context: NetworkContext,
) -> (Operations<MockRunner>, MockRunner, TempDir) {
    let temp = TempDir::new().unwrap();
    let runner = MockRunner::new();
    let workspace = Workspace::new(temp.path());
    workspace.setup().unwrap();
    let ops = Operations::new(Dispatcher::new(runner.clone()), context, workspace);
    (ops, runner, temp)
}
