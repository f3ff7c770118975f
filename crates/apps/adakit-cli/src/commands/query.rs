//! Node query commands.

use adakit_exec::ProcessRunner;
use adakit_types::units::to_display_unit;

use crate::context::CliContext;
use crate::error::CliResult;
use crate::output::{BalanceOutput, Render, SyncOutput, TipOutput, TxOutput};
use crate::progress::with_spinner;

/// Execute the get-tip command.
pub fn get_tip<R: ProcessRunner>(ctx: &CliContext<R>) -> CliResult<String> {
    let tip = with_spinner(ctx.format, "Querying tip...", || ctx.ops.get_tip())?;

    let output = TipOutput {
        sync_progress: tip.sync_progress.to_string(),
        slot: tip.slot,
        block: tip.block,
        epoch: tip.epoch,
        era: tip.era,
        hash: tip.hash,
    };

    Ok(output.render(ctx.format))
}

/// Execute the check-sync command.
pub fn check_sync<R: ProcessRunner>(ctx: &CliContext<R>) -> CliResult<String> {
    let status = with_spinner(ctx.format, "Checking sync...", || ctx.ops.check_sync())?;

    let output = SyncOutput {
        synced: status.synced,
        sync_progress: status.tip.sync_progress.to_string(),
        slot: status.tip.slot,
        epoch: status.tip.epoch,
    };

    Ok(output.render(ctx.format))
}

/// Execute the get-balance command.
pub fn get_balance<R: ProcessRunner>(
    ctx: &CliContext<R>,
    address: Option<&str>,
) -> CliResult<String> {
    let balance = with_spinner(ctx.format, "Querying UTxOs...", || {
        ctx.ops.get_balance(address)
    })?;

    let output = BalanceOutput {
        address: balance.address,
        lovelace: balance.lovelace.as_u64(),
        ada: to_display_unit(balance.lovelace),
        assets: balance.assets,
        utxos: balance.utxos.into_iter().map(Into::into).collect(),
    };

    Ok(output.render(ctx.format))
}

/// Execute the get-tx command.
pub fn get_tx<R: ProcessRunner>(ctx: &CliContext<R>, hash: &str, index: u32) -> CliResult<String> {
    let outputs = with_spinner(ctx.format, "Looking up output...", || {
        ctx.ops.get_tx(hash, index)
    })?;

    let output = TxOutput {
        tx_in: outputs.tx_in,
        utxos: outputs.utxos.into_iter().map(Into::into).collect(),
    };

    Ok(output.render(ctx.format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::error::CliError;
    use crate::output::OutputFormat;
    use adakit_test_utils::{test_context, tip_json, utxo_json, MockRunner};
    use adakit_types::NetworkContext;
    use tempfile::TempDir;

    const ADDR: &str = "addr_test1vz2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzers66hrl8";

    fn ctx(temp: &TempDir, network: NetworkContext) -> (CliContext<MockRunner>, MockRunner) {
        let mut config = CliConfig::default();
        config.workspace.dir = temp.path().to_path_buf();
        let mock = MockRunner::new();
        let ctx = CliContext::with_runner(config, OutputFormat::Json, network, mock.clone());
        (ctx, mock)
    }

    fn json(output: &str) -> serde_json::Value {
        serde_json::from_str(output).unwrap()
    }

    #[test]
    fn test_get_tip() {
        let temp = TempDir::new().unwrap();
        let (ctx, mock) = ctx(&temp, test_context());
        mock.push_success(tip_json("99.87", 1000, 50, 3));

        let value = json(&get_tip(&ctx).unwrap());
        assert_eq!(value["sync_progress"], "99.87");
        assert_eq!(value["slot"], 1000);
    }

    #[test]
    fn test_get_tip_without_socket_exits_3() {
        let temp = TempDir::new().unwrap();
        let (ctx, mock) = ctx(&temp, NetworkContext::default());

        let err = get_tip(&ctx).unwrap_err();
        assert!(matches!(err, CliError::Ops(_)));
        assert_eq!(err.exit_code(), 3);
        mock.assert_not_spawned();
    }

    #[test]
    fn test_check_sync_node_error_exits_5() {
        let temp = TempDir::new().unwrap();
        let (ctx, mock) = ctx(&temp, test_context());
        mock.push_failure(1, "network error");

        assert_eq!(check_sync(&ctx).unwrap_err().exit_code(), 5);
    }

    #[test]
    fn test_get_balance() {
        let temp = TempDir::new().unwrap();
        let (ctx, mock) = ctx(&temp, test_context());
        let tx_in = format!("{}#0", "ab".repeat(32));
        mock.push_success(utxo_json(&[(tx_in.as_str(), ADDR, 2_000_000, &[])]));

        let value = json(&get_balance(&ctx, Some(ADDR)).unwrap());
        assert_eq!(value["ada"], "2.0");
        assert_eq!(value["lovelace"], 2_000_000);
        assert_eq!(value["utxos"][0]["tx_in"], tx_in);
    }

    #[test]
    fn test_get_balance_missing_address_file_exits_2() {
        let temp = TempDir::new().unwrap();
        let (ctx, _mock) = ctx(&temp, test_context());

        assert_eq!(get_balance(&ctx, None).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn test_get_tx_bad_hash_exits_1() {
        let temp = TempDir::new().unwrap();
        let (ctx, mock) = ctx(&temp, test_context());

        assert_eq!(get_tx(&ctx, "xyz", 0).unwrap_err().exit_code(), 1);
        mock.assert_not_spawned();
    }
}
