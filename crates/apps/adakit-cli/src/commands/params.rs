//! Protocol parameter commands.

use std::path::Path;

use adakit_exec::ProcessRunner;
use adakit_types::units::to_display_unit;

use crate::context::CliContext;
use crate::error::CliResult;
use crate::output::{MinUtxoOutput, ProtocolParamsOutput, Render};
use crate::progress::with_spinner;

/// Execute the get-protocol-params command.
pub fn get_protocol_params<R: ProcessRunner>(
    ctx: &CliContext<R>,
    out: Option<&Path>,
) -> CliResult<String> {
    let params = with_spinner(ctx.format, "Fetching protocol parameters...", || {
        ctx.ops.get_protocol_params(out)
    })?;

    let output = ProtocolParamsOutput {
        path: params.path.display().to_string(),
        utxo_cost_per_byte: params.utxo_cost_per_byte,
    };

    Ok(output.render(ctx.format))
}

/// Execute the calc-min-utxo command.
pub fn calc_min_utxo<R: ProcessRunner>(
    ctx: &CliContext<R>,
    output_size: Option<u64>,
) -> CliResult<String> {
    let min = with_spinner(ctx.format, "Fetching protocol parameters...", || {
        ctx.ops.calc_min_utxo(output_size)
    })?;

    let output = MinUtxoOutput {
        output_size: min.output_size,
        utxo_cost_per_byte: min.utxo_cost_per_byte,
        min_lovelace: min.min_lovelace.as_u64(),
        min_ada: to_display_unit(min.min_lovelace),
    };

    Ok(output.render(ctx.format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::OutputFormat;
    use adakit_ops::Workspace;
    use adakit_test_utils::{protocol_params_json, test_context, write_file_at, MockRunner};
    use tempfile::TempDir;

    fn ctx(temp: &TempDir) -> (CliContext<MockRunner>, MockRunner) {
        Workspace::new(temp.path()).setup().unwrap();
        let mut config = CliConfig::default();
        config.workspace.dir = temp.path().to_path_buf();
        let mock = MockRunner::new();
        let ctx = CliContext::with_runner(config, OutputFormat::Json, test_context(), mock.clone());
        (ctx, mock)
    }

    #[test]
    fn test_get_protocol_params() {
        let temp = TempDir::new().unwrap();
        let (ctx, mock) = ctx(&temp);
        mock.push_with(write_file_at("--out-file", protocol_params_json(4310)));

        let value: serde_json::Value =
            serde_json::from_str(&get_protocol_params(&ctx, None).unwrap()).unwrap();
        assert_eq!(value["utxo_cost_per_byte"], 4310);
        assert!(value["path"]
            .as_str()
            .unwrap()
            .ends_with("protocol-params.json"));
    }

    #[test]
    fn test_calc_min_utxo() {
        let temp = TempDir::new().unwrap();
        let (ctx, mock) = ctx(&temp);
        mock.push_with(write_file_at("--out-file", protocol_params_json(4310)));

        let value: serde_json::Value =
            serde_json::from_str(&calc_min_utxo(&ctx, None).unwrap()).unwrap();
        assert_eq!(value["min_lovelace"], 969_750);
        assert_eq!(value["min_ada"], "0.96975");
    }
}
