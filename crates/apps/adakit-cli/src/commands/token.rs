//! Token commands.

use std::path::{Path, PathBuf};

use adakit_exec::ProcessRunner;
use adakit_ops::MintRequest;

use crate::context::CliContext;
use crate::error::CliResult;
use crate::output::{MintOutput, PolicyIdOutput, Render};
use crate::progress::with_spinner;

/// Execute the get-policy-id command.
pub fn get_policy_id<R: ProcessRunner>(ctx: &CliContext<R>, script: &Path) -> CliResult<String> {
    let policy_id = ctx.ops.get_policy_id(script)?;

    let output = PolicyIdOutput {
        script_file: script.display().to_string(),
        policy_id,
    };

    Ok(output.render(ctx.format))
}

/// Arguments of the mint command.
#[derive(Debug, Clone)]
pub struct MintArgs {
    pub tx_in: String,
    pub change_address: String,
    pub script: PathBuf,
    pub asset_name: String,
    pub quantity: i64,
    pub policy_id: Option<String>,
    pub out_file: Option<PathBuf>,
}

/// Execute the mint command.
///
/// The policy id is computed from the script when not given.
pub fn mint<R: ProcessRunner>(ctx: &CliContext<R>, args: MintArgs) -> CliResult<String> {
    let policy_id = match args.policy_id {
        Some(id) => id,
        None => ctx.ops.get_policy_id(&args.script)?,
    };

    let request = MintRequest {
        tx_in: args.tx_in,
        change_address: args.change_address,
        policy_id,
        asset_name: args.asset_name,
        quantity: args.quantity,
        script_file: args.script,
        out_file: args.out_file,
    };
    let plan = with_spinner(ctx.format, "Building transaction...", || {
        ctx.ops.mint(&request)
    })?;

    let output = MintOutput {
        out_file: plan.out_file.display().to_string(),
        policy_id: plan.policy_id,
        asset_name: plan.asset_name,
        asset_name_hex: plan.asset_name_hex,
        quantity: plan.quantity,
        burn: plan.burn,
    };

    Ok(output.render(ctx.format))
}
