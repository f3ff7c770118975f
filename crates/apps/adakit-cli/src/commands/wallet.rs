//! Generate wallet command.

use adakit_exec::ProcessRunner;
use adakit_ops::OpsError;
use tracing::debug;

use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::output::{Render, WalletOutput};
use crate::prompt;

/// Execute the generate-wallet command.
///
/// When the wallet already exists and `force` is not set, an interactive
/// session is asked for confirmation; otherwise the command fails.
pub fn generate_wallet<R: ProcessRunner>(
    ctx: &CliContext<R>,
    name: &str,
    force: bool,
    interactive: bool,
) -> CliResult<String> {
    let wallet = match ctx.ops.generate_wallet(name, force) {
        Err(OpsError::WalletExists { name, path }) if interactive => {
            debug!(path = %path.display(), "wallet exists, asking to overwrite");
            let question = format!("Wallet '{}' already exists. Overwrite its keys?", name);
            if !prompt::confirm(&question)? {
                return Err(CliError::Aborted);
            }
            ctx.ops.generate_wallet(&name, true)?
        }
        result => result?,
    };

    let output = WalletOutput {
        name: wallet.name,
        address: wallet.address,
        files: [
            &wallet.payment_vkey,
            &wallet.payment_skey,
            &wallet.stake_vkey,
            &wallet.stake_skey,
            &wallet.address_file,
        ]
        .iter()
        .map(|p| p.display().to_string())
        .collect(),
    };

    Ok(output.render(ctx.format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::OutputFormat;
    use adakit_test_utils::{key_gen, test_context, write_file_at, MockRunner};
    use tempfile::TempDir;

    const ADDR: &str = "addr_test1vz2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzers66hrl8";

    fn ctx(temp: &TempDir) -> (CliContext<MockRunner>, MockRunner) {
        let mut config = CliConfig::default();
        config.workspace.dir = temp.path().to_path_buf();
        let mock = MockRunner::new();
        let ctx = CliContext::with_runner(config, OutputFormat::Json, test_context(), mock.clone());
        (ctx, mock)
    }

    fn script(mock: &MockRunner) {
        mock.push_with(key_gen());
        mock.push_with(key_gen());
        mock.push_with(write_file_at("--out-file", ADDR));
    }

    #[test]
    fn test_generate_wallet() {
        let temp = TempDir::new().unwrap();
        let (ctx, mock) = ctx(&temp);
        script(&mock);

        let value: serde_json::Value =
            serde_json::from_str(&generate_wallet(&ctx, "payment", false, false).unwrap())
                .unwrap();
        assert_eq!(value["address"], ADDR);
        assert_eq!(value["files"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_existing_wallet_non_interactive_fails() {
        let temp = TempDir::new().unwrap();
        let (ctx, mock) = ctx(&temp);
        script(&mock);
        generate_wallet(&ctx, "payment", false, false).unwrap();

        let err = generate_wallet(&ctx, "payment", false, false).unwrap_err();
        assert!(matches!(err, CliError::Ops(OpsError::WalletExists { .. })));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(mock.spawn_count(), 3);
    }

    #[test]
    fn test_force_overwrites() {
        let temp = TempDir::new().unwrap();
        let (ctx, mock) = ctx(&temp);
        script(&mock);
        script(&mock);

        generate_wallet(&ctx, "payment", false, false).unwrap();
        generate_wallet(&ctx, "payment", true, false).unwrap();
        assert_eq!(mock.spawn_count(), 6);
    }
}
