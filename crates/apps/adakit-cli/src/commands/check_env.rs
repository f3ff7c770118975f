//! Check environment command.

use adakit_exec::ProcessRunner;

use crate::context::CliContext;
use crate::error::CliResult;
use crate::output::{CheckEnvOutput, Render};

/// Execute the check-env command.
pub fn check_env<R: ProcessRunner>(ctx: &CliContext<R>) -> CliResult<String> {
    let network = ctx.ops.context();
    let socket_path = network.require_socket_path()?;

    let output = CheckEnvOutput {
        socket_path: socket_path.to_string(),
        network_magic: network.network_magic().to_string(),
        network_id: network.network_id().map(str::to_string),
    };

    Ok(output.render(ctx.format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::error::CliError;
    use crate::output::OutputFormat;
    use adakit_test_utils::{test_context, MockRunner, TEST_SOCKET_PATH};
    use adakit_types::NetworkContext;

    fn ctx(network: NetworkContext) -> CliContext<MockRunner> {
        CliContext::with_runner(CliConfig::default(), OutputFormat::Json, network, MockRunner::new())
    }

    #[test]
    fn test_check_env_ok() {
        let output = check_env(&ctx(test_context().with_network_id("Testnet"))).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["socket_path"], TEST_SOCKET_PATH);
        assert_eq!(json["network_magic"], "1");
        assert_eq!(json["network_id"], "Testnet");
    }

    #[test]
    fn test_check_env_missing_socket() {
        let err = check_env(&ctx(NetworkContext::default())).unwrap_err();
        assert!(matches!(err, CliError::Env(_)));
        assert_eq!(err.exit_code(), 3);
    }
}
