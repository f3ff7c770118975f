//! Command context for CLI operations.

use adakit_exec::{Dispatcher, ProcessRunner, SystemRunner};
use adakit_ops::{Operations, Workspace};
use adakit_types::NetworkContext;

use crate::config::CliConfig;
use crate::output::OutputFormat;

/// Everything a command needs: operations, configuration and output format.
pub struct CliContext<R = SystemRunner> {
    /// Operations interface.
    pub ops: Operations<R>,
    /// Configuration.
    pub config: CliConfig,
    /// Output format.
    pub format: OutputFormat,
}

impl CliContext<SystemRunner> {
    /// Context that runs the real `cardano-cli`.
    ///
    /// The network context is resolved from the process environment.
    pub fn new(config: CliConfig, format: OutputFormat) -> Self {
        Self::with_runner(
            config,
            format,
            NetworkContext::from_env(),
            SystemRunner::default(),
        )
    }
}

impl<R: ProcessRunner> CliContext<R> {
    /// Context over an arbitrary runner and network context.
    pub fn with_runner(
        config: CliConfig,
        format: OutputFormat,
        network: NetworkContext,
        runner: R,
    ) -> Self {
        let dispatcher = Dispatcher::new(runner)
            .with_program(config.cli.path.clone())
            .with_timeout(config.cli.timeout());
        let workspace = Workspace::new(config.workspace.dir.clone());
        Self {
            ops: Operations::new(dispatcher, network, workspace),
            config,
            format,
        }
    }
}
