//! Operations for the adakit toolkit.
//!
//! [`Operations`] bundles a [`Dispatcher`], the resolved [`NetworkContext`]
//! and the [`Workspace`] layout, and exposes the toolkit's commands:
//!
//! - **Node queries**: [`get_tip`](Operations::get_tip),
//!   [`check_sync`](Operations::check_sync),
//!   [`get_protocol_params`](Operations::get_protocol_params),
//!   [`calc_min_utxo`](Operations::calc_min_utxo)
//! - **Balances**: [`get_balance`](Operations::get_balance),
//!   [`get_tx`](Operations::get_tx)
//! - **Wallets**: [`generate_wallet`](Operations::generate_wallet)
//! - **Tokens**: [`get_policy_id`](Operations::get_policy_id),
//!   [`mint`](Operations::mint)
//!
//! Every operation is a single request/response; nothing is cached between
//! calls.

pub mod error;
pub mod layout;
pub mod query;
pub mod token;
pub mod wallet;

pub use error::{OpsError, OpsResult};
pub use layout::{SetupReport, Workspace};
pub use query::{Balance, MinUtxo, ProtocolParams, SyncStatus, TxOutputs};
pub use token::{MintPlan, MintRequest};
pub use wallet::WalletFiles;

use adakit_exec::{CommandArgs, CommandOutput, Dispatcher, ProcessRunner};
use adakit_types::NetworkContext;

/// Entry point for all toolkit operations.
#[derive(Debug, Clone)]
pub struct Operations<R> {
    dispatcher: Dispatcher<R>,
    context: NetworkContext,
    workspace: Workspace,
}

impl<R: ProcessRunner> Operations<R> {
    /// Create operations over a dispatcher, context and workspace.
    pub fn new(dispatcher: Dispatcher<R>, context: NetworkContext, workspace: Workspace) -> Self {
        Self {
            dispatcher,
            context,
            workspace,
        }
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher<R> {
        &self.dispatcher
    }

    /// The network context.
    pub fn context(&self) -> &NetworkContext {
        &self.context
    }

    /// The working directory layout.
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    fn run(&self, command: &str, args: CommandArgs) -> OpsResult<CommandOutput> {
        Ok(self.dispatcher.dispatch(command, &args, &self.context)?)
    }
}
