//! Command dispatch for `cardano-cli`.
//!
//! Logical command names are mapped to `cardano-cli` argument vectors by a
//! static [`registry`]. The [`Dispatcher`] validates arguments, gates
//! node-touching commands on the network context, and runs the binary
//! through a [`ProcessRunner`] so tests can swap the real process for a
//! double.
//!
//! ```no_run
//! use adakit_exec::{CommandArgs, Dispatcher, SystemRunner};
//! use adakit_types::NetworkContext;
//!
//! let dispatcher = Dispatcher::new(SystemRunner::default());
//! let ctx = NetworkContext::from_env();
//! let output = dispatcher.dispatch("query-tip", &CommandArgs::new(), &ctx)?;
//! println!("{}", output.text());
//! # Ok::<(), adakit_exec::DispatchError>(())
//! ```

pub mod dispatch;
pub mod error;
pub mod registry;
pub mod runner;

pub use dispatch::{CommandArgs, CommandOutput, Dispatcher, DEFAULT_PROGRAM, DEFAULT_TIMEOUT};
pub use error::{DispatchError, DispatchResult};
pub use registry::{descriptors, lookup, CommandDescriptor, ParamKind, ParamSpec};
pub use runner::{Invocation, ProcessOutput, ProcessRunner, RunError, SystemRunner};
