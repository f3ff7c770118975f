//! Maps command names to `cardano-cli` invocations and runs them.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use adakit_types::{NetworkContext, SOCKET_PATH_VAR};
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::error::{DispatchError, DispatchResult};
use crate::registry::{lookup, CommandDescriptor, NETWORK_MAGIC_KEY};
use crate::runner::{Invocation, ProcessRunner, RunError};

/// Binary invoked when none is configured.
pub const DEFAULT_PROGRAM: &str = "cardano-cli";

/// Deadline applied to every invocation when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"))
}

/// Named arguments supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs(BTreeMap<String, String>);

impl CommandArgs {
    /// Empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a path argument.
    pub fn with_path(self, name: impl Into<String>, path: &Path) -> Self {
        self.with(name, path.to_string_lossy().into_owned())
    }

    /// Add or replace an argument.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Get an argument's value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterate arguments in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Standard output of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    stdout: Vec<u8>,
}

impl CommandOutput {
    /// Raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.stdout
    }

    /// Output as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }
}

/// Validates, renders and runs registered commands.
///
/// Holds no state between calls; every dispatch is independent.
#[derive(Debug, Clone)]
pub struct Dispatcher<R> {
    runner: R,
    program: PathBuf,
    timeout: Duration,
}

impl<R: ProcessRunner> Dispatcher<R> {
    /// Create a dispatcher running `cardano-cli` from `PATH`.
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            program: PathBuf::from(DEFAULT_PROGRAM),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use a different binary.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a different deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The process runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// The binary being invoked.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The deadline applied to each invocation.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the named command.
    ///
    /// Unknown names, bad arguments and an incomplete context are all
    /// rejected before any process is spawned.
    pub fn dispatch(
        &self,
        name: &str,
        args: &CommandArgs,
        context: &NetworkContext,
    ) -> DispatchResult<CommandOutput> {
        let descriptor = lookup(name).ok_or_else(|| DispatchError::UnknownCommand {
            name: name.to_string(),
        })?;
        let invocation = self.prepare(descriptor, args, context)?;

        debug!(
            command = name,
            summary = descriptor.summary,
            argv = %invocation.display(),
            "dispatching"
        );
        let output = self
            .runner
            .run(&invocation, self.timeout)
            .map_err(|e| match e {
                RunError::Spawn { program, source } => DispatchError::Spawn { program, source },
                RunError::Timeout(after) => DispatchError::Timeout {
                    command: name.to_string(),
                    after,
                },
                RunError::Io(e) => DispatchError::Io(e),
            })?;

        if !output.is_success() {
            let exit_code = output.exit_code.unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
            warn!(command = name, exit_code, stderr = %stderr, "command failed");
            return Err(DispatchError::ExternalFailure {
                command: name.to_string(),
                exit_code,
                stderr,
            });
        }

        Ok(CommandOutput {
            stdout: output.stdout,
        })
    }

    /// Build the invocation for a descriptor without running it.
    pub fn prepare(
        &self,
        descriptor: &CommandDescriptor,
        args: &CommandArgs,
        context: &NetworkContext,
    ) -> DispatchResult<Invocation> {
        check_args(descriptor, args)?;

        let socket_path = if descriptor.requires_node {
            Some(context.require_socket_path()?)
        } else {
            None
        };

        let argv = render(descriptor, args, context)?;
        let mut invocation = Invocation::new(self.program.clone(), argv);
        if let Some(path) = socket_path {
            invocation = invocation.with_env(SOCKET_PATH_VAR, path);
        }
        Ok(invocation)
    }
}

/// Check supplied arguments against the descriptor, collecting every problem.
fn check_args(descriptor: &CommandDescriptor, args: &CommandArgs) -> DispatchResult<()> {
    let mut problems = Vec::new();

    for spec in descriptor.params {
        match args.get(spec.name) {
            None => problems.push(format!("missing '{}' ({})", spec.name, spec.kind)),
            Some(value) => {
                if let Err(reason) = spec.kind.check(value) {
                    problems.push(format!("'{}' {}, got {:?}", spec.name, reason, value));
                }
            }
        }
    }
    for (name, _) in args.iter() {
        if descriptor.param(name).is_none() {
            problems.push(format!("unexpected '{}'", name));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(DispatchError::InvalidArguments {
            command: descriptor.name.to_string(),
            problems,
        })
    }
}

fn render(
    descriptor: &CommandDescriptor,
    args: &CommandArgs,
    context: &NetworkContext,
) -> DispatchResult<Vec<String>> {
    let resolve = |name: &str| -> Option<String> {
        if name == NETWORK_MAGIC_KEY {
            Some(context.network_magic().to_string())
        } else {
            args.get(name).map(str::to_string)
        }
    };

    let re = placeholder_re();
    let mut argv = Vec::with_capacity(descriptor.template.len());
    for token in descriptor.template {
        let missing: Vec<String> = re
            .captures_iter(token)
            .filter(|caps| resolve(&caps[1]).is_none())
            .map(|caps| format!("missing '{}'", &caps[1]))
            .collect();
        if !missing.is_empty() {
            return Err(DispatchError::InvalidArguments {
                command: descriptor.name.to_string(),
                problems: missing,
            });
        }
        let rendered = re.replace_all(token, |caps: &Captures| resolve(&caps[1]).unwrap_or_default());
        argv.push(rendered.into_owned());
    }
    Ok(argv)
}
