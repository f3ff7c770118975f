//! Subprocess execution port.
//!
//! [`ProcessRunner`] is the seam between dispatch and the operating system.
//! [`SystemRunner`] spawns real processes; tests substitute an in-memory
//! double that records invocations.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

/// A fully resolved process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Binary to run.
    pub program: PathBuf,
    /// Argument vector, one token per element.
    pub args: Vec<String>,
    /// Extra environment for the child.
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// Create an invocation with no extra environment.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            env: Vec::new(),
        }
    }

    /// Add an environment variable for the child.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Value following `flag` in the argument vector.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Value of an extra environment variable.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Shell-like rendering for logs.
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                line.push_str(&format!("{:?}", arg));
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code, `None` when the child was killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error.
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// Successful output with the given stdout.
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failure(exit_code: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the process exited with status zero.
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Failure to obtain a [`ProcessOutput`] at all.
#[derive(Debug, Error)]
pub enum RunError {
    /// The binary could not be spawned.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The deadline passed; the child was killed.
    #[error("process timed out after {0:?}")]
    Timeout(Duration),

    /// Waiting on the child or reading its pipes failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Runs an [`Invocation`] to completion.
pub trait ProcessRunner {
    /// Run synchronously, capturing stdout, stderr and the exit code.
    ///
    /// Implementations must give up and return [`RunError::Timeout`] once
    /// `timeout` has elapsed.
    fn run(&self, invocation: &Invocation, timeout: Duration) -> Result<ProcessOutput, RunError>;
}

impl<T: ProcessRunner + ?Sized> ProcessRunner for &T {
    fn run(&self, invocation: &Invocation, timeout: Duration) -> Result<ProcessOutput, RunError> {
        (**self).run(invocation, timeout)
    }
}

/// Runs invocations as real child processes.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    poll_interval: Duration,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(25),
        }
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, timeout: Duration) -> Result<ProcessOutput, RunError> {
        debug!(command = %invocation.display(), "spawning process");

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: invocation.program.display().to_string(),
                source,
            })?;

        // Drain both pipes while waiting so a chatty child cannot block on a full pipe.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let deadline = Instant::now() + timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                warn!(
                    command = %invocation.display(),
                    timeout_secs = timeout.as_secs(),
                    "process took too long, killing"
                );
                let _ = child.kill();
                let _ = child.wait();
                return Err(RunError::Timeout(timeout));
            }
            thread::sleep(self.poll_interval);
        };

        // A grandchild holding the pipes open must not outlive the deadline either.
        let stdout = collect(&stdout, deadline);
        let stderr = collect(&stderr, deadline);
        let (stdout, stderr) = match (stdout, stderr) {
            (Some(out), Some(err)) => (out?, err?),
            _ => {
                warn!(
                    command = %invocation.display(),
                    timeout_secs = timeout.as_secs(),
                    "process output still open at deadline"
                );
                return Err(RunError::Timeout(timeout));
            }
        };

        let output = ProcessOutput {
            exit_code: status.code(),
            stdout,
            stderr,
        };
        debug!(exit_code = ?output.exit_code, stdout_len = output.stdout.len(), "process finished");
        Ok(output)
    }
}

fn drain<R>(pipe: Option<R>) -> Receiver<io::Result<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = match pipe {
            Some(mut pipe) => pipe.read_to_end(&mut buf).map(|_| buf),
            None => Ok(buf),
        };
        let _ = tx.send(result);
    });
    rx
}

/// Wait for a drained pipe until `deadline`; `None` when it is still open.
fn collect(rx: &Receiver<io::Result<Vec<u8>>>, deadline: Instant) -> Option<io::Result<Vec<u8>>> {
    let remaining = deadline.saturating_duration_since(Instant::now());
    match rx.recv_timeout(remaining) {
        Ok(result) => Some(result),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => {
            Some(Err(io::Error::other("pipe reader thread panicked")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_value() {
        let inv = Invocation::new(
            "cardano-cli",
            vec![
                "query".into(),
                "tip".into(),
                "--testnet-magic".into(),
                "2".into(),
            ],
        );
        assert_eq!(inv.flag_value("--testnet-magic"), Some("2"));
        assert_eq!(inv.flag_value("--out-file"), None);
    }

    #[test]
    fn test_display_quotes_whitespace() {
        let inv = Invocation::new("cardano-cli", vec!["--mint".into(), "5 abc.4d".into()]);
        assert_eq!(inv.display(), "cardano-cli --mint \"5 abc.4d\"");
    }

    #[test]
    fn test_env_value() {
        let inv = Invocation::new("x", vec![]).with_env("A", "1");
        assert_eq!(inv.env_value("A"), Some("1"));
        assert_eq!(inv.env_value("B"), None);
    }

    #[test]
    fn test_spawn_missing_binary() {
        let inv = Invocation::new("/nonexistent/adakit-test-binary", vec![]);
        let err = SystemRunner::default()
            .run(&inv, Duration::from_secs(5))
            .unwrap_err();
        assert!(matches!(err, RunError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_output_and_exit_code() {
        let inv = Invocation::new(
            "sh",
            vec![
                "-c".into(),
                "echo out; echo err >&2; exit 3".into(),
            ],
        );
        let out = SystemRunner::default()
            .run(&inv, Duration::from_secs(10))
            .unwrap();
        assert_eq!(out.exit_code, Some(3));
        assert_eq!(out.stdout, b"out\n");
        assert_eq!(out.stderr, b"err\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_passes_environment() {
        let inv = Invocation::new("sh", vec!["-c".into(), "printf %s \"$ADAKIT_TEST_VAR\"".into()])
            .with_env("ADAKIT_TEST_VAR", "hello");
        let out = SystemRunner::default()
            .run(&inv, Duration::from_secs(10))
            .unwrap();
        assert!(out.is_success());
        assert_eq!(out.stdout, b"hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_covers_inherited_pipes() {
        let inv = Invocation::new("sh", vec!["-c".into(), "sleep 4 & echo hi".into()]);
        let started = Instant::now();
        let err = SystemRunner::default()
            .run(&inv, Duration::from_millis(300))
            .unwrap_err();
        assert!(matches!(err, RunError::Timeout(_)));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_child() {
        let inv = Invocation::new("sleep", vec!["5".into()]);
        let started = Instant::now();
        let err = SystemRunner::default()
            .run(&inv, Duration::from_millis(200))
            .unwrap_err();
        assert!(matches!(err, RunError::Timeout(_)));
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
