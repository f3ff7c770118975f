//! In-memory implementation of `ProcessRunner` for testing.
//!
//! Responses are scripted in order and every invocation is recorded, so
//! tests can assert both what was run and that nothing was run at all.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use adakit_exec::{Invocation, ProcessOutput, ProcessRunner, RunError};

type Handler = Box<dyn Fn(&Invocation) -> ProcessOutput + Send + Sync>;

/// One scripted reaction to an invocation.
pub enum MockResponse {
    /// Return this output.
    Output(ProcessOutput),
    /// Report that the deadline passed.
    Timeout,
    /// Compute the output from the invocation (e.g. to write `--out-file`).
    Handler(Handler),
}

struct MockRunnerInner {
    /// Responses consumed front to back.
    responses: VecDeque<MockResponse>,
    /// Every invocation received, in order.
    invocations: Vec<Invocation>,
}

/// A scripted `ProcessRunner` that never spawns a process.
///
/// Uses `Arc<RwLock<...>>` internally, so clones share state: keep one
/// clone in the test and hand the other to the dispatcher.
#[derive(Clone)]
pub struct MockRunner {
    inner: Arc<RwLock<MockRunnerInner>>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    /// Create a runner with no scripted responses.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MockRunnerInner {
                responses: VecDeque::new(),
                invocations: Vec::new(),
            })),
        }
    }

    /// Queue a response.
    pub fn push(&self, response: MockResponse) -> &Self {
        self.inner.write().unwrap().responses.push_back(response);
        self
    }

    /// Queue a zero exit with the given stdout.
    pub fn push_success(&self, stdout: impl Into<Vec<u8>>) -> &Self {
        self.push(MockResponse::Output(ProcessOutput::success(stdout)))
    }

    /// Queue a non-zero exit with the given stderr.
    pub fn push_failure(&self, exit_code: i32, stderr: impl Into<Vec<u8>>) -> &Self {
        self.push(MockResponse::Output(ProcessOutput::failure(exit_code, stderr)))
    }

    /// Queue a timeout.
    pub fn push_timeout(&self) -> &Self {
        self.push(MockResponse::Timeout)
    }

    /// Queue a response computed from the invocation.
    pub fn push_with<F>(&self, handler: F) -> &Self
    where
        F: Fn(&Invocation) -> ProcessOutput + Send + Sync + 'static,
    {
        self.push(MockResponse::Handler(Box::new(handler)))
    }

    // =========================================================================
    // Assertion Helpers
    // =========================================================================

    /// All invocations received.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.inner.read().unwrap().invocations.clone()
    }

    /// Number of processes that would have been spawned.
    pub fn spawn_count(&self) -> usize {
        self.inner.read().unwrap().invocations.len()
    }

    /// The most recent invocation.
    pub fn last_invocation(&self) -> Option<Invocation> {
        self.inner.read().unwrap().invocations.last().cloned()
    }

    /// Scripted responses not yet consumed.
    pub fn pending_responses(&self) -> usize {
        self.inner.read().unwrap().responses.len()
    }

    /// Panic if anything was run.
    pub fn assert_not_spawned(&self) {
        let invocations = self.invocations();
        assert!(
            invocations.is_empty(),
            "expected no process to be spawned, got: {:?}",
            invocations.iter().map(Invocation::display).collect::<Vec<_>>()
        );
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, invocation: &Invocation, timeout: Duration) -> Result<ProcessOutput, RunError> {
        let response = {
            let mut inner = self.inner.write().unwrap();
            inner.invocations.push(invocation.clone());
            inner.responses.pop_front()
        };

        match response {
            Some(MockResponse::Output(output)) => Ok(output),
            Some(MockResponse::Timeout) => Err(RunError::Timeout(timeout)),
            Some(MockResponse::Handler(handler)) => Ok(handler(invocation)),
            None => Err(RunError::Spawn {
                program: invocation.program.display().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "mock: no scripted response"),
            }),
        }
    }
}
