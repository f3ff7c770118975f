//! Progress spinners for commands that wait on the node.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::output::OutputFormat;

/// Create a spinner progress bar with a message.
///
/// The spinner animates on stderr while `cardano-cli` runs.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a hidden progress bar (no-op).
///
/// Use this when stderr is not a terminal or the output is JSON.
pub fn hidden() -> ProgressBar {
    ProgressBar::hidden()
}

/// Spinner for human output on a terminal, hidden otherwise.
pub fn for_format(format: OutputFormat, msg: &str) -> ProgressBar {
    if format == OutputFormat::Human && std::io::stderr().is_terminal() {
        spinner(msg)
    } else {
        hidden()
    }
}

/// Run an operation with a spinner, returning the result.
///
/// The spinner is cleared on completion.
pub fn with_spinner<F, T>(format: OutputFormat, msg: &str, op: F) -> T
where
    F: FnOnce() -> T,
{
    let pb = for_format(format, msg);
    let result = op();
    pb.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_creation() {
        let pb = spinner("Testing...");
        pb.finish_with_message("Done");
    }

    #[test]
    fn test_hidden_creation() {
        let pb = hidden();
        pb.finish();
    }

    #[test]
    fn test_json_never_spins() {
        assert!(for_format(OutputFormat::Json, "Querying...").is_hidden());
    }

    #[test]
    fn test_with_spinner() {
        let result = with_spinner(OutputFormat::Json, "Processing...", || 42);
        assert_eq!(result, 42);
    }
}
