//! Initialize working directory command.

use std::path::{Path, PathBuf};

use adakit_exec::ProcessRunner;
use adakit_ops::Workspace;

use crate::context::CliContext;
use crate::error::CliResult;
use crate::output::{InitOutput, Render};

/// Execute the init command.
///
/// Creates the standard subdirectories under `dir` (or the configured
/// working directory). When no config file exists yet at `config_path`, one
/// is written pointing at the initialized directory.
pub fn init<R: ProcessRunner>(
    ctx: &CliContext<R>,
    dir: Option<PathBuf>,
    config_path: &Path,
) -> CliResult<String> {
    let workspace = match dir {
        Some(dir) => Workspace::new(dir),
        None => ctx.ops.workspace().clone(),
    };
    let report = workspace.setup()?;

    let config_path = if config_path.exists() {
        None
    } else {
        let mut config = ctx.config.clone();
        config.workspace.dir = std::path::absolute(workspace.root())?;
        config.save(config_path)?;
        Some(config_path.display().to_string())
    };

    let output = InitOutput {
        root: report.root.display().to_string(),
        created: report.created,
        existing: report.existing,
        config_path,
    };

    Ok(output.render(ctx.format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::OutputFormat;
    use adakit_test_utils::{test_context, MockRunner};
    use tempfile::TempDir;

    fn ctx(work_dir: &Path) -> CliContext<MockRunner> {
        let mut config = CliConfig::default();
        config.workspace.dir = work_dir.to_path_buf();
        CliContext::with_runner(config, OutputFormat::Json, test_context(), MockRunner::new())
    }

    #[test]
    fn test_init_creates_layout_and_config() {
        let temp = TempDir::new().unwrap();
        let work_dir = temp.path().join("cardano");
        let config_path = temp.path().join("adakit").join("config.toml");
        let ctx = ctx(&work_dir);

        let output = init(&ctx, None, &config_path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["created"].as_array().unwrap().len(), 7);
        assert!(work_dir.join("keys").is_dir());
        assert!(work_dir.join("nft").is_dir());
        assert!(config_path.exists());

        let saved = CliConfig::load(&config_path).unwrap();
        assert_eq!(saved.workspace.dir, work_dir);
    }

    #[test]
    fn test_init_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        let ctx = ctx(temp.path());

        init(&ctx, None, &config_path).unwrap();
        let output = init(&ctx, None, &config_path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert!(json["created"].as_array().unwrap().is_empty());
        assert_eq!(json["existing"].as_array().unwrap().len(), 7);
        assert!(json.get("config_path").is_none());
    }

    #[test]
    fn test_init_explicit_dir() {
        let temp = TempDir::new().unwrap();
        let ctx = ctx(&temp.path().join("unused"));
        let target = temp.path().join("pool");

        init(&ctx, Some(target.clone()), &temp.path().join("config.toml")).unwrap();

        assert!(target.join("scripts").is_dir());
        assert!(!temp.path().join("unused").exists());
    }
}
