//! CLI configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use adakit_exec::{DEFAULT_PROGRAM, DEFAULT_TIMEOUT};

use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;

fn env_var_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
    })
}

/// Expand environment variables in a string.
/// Supports `${VAR_NAME}` syntax; unset variables are left as-is.
fn expand_env_vars(input: &str) -> String {
    env_var_re()
        .replace_all(input, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .to_string()
}

fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) if s.contains("${") => PathBuf::from(expand_env_vars(s)),
        _ => path.to_path_buf(),
    }
}

/// CLI configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// External binary configuration.
    pub cli: CardanoCliConfig,
    /// Working directory configuration.
    pub workspace: WorkspaceConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load configuration from a file.
    ///
    /// A missing file yields the defaults. `${VAR}` references in paths are
    /// expanded from the environment.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;

        config.cli.path = expand_path(&config.cli.path);
        config.workspace.dir = expand_path(&config.workspace.dir);
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn validate(&self) -> CliResult<()> {
        if self.cli.timeout_secs == 0 {
            return Err(CliError::config("cli.timeout_secs must be at least 1"));
        }
        self.display.format()?;
        Ok(())
    }
}

/// External binary configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardanoCliConfig {
    /// Path or name of the `cardano-cli` binary.
    pub path: PathBuf,
    /// Deadline for each invocation, in seconds.
    pub timeout_secs: u64,
}

impl Default for CardanoCliConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PROGRAM),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl CardanoCliConfig {
    /// Invocation deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Working directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Root of the working directory (keys, scripts, config, ...).
    pub dir: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            dir: default_work_dir(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Default output format (`human` or `json`).
    pub default_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_format: "human".to_string(),
        }
    }
}

impl DisplayConfig {
    /// Parsed default format.
    pub fn format(&self) -> CliResult<OutputFormat> {
        self.default_format.parse().map_err(CliError::config)
    }
}

/// Get the default base directory for adakit data.
///
/// Priority:
/// 1. `ADAKIT_DATA_DIR` environment variable (if set)
/// 2. Platform-specific data directory (e.g., `~/.local/share/adakit` on Linux)
/// 3. Fallback to `~/.adakit`
pub fn default_base_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ADAKIT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("io", "adakit", "adakit")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| home_dir().join(".adakit"))
}

/// Get the default config file path.
pub fn default_config_path() -> PathBuf {
    default_base_dir().join("config.toml")
}

/// Default working directory, `~/cardano`.
pub fn default_work_dir() -> PathBuf {
    home_dir().join("cardano")
}

fn home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.cli.path, PathBuf::from("cardano-cli"));
        assert_eq!(config.cli.timeout(), Duration::from_secs(60));
        assert!(config.workspace.dir.ends_with("cardano"));
        assert_eq!(config.display.format().unwrap(), OutputFormat::Human);
    }

    #[test]
    fn test_config_serialization() {
        let config = CliConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.cli.timeout_secs, parsed.cli.timeout_secs);
        assert_eq!(config.workspace.dir, parsed.workspace.dir);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = CliConfig::load(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.cli.timeout_secs, 60);
    }

    #[test]
    fn test_load_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[cli]\ntimeout_secs = 5\n\n[display]\ndefault_format = \"json\"\n")
            .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.cli.timeout_secs, 5);
        assert_eq!(config.cli.path, PathBuf::from("cardano-cli"));
        assert_eq!(config.display.format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        std::fs::write(&path, "[cli]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(CliConfig::load(&path), Err(CliError::Config(_))));

        std::fs::write(&path, "[display]\ndefault_format = \"yaml\"\n").unwrap();
        assert!(matches!(CliConfig::load(&path), Err(CliError::Config(_))));

        std::fs::write(&path, "[cli\n").unwrap();
        assert!(matches!(CliConfig::load(&path), Err(CliError::Toml(_))));
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let mut config = CliConfig::default();
        config.workspace.dir = temp.path().join("work");
        config.cli.timeout_secs = 15;

        config.save(&path).unwrap();
        let loaded = CliConfig::load(&path).unwrap();
        assert_eq!(loaded.workspace.dir, temp.path().join("work"));
        assert_eq!(loaded.cli.timeout_secs, 15);
    }

    #[test]
    fn test_expand_env_vars() {
        std::env::set_var("ADAKIT_TEST_HOME", "/srv/pool");

        assert_eq!(expand_env_vars("${ADAKIT_TEST_HOME}/cardano"), "/srv/pool/cardano");

        // Unset variable should remain as-is
        assert_eq!(
            expand_env_vars("${ADAKIT_NONEXISTENT_12345}"),
            "${ADAKIT_NONEXISTENT_12345}"
        );

        assert_eq!(
            expand_path(Path::new("${ADAKIT_TEST_HOME}/bin/cardano-cli")),
            PathBuf::from("/srv/pool/bin/cardano-cli")
        );
    }
}
