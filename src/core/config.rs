//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.greetlist/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::seed::{DEFAULT_LABEL_PREFIX, DEFAULT_ROW_COUNT};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GreetConfig {
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SeedConfig {
    pub rows: Option<usize>,
    pub label_prefix: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
    pub level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "greetlist.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub rows: usize,
    pub label_prefix: String,
    /// When set, labels come from this file instead of being generated.
    pub seed_file: Option<PathBuf>,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    /// Values that were ignored during resolution. Resolution runs before
    /// the logger exists, so the caller logs these once it is up.
    pub warnings: Vec<String>,
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub seed_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.greetlist/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".greetlist").join("config.toml"))
}

/// Load config from `~/.greetlist/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GreetConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<GreetConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(GreetConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<GreetConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(GreetConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: GreetConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# greetlist configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [seed]
# rows = 1000                        # Or set GREETLIST_ROWS
# label_prefix = "Hello Android #"   # Or set GREETLIST_LABEL_PREFIX
# file = "labels.txt"                # One label per line, or a JSON array for *.json

# [logging]
# file = "greetlist.log"
# level = "info"                     # "error", "warn", "info", "debug", "trace", "off"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &GreetConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment supplied by `env`.
pub fn resolve_with_env<F>(config: &GreetConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();

    // Rows: CLI → env → config → default
    let rows = cli
        .rows
        .or_else(|| {
            env("GREETLIST_ROWS").and_then(|v| parse_or_note("GREETLIST_ROWS", &v, &mut warnings))
        })
        .or(config.seed.rows)
        .unwrap_or(DEFAULT_ROW_COUNT);

    // Label prefix: env → config → default
    let label_prefix = env("GREETLIST_LABEL_PREFIX")
        .or_else(|| config.seed.label_prefix.clone())
        .unwrap_or_else(|| DEFAULT_LABEL_PREFIX.to_string());

    // Seed file: CLI → env → config
    let seed_file = cli
        .seed_file
        .clone()
        .or_else(|| env("GREETLIST_SEED_FILE").map(PathBuf::from))
        .or_else(|| config.seed.file.clone());

    let log_file = config
        .logging
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env("GREETLIST_LOG_LEVEL"))
        .or_else(|| config.logging.level.clone())
        .and_then(|v| parse_or_note("log level", &v, &mut warnings))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        rows,
        label_prefix,
        seed_file,
        log_file,
        log_level,
        warnings,
    }
}

fn parse_or_note<T: std::str::FromStr>(
    what: &str,
    value: &str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warnings.push(format!("Ignoring invalid {}: {:?}", what, value));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = GreetConfig::default();
        assert!(config.seed.rows.is_none());
        assert!(config.seed.file.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&GreetConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.rows, 1000);
        assert_eq!(resolved.label_prefix, "Hello Android #");
        assert_eq!(resolved.seed_file, None);
        assert_eq!(resolved.log_file, PathBuf::from("greetlist.log"));
        assert_eq!(resolved.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = GreetConfig {
            seed: SeedConfig {
                rows: Some(20),
                label_prefix: Some("Row ".to_string()),
                file: Some(PathBuf::from("labels.txt")),
            },
            logging: LoggingConfig {
                file: Some(PathBuf::from("/tmp/g.log")),
                level: Some("debug".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.rows, 20);
        assert_eq!(resolved.label_prefix, "Row ");
        assert_eq!(resolved.seed_file, Some(PathBuf::from("labels.txt")));
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/g.log"));
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_env_overrides_config() {
        let config = GreetConfig {
            seed: SeedConfig {
                rows: Some(20),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "GREETLIST_ROWS" => Some("7".to_string()),
            "GREETLIST_LABEL_PREFIX" => Some("Env #".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.rows, 7);
        assert_eq!(resolved.label_prefix, "Env #");
    }

    #[test]
    fn test_resolve_cli_wins() {
        let env = |key: &str| match key {
            "GREETLIST_ROWS" => Some("7".to_string()),
            "GREETLIST_LOG_LEVEL" => Some("warn".to_string()),
            _ => None,
        };
        let cli = CliOverrides {
            rows: Some(3),
            seed_file: Some(PathBuf::from("cli.json")),
            log_level: Some("trace".to_string()),
        };
        let resolved = resolve_with_env(&GreetConfig::default(), &cli, env);
        assert_eq!(resolved.rows, 3);
        assert_eq!(resolved.seed_file, Some(PathBuf::from("cli.json")));
        assert_eq!(resolved.log_level, LevelFilter::Trace);
    }

    #[test]
    fn test_invalid_env_value_falls_through() {
        let env = |key: &str| (key == "GREETLIST_ROWS").then(|| "lots".to_string());
        let resolved = resolve_with_env(&GreetConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.rows, 1000);
        assert_eq!(resolved.warnings, vec![r#"Ignoring invalid GREETLIST_ROWS: "lots""#]);
    }

    #[test]
    fn test_invalid_log_level_is_reported() {
        let cli = CliOverrides {
            log_level: Some("chatty".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with_env(&GreetConfig::default(), &cli, no_env);
        assert_eq!(resolved.log_level, LevelFilter::Info);
        assert_eq!(resolved.warnings.len(), 1);
        assert!(resolved.warnings[0].contains("chatty"));
    }

    #[test]
    fn test_clean_resolution_has_no_warnings() {
        let resolved = resolve_with_env(&GreetConfig::default(), &CliOverrides::default(), no_env);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[seed]
rows = 12
"#;
        let config: GreetConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.seed.rows, Some(12));
        assert!(config.seed.label_prefix.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.seed.rows.is_none());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# [seed]"));
        // Everything is commented out, so it parses to the defaults.
        let reparsed: GreetConfig = toml::from_str(&written).unwrap();
        assert!(reparsed.seed.file.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[seed]\nrows = \"many\"\n").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
