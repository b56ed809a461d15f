//! Configuration initialization and hierarchy management

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::adapters::toml_config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::cli::{Cli, Commands};

/// Resolve configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<AppConfig> {
    resolve_configuration(cli, Path::new(DEFAULT_CONFIG_FILE), |key| {
        std::env::var(key).ok()
    })
}

/// Same as [`initialize_configuration_hierarchy`] with the fallback config
/// file and environment supplied by the caller
pub fn resolve_configuration<F>(cli: &Cli, fallback_file: &Path, env: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    // Step 1: defaults, replaced by the file when there is one
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None if fallback_file.is_file() => AppConfig::load(fallback_file)
            .with_context(|| format!("Failed to load config file {}", fallback_file.display()))?,
        None => AppConfig::default(),
    };

    // Step 2: environment
    let env_overrides = config
        .apply_env(env)
        .context("Invalid environment override")?;
    if env_overrides > 0 {
        debug!("Applied {} environment variable overrides", env_overrides);
    }

    // Step 3: command line
    let cli_overrides = apply_cli_overrides(&mut config, cli);
    if cli_overrides > 0 {
        debug!("Applied {} CLI configuration overrides", cli_overrides);
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> usize {
    let mut applied = 0;

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
        applied += 1;
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
        applied += 1;
    }
    if let Commands::Probe(args) = &cli.command {
        if let Some(max) = args.max_concurrent {
            config.probe.max_concurrent = Some(max);
            applied += 1;
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReelcutError;
    use clap::Parser;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file() {
        let cli = Cli::parse_from(["reelcut", "list", "."]);
        let config = resolve_configuration(&cli, Path::new("/no/such/reelcut.toml"), no_env).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_precedence_cli_over_env_over_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &file,
            "[probe]\nmax_concurrent = 2\nffprobe_bin = \"/file/ffprobe\"\n\n[logging]\nlevel = \"warn\"\n",
        )
        .unwrap();

        let env = |key: &str| match key {
            "REELCUT_MAX_CONCURRENT" => Some("3".to_string()),
            "REELCUT_LOG_LEVEL" => Some("debug".to_string()),
            _ => None,
        };

        let cli = Cli::parse_from(["reelcut", "probe", "a.mp4", "--max-concurrent", "5"]);
        let config = resolve_configuration(&cli, &file, env).unwrap();
        assert_eq!(config.probe.max_concurrent, Some(5));
        assert_eq!(config.probe.ffprobe_bin, "/file/ffprobe");
        assert_eq!(config.logging.level, "debug");

        let cli = Cli::parse_from(["reelcut", "--log-level", "error", "list", "."]);
        let config = resolve_configuration(&cli, &file, env).unwrap();
        assert_eq!(config.probe.max_concurrent, Some(3));
        assert_eq!(config.logging.level, "error");
    }

    #[test]
    fn test_non_positive_concurrency_is_rejected() {
        let cli = Cli::parse_from(["reelcut", "probe", "a.mp4", "--max-concurrent", "-1"]);
        let err = resolve_configuration(&cli, Path::new("/no/such/file"), no_env).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReelcutError>(),
            Some(ReelcutError::InvalidConcurrency { value: -1 })
        ));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let cli = Cli::parse_from(["reelcut", "--config", "/no/such/file.toml", "list", "."]);
        assert!(resolve_configuration(&cli, Path::new("/no/such/file"), no_env).is_err());
    }
}
