// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ReelcutError, ReelcutResult};
use crate::probe::validate_concurrency;
use crate::utils::logging::{LogFormat, LogLevel};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "reelcut.toml";

/// Probe section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub ffprobe_bin: String,
    /// Unset means the host default (CPU count clamped to 2..=6)
    pub max_concurrent: Option<i64>,
    /// Unset means no per-probe timeout
    pub timeout_secs: Option<u64>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffprobe_bin: "ffprobe".to_string(),
            max_concurrent: None,
            timeout_secs: None,
        }
    }
}

/// Edit section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    pub ffmpeg_bin: String,
    pub video_codec: String,
    pub audio_codec: String,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            ffmpeg_bin: "ffmpeg".to_string(),
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
        }
    }
}

/// Logging section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// Settings store section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSection {
    /// Unset means `<tmp>/reelcut/settings.json`
    pub path: Option<PathBuf>,
}

/// Transcription section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscribeConfig {
    /// Speech-to-text program; unset disables `reelcut transcribe`
    pub program: Option<String>,
    /// Arguments placed before the media path
    pub args: Vec<String>,
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub probe: ProbeConfig,
    pub edit: EditConfig,
    pub logging: LoggingSection,
    pub settings: SettingsSection,
    pub transcribe: TranscribeConfig,
}

impl AppConfig {
    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> ReelcutResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ReelcutResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReelcutError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize configuration to TOML text
    pub fn to_toml_string(&self) -> ReelcutResult<String> {
        toml::to_string_pretty(self).map_err(|e| ReelcutError::ConfigError {
            message: format!("Failed to serialize config: {}", e),
        })
    }

    /// Apply `REELCUT_*` overrides through `lookup`, returning how many were applied
    pub fn apply_env<F>(&mut self, lookup: F) -> ReelcutResult<usize>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = 0;

        if let Some(value) = lookup("REELCUT_FFPROBE_BIN") {
            self.probe.ffprobe_bin = value;
            applied += 1;
        }
        if let Some(value) = lookup("REELCUT_MAX_CONCURRENT") {
            let parsed = value.trim().parse::<i64>().map_err(|_| ReelcutError::ConfigError {
                message: format!("REELCUT_MAX_CONCURRENT is not an integer: {}", value),
            })?;
            self.probe.max_concurrent = Some(parsed);
            applied += 1;
        }
        if let Some(value) = lookup("REELCUT_PROBE_TIMEOUT_SECS") {
            let parsed = value.trim().parse::<u64>().map_err(|_| ReelcutError::ConfigError {
                message: format!("REELCUT_PROBE_TIMEOUT_SECS is not an integer: {}", value),
            })?;
            self.probe.timeout_secs = Some(parsed);
            applied += 1;
        }
        if let Some(value) = lookup("REELCUT_FFMPEG_BIN") {
            self.edit.ffmpeg_bin = value;
            applied += 1;
        }
        if let Some(value) = lookup("REELCUT_LOG_LEVEL") {
            self.logging.level = value;
            applied += 1;
        }
        if let Some(value) = lookup("REELCUT_TRANSCRIBER") {
            self.transcribe.program = Some(value);
            applied += 1;
        }
        if let Some(value) = lookup("REELCUT_SETTINGS_PATH") {
            self.settings.path = Some(PathBuf::from(value));
            applied += 1;
        }

        Ok(applied)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ReelcutResult<()> {
        if let Some(max) = self.probe.max_concurrent {
            validate_concurrency(max)?;
        }
        if self.probe.timeout_secs == Some(0) {
            return Err(ReelcutError::ConfigError {
                message: "probe.timeout_secs must be at least 1".to_string(),
            });
        }
        LogLevel::parse(&self.logging.level)?;
        LogFormat::parse(&self.logging.format)?;
        Ok(())
    }
}
