//! Logging configuration and progress output

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{ReelcutError, ReelcutResult};

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// General information
    Info,
    /// Debug information
    Debug,
    /// Very verbose debug information
    Trace,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level: &str) -> ReelcutResult<Self> {
        match level.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(ReelcutError::ConfigError {
                message: format!(
                    "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                    level
                ),
            }),
        }
    }

    /// Directive understood by `EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format
    Pretty,
    /// Compact single-line format
    Compact,
    /// JSON format for structured logging
    Json,
}

impl LogFormat {
    pub fn parse(format: &str) -> ReelcutResult<Self> {
        match format.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(ReelcutError::ConfigError {
                message: format!(
                    "Invalid log format: {}. Valid formats: pretty, compact, json",
                    format
                ),
            }),
        }
    }
}

/// Logging configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
        }
    }
}

impl LoggingConfig {
    pub fn parse(level: &str, format: &str) -> ReelcutResult<Self> {
        Ok(Self {
            level: LogLevel::parse(level)?,
            format: LogFormat::parse(format)?,
        })
    }

    /// Install the global subscriber, writing to stderr.
    ///
    /// `RUST_LOG` wins over the configured level. A second call is a no-op, so
    /// tests and embedding callers can initialize freely.
    pub fn init(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_filter()));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let _ = match self.format {
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Compact => builder.compact().try_init(),
            LogFormat::Json => builder.json().try_init(),
        };

        tracing::debug!(
            "Logging initialized: level={:?} format={:?}",
            self.level,
            self.format
        );
    }
}

/// Progress reporter for long-running operations
pub struct ProgressReporter {
    operation: String,
    start_time: Instant,
    last_percent: Option<u8>,
}

impl ProgressReporter {
    /// Start reporting on a new operation
    pub fn start(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        tracing::info!("Starting: {}", operation);
        Self {
            operation,
            start_time: Instant::now(),
            last_percent: None,
        }
    }

    /// Render a progress bar line, or `None` when the percentage has not moved
    pub fn update(&mut self, percent: u8) -> Option<String> {
        let percent = percent.min(100);
        if self.last_percent == Some(percent) {
            return None;
        }
        self.last_percent = Some(percent);

        let bar_length = 20;
        let filled = percent as usize * bar_length / 100;
        Some(format!(
            "[{}{}] {:>3}% {}",
            "#".repeat(filled),
            "-".repeat(bar_length - filled),
            percent,
            self.operation
        ))
    }

    /// Log completion of the operation
    pub fn finish(&self, success: bool) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if success {
            tracing::info!("{} completed in {:.2}s", self.operation, elapsed);
        } else {
            tracing::error!("{} failed after {:.2}s", self.operation, elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("INFO").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::parse("warning").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::parse("trace").unwrap().as_filter(), "trace");
        assert!(LogLevel::parse("verbose").is_err());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::parse("Pretty").unwrap(), LogFormat::Pretty);
        assert!(LogFormat::parse("xml").is_err());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = LoggingConfig::default();
        config.init();
        config.init();
    }

    #[test]
    fn test_progress_reporter_dedupes() {
        let mut reporter = ProgressReporter::start("edit");
        let line = reporter.update(50).unwrap();
        assert_eq!(line, "[##########----------]  50% edit");
        assert!(reporter.update(50).is_none());
        assert!(reporter.update(200).unwrap().contains("100%"));
        reporter.finish(true);
    }
}
