//! FFprobe adapter for media file probing
//!
//! Shells out to `ffprobe -v error -print_format json -show_format` and reads
//! the `format.duration` / `format.size` fields from its JSON output.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFprobe-based probe adapter
#[derive(Debug, Clone)]
pub struct FFprobeAdapter {
    ffprobe_bin: PathBuf,
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: FfprobeFormat,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    size: Option<String>,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter running the given binary
    pub fn new(ffprobe_bin: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_bin: ffprobe_bin.into(),
        }
    }

    /// Map ffprobe's JSON output to probe metadata
    fn parse_output(stdout: &[u8]) -> Result<ProbeMetadata, DomainError> {
        let parsed: FfprobeOutput = serde_json::from_slice(stdout).map_err(|e| {
            DomainError::ProbeFailed(format!("Unreadable ffprobe output: {}", e))
        })?;

        Ok(ProbeMetadata {
            duration: parsed.format.duration,
            size: parsed.format.size,
        })
    }
}

impl Default for FFprobeAdapter {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe(&self, path: &str) -> Result<ProbeMetadata, DomainError> {
        debug!("Running {} on {}", self.ffprobe_bin.display(), path);

        let output = Command::new(&self.ffprobe_bin)
            .args(["-v", "error", "-print_format", "json", "-show_format"])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| DomainError::tool("ffprobe", format!("failed to spawn: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            return Err(DomainError::ProbeFailed(if message.is_empty() {
                format!("ffprobe exited with {}", output.status)
            } else {
                message.to_string()
            }));
        }

        Self::parse_output(&output.stdout)
    }
}
