//! Command transcriber adapter
//!
//! Runs a configured speech-to-text program with the media path as its last
//! argument. The program prints a JSON array of segments on stdout:
//! `[{"start": 0.0, "end": 2.5, "text": "...", "tokens": [{"start", "end", "text"}]}]`,
//! where `tokens` may be omitted.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Transcriber backed by an external program
#[derive(Debug, Clone)]
pub struct CommandTranscriber {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandTranscriber {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "transcriber".to_string())
    }

    fn parse_output(stdout: &[u8]) -> Result<Vec<TranscriptSegment>, DomainError> {
        serde_json::from_slice(stdout)
            .map_err(|e| DomainError::InvalidFormat(format!("Unreadable transcript: {}", e)))
    }
}

#[async_trait]
impl TranscribePort for CommandTranscriber {
    async fn transcribe(&self, media: &Path) -> Result<Vec<TranscriptSegment>, DomainError> {
        let tool = self.tool_name();
        debug!("Running {} on {}", self.program.display(), media.display());

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(media)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| DomainError::tool(&tool, format!("failed to spawn: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::tool(
                &tool,
                format!("exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let segments = Self::parse_output(&output.stdout)?;
        info!("Transcribed {} segments from {}", segments.len(), media.display());
        Ok(segments)
    }
}
