// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe one media file for its duration and size.
    ///
    /// Errors are per file; callers probing many files record them and move on.
    async fn probe(&self, path: &str) -> Result<ProbeMetadata, DomainError>;
}

/// Progress callback for a running transcode, in percent of the current job
pub type ProgressSink = UnboundedSender<u8>;

/// Port for video slicing and joining
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Re-encode `[start, end)` seconds of `input` into `output`
    async fn slice(
        &self,
        input: &Path,
        output: &Path,
        start: f64,
        end: f64,
        progress: Option<ProgressSink>,
    ) -> Result<(), DomainError>;

    /// Join `inputs` in order into `output` without re-encoding.
    ///
    /// `total_seconds` is the combined length, used only for progress.
    async fn concat(
        &self,
        inputs: &[&Path],
        output: &Path,
        total_seconds: f64,
        progress: Option<ProgressSink>,
    ) -> Result<(), DomainError>;
}

/// Port for prompt settings persistence
#[async_trait]
pub trait SettingsPort: Send + Sync {
    /// Load settings, creating the store with defaults when missing
    async fn load(&self) -> PromptSettings;

    /// Persist settings
    async fn save(&self, settings: &PromptSettings) -> Result<(), DomainError>;
}

/// Port for speech-to-text transcription
#[async_trait]
pub trait TranscribePort: Send + Sync {
    /// Transcribe the audio of `media` into timed segments
    async fn transcribe(&self, media: &Path) -> Result<Vec<TranscriptSegment>, DomainError>;
}
