// Transcribe interactor - Speech to SRT subtitles next to the video

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::domain::model::*;
use crate::domain::rules::subtitle_path;
use crate::error::{ReelcutError, ReelcutResult};
use crate::ports::*;
use crate::utils::{group_segments, to_srt};

/// Interactor for the transcription use case
pub struct TranscribeInteractor {
    transcriber: Arc<dyn TranscribePort>,
}

impl TranscribeInteractor {
    pub fn new(transcriber: Arc<dyn TranscribePort>) -> Self {
        Self { transcriber }
    }

    /// Transcribe `video`, split the transcript into one cue per sentence and
    /// save it as `<stem>.srt` beside the video, replacing any existing file.
    pub async fn transcribe(&self, video: &Path) -> ReelcutResult<Transcription> {
        if !video.is_file() {
            return Err(ReelcutError::InputNotFound {
                path: video.display().to_string(),
            });
        }

        let segments = self.transcriber.transcribe(video).await?;
        let subtitles = group_segments(&segments);

        let srt_path = subtitle_path(video);
        tokio::fs::write(&srt_path, to_srt(&subtitles)).await?;
        info!(
            "Saved {} subtitles to {}",
            subtitles.len(),
            srt_path.display()
        );

        Ok(Transcription {
            srt_path,
            subtitles,
        })
    }
}
