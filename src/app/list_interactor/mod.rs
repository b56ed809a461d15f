// List interactor - Folder listing and single-file metadata

use std::path::Path;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::domain::model::*;
use crate::domain::rules::{is_video_file, subtitle_path};
use crate::error::{ReelcutError, ReelcutResult};
use crate::probe::ProbePool;
use crate::utils::{format_duration, format_size};

/// Shown in place of duration and size when a file could not be probed
pub const UNKNOWN_VALUE: &str = "--";

/// Interactor for listing videos in a folder
pub struct ListInteractor {
    pool: ProbePool,
}

impl ListInteractor {
    /// Create new list interactor probing through `pool`
    pub fn new(pool: ProbePool) -> Self {
        Self { pool }
    }

    /// List the videos directly inside `folder`, sorted by name.
    ///
    /// Every video gets a record; files that fail to probe show
    /// [`UNKNOWN_VALUE`] instead of blocking the listing.
    pub async fn list(&self, folder: &Path) -> ReelcutResult<Vec<VideoFile>> {
        if !folder.is_dir() {
            return Err(ReelcutError::InputNotFound {
                path: folder.display().to_string(),
            });
        }

        let mut videos = Vec::new();
        for entry in WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() && is_video_file(entry.path()) {
                videos.push(entry.into_path());
            }
        }
        info!("Found {} videos in {}", videos.len(), folder.display());

        let paths: Vec<String> = videos
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect();
        let outcomes = self.pool.run(&paths).await?;

        Ok(videos
            .iter()
            .zip(outcomes.iter())
            .map(|(video, outcome)| Self::to_record(video, outcome))
            .collect())
    }

    /// Probe a single file; a probe failure is returned as an error
    pub async fn describe(&self, path: &Path) -> ReelcutResult<VideoFile> {
        let outcomes = self.pool.run(&[path.to_string_lossy().to_string()]).await?;
        match outcomes.into_iter().next() {
            Some(outcome @ ProbeOutcome::Success { .. }) => Ok(Self::to_record(path, &outcome)),
            Some(ProbeOutcome::Failure { error, .. }) => {
                Err(crate::domain::errors::DomainError::ProbeFailed(error).into())
            }
            None => Err(ReelcutError::WorkerFailed {
                message: format!("no outcome recorded for {}", path.display()),
            }),
        }
    }

    /// Map one probe outcome to its display record
    fn to_record(video: &Path, outcome: &ProbeOutcome) -> VideoFile {
        let name = video
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let (duration, size) = match outcome {
            ProbeOutcome::Success {
                duration_seconds,
                size_bytes,
                ..
            } => (format_duration(*duration_seconds), format_size(*size_bytes)),
            ProbeOutcome::Failure { path, error } => {
                warn!("Error getting metadata for {}: {}", path, error);
                (UNKNOWN_VALUE.to_string(), UNKNOWN_VALUE.to_string())
            }
        };

        let subtitle = subtitle_path(video);
        VideoFile {
            name,
            path: video.to_string_lossy().to_string(),
            duration,
            size,
            subtitle_path: subtitle
                .is_file()
                .then(|| subtitle.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::ports::ProbePort;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct NameProbe;

    #[async_trait]
    impl ProbePort for NameProbe {
        async fn probe(&self, path: &str) -> Result<ProbeMetadata, DomainError> {
            if path.contains("broken") {
                Err(DomainError::ProbeFailed("moov atom not found".to_string()))
            } else {
                Ok(ProbeMetadata::new(125.0, 2048))
            }
        }
    }

    fn interactor() -> ListInteractor {
        ListInteractor::new(ProbePool::with_concurrency(Arc::new(NameProbe), 2).unwrap())
    }

    #[tokio::test]
    async fn test_list_filters_sorts_and_maps() {
        let dir = TempDir::new().unwrap();
        for name in ["b.mkv", "a.MP4", "broken.mov", "notes.txt", "a.srt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.mp4")).unwrap();

        let videos = interactor().list(dir.path()).await.unwrap();
        let names: Vec<&str> = videos.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["a.MP4", "b.mkv", "broken.mov"]);

        assert_eq!(videos[0].duration, "2:05");
        assert_eq!(videos[0].size, "2.0 KB");
        assert!(videos[0].subtitle_path.as_deref().unwrap().ends_with("a.srt"));
        assert!(videos[1].subtitle_path.is_none());
        assert_eq!(videos[2].duration, UNKNOWN_VALUE);
        assert_eq!(videos[2].size, UNKNOWN_VALUE);
    }

    #[tokio::test]
    async fn test_list_empty_folder() {
        let dir = TempDir::new().unwrap();
        assert!(interactor().list(dir.path()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_missing_folder() {
        let result = interactor().list(Path::new("/definitely/not/here")).await;
        assert!(matches!(result, Err(ReelcutError::InputNotFound { .. })));
    }

    #[tokio::test]
    async fn test_describe() {
        let record = interactor().describe(Path::new("/v/clip.mp4")).await.unwrap();
        assert_eq!(record.name, "clip.mp4");
        assert_eq!(record.duration, "2:05");

        let err = interactor()
            .describe(Path::new("/v/broken.mp4"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "moov atom not found");
    }
}
