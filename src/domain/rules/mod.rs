// Domain rules - Business logic and policies

use std::path::{Path, PathBuf};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::utils::time::parse_time_to_seconds;

/// Container extensions treated as videos when listing a folder
pub const VIDEO_EXTENSIONS: [&str; 7] = ["mp4", "mov", "avi", "mkv", "webm", "flv", "wmv"];

/// Concurrency policy for batch probing
pub struct ConcurrencyPolicy;

impl ConcurrencyPolicy {
    /// Fewest probes kept in flight when the caller does not choose
    pub const MIN_WORKERS: usize = 2;
    /// Most probes kept in flight when the caller does not choose
    pub const MAX_WORKERS: usize = 6;

    /// Default probe concurrency for a host with `host_parallelism` CPUs
    pub fn default_for(host_parallelism: usize) -> usize {
        host_parallelism.clamp(Self::MIN_WORKERS, Self::MAX_WORKERS)
    }

    /// Default probe concurrency for the current machine
    pub fn host_default() -> usize {
        Self::default_for(num_cpus::get())
    }

    /// Number of workers to start: never more than there is work for
    pub fn worker_count(max_concurrent: usize, pending: usize) -> usize {
        max_concurrent.min(pending)
    }
}

/// Turns raw prober fields into non-negative numbers
pub struct ProbeNormalizer;

impl ProbeNormalizer {
    /// Duration in seconds; missing, non-numeric, non-finite or negative values become 0
    pub fn duration_seconds(raw: Option<&str>) -> f64 {
        raw.and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(0.0)
    }

    /// Size in bytes; fractional values are truncated, anything unusable becomes 0.
    ///
    /// Any float form is accepted, so `"1e3"` reads as 1000 rather than stopping at the `e`.
    pub fn size_bytes(raw: Option<&str>) -> u64 {
        let Some(value) = raw.map(str::trim) else {
            return 0;
        };
        if let Ok(bytes) = value.parse::<u64>() {
            return bytes;
        }
        value
            .parse::<f64>()
            .ok()
            .filter(|bytes| bytes.is_finite() && *bytes >= 0.0)
            .map(|bytes| bytes.trunc() as u64)
            .unwrap_or(0)
    }

    /// Build the success outcome for `path`
    pub fn outcome(path: &str, metadata: &ProbeMetadata) -> ProbeOutcome {
        ProbeOutcome::Success {
            path: path.to_string(),
            duration_seconds: Self::duration_seconds(metadata.duration.as_deref()),
            size_bytes: Self::size_bytes(metadata.size.as_deref()),
        }
    }
}

/// Render any error as a display string for a failure outcome
pub fn describe_error(error: &(dyn std::error::Error + 'static)) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        "unknown probe error".to_string()
    } else {
        message
    }
}

/// Checks whether a path looks like a video by its extension
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Subtitle file that belongs to a video: same folder and stem, `.srt` extension
pub fn subtitle_path(video: &Path) -> PathBuf {
    video.with_extension("srt")
}

/// Validation of edit time ranges
pub struct RangeValidator;

impl RangeValidator {
    /// Resolve ranges into `(start, end)` seconds, rejecting empty or inverted ranges
    pub fn resolve(ranges: &[TimeRange]) -> Result<Vec<(f64, f64)>, DomainError> {
        if ranges.is_empty() {
            return Err(DomainError::BadArgs(
                "At least one time range is required".to_string(),
            ));
        }

        ranges
            .iter()
            .map(|range| {
                let start = parse_time_to_seconds(&range.start)?;
                let end = parse_time_to_seconds(&range.end)?;
                if end <= start {
                    return Err(DomainError::InvalidTimeRange(format!(
                        "end ({}) must be after start ({})",
                        range.end, range.start
                    )));
                }
                Ok((start, end))
            })
            .collect()
    }
}
