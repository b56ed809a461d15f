// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Raw format metadata as reported by the media prober.
///
/// ffprobe prints numeric fields as strings and omits them when unknown, so
/// both fields stay unparsed here. Normalization happens in
/// [`crate::domain::rules`], where garbage becomes zero instead of an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeMetadata {
    pub duration: Option<String>,
    pub size: Option<String>,
}

impl ProbeMetadata {
    /// Metadata with well-formed numeric values
    pub fn new(duration_seconds: f64, size_bytes: u64) -> Self {
        Self {
            duration: Some(duration_seconds.to_string()),
            size: Some(size_bytes.to_string()),
        }
    }

    /// Metadata with arbitrary raw field values
    pub fn raw(duration: Option<&str>, size: Option<&str>) -> Self {
        Self {
            duration: duration.map(str::to_string),
            size: size.map(str::to_string),
        }
    }
}

/// Outcome of probing one input path.
///
/// A batch probe returns exactly one outcome per input element, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProbeOutcome {
    Success {
        path: String,
        duration_seconds: f64,
        size_bytes: u64,
    },
    Failure {
        path: String,
        error: String,
    },
}

impl ProbeOutcome {
    /// The input path this outcome describes
    pub fn path(&self) -> &str {
        match self {
            ProbeOutcome::Success { path, .. } | ProbeOutcome::Failure { path, .. } => path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        match self {
            ProbeOutcome::Success { duration_seconds, .. } => Some(*duration_seconds),
            ProbeOutcome::Failure { .. } => None,
        }
    }

    pub fn size_bytes(&self) -> Option<u64> {
        match self {
            ProbeOutcome::Success { size_bytes, .. } => Some(*size_bytes),
            ProbeOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Success { .. } => None,
            ProbeOutcome::Failure { error, .. } => Some(error),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Success {
                path,
                duration_seconds,
                size_bytes,
            } => write!(f, "{}: {:.3}s, {} bytes", path, duration_seconds, size_bytes),
            ProbeOutcome::Failure { path, error } => write!(f, "{}: error: {}", path, error),
        }
    }
}

/// A user-supplied time range, kept as entered (`H:MM:SS`, `M:SS` or seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

impl TimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parse the `START-END` form used on the command line
    pub fn parse(text: &str) -> Option<Self> {
        let (start, end) = text.trim().split_once('-')?;
        if start.trim().is_empty() || end.trim().is_empty() {
            return None;
        }
        Some(Self::new(start.trim(), end.trim()))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Display record for one video in a folder listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoFile {
    pub name: String,
    pub path: String,
    pub duration: String,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_path: Option<String>,
}

/// One cue of an SRT subtitle file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    pub index: u32,
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
}

/// One timed word or word piece reported by a transcriber
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptToken {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// One transcribed stretch of audio, optionally broken into tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default)]
    pub tokens: Vec<TranscriptToken>,
}

/// Subtitles written for a video by a transcription run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub srt_path: PathBuf,
    pub subtitles: Vec<SubtitleEntry>,
}

/// Prompt settings used by the subtitle content review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSettings {
    pub content_criteria: String,
    pub priority_guidelines: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            content_criteria: "\
1. Adult relationships (kissing, romantic/sexual content, dating)
2. Bad morals or unethical behavior
3. Content against Islamic values and aqeedah (belief system)
4. Magic, sorcery, or supernatural practices
5. Music references or musical performances
6. Violence or frightening content
7. Inappropriate language or themes"
                .to_string(),
            priority_guidelines: "\
Priority Guidelines:
- HIGH: Major issues in aqeedah (celebrating Christmas, promoting shirk), explicit magic/sorcery, sexual content
- MEDIUM: Questionable behavior, offensive language (stupid, dumb), moderate violence, dating/romance
- LOW: Mildly scary content, ambiguous references, minor concerns

Examples:
- \"Let's celebrate Christmas!\" → HIGH (aqeedah violation)
- \"She cast a spell on him\" → HIGH (sorcery)
- \"You're so stupid!\" → MEDIUM (offensive language)
- \"That monster looks scary\" → LOW (mild fright)"
                .to_string(),
        }
    }
}

/// Progress notification emitted while an edit runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum EditEvent {
    /// Overall progress, 0-100
    Progress { percent: u8 },
    /// The edited file is in place
    Complete { output: PathBuf },
    /// The edit was abandoned
    Failed { message: String },
}

#[cfg(test)]
mod tests;
