//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Output format for probe results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Media files to probe
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Maximum probes in flight (default: CPU count clamped to 2..=6)
    #[arg(long, allow_negative_numbers = true)]
    pub max_concurrent: Option<i64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Folder to list, or a single video to describe
    pub folder: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the edit command
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Range to keep as START-END (H:MM:SS, M:SS or seconds); repeat to keep several
    #[arg(short, long = "range", required = true)]
    pub ranges: Vec<String>,
}

/// Arguments for the subtitles command
#[derive(Args, Debug)]
pub struct SubtitlesArgs {
    /// SRT file to read
    pub file: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the transcribe command
#[derive(Args, Debug)]
pub struct TranscribeArgs {
    /// Video to transcribe; the cues are saved as <stem>.srt next to it
    pub video: PathBuf,

    /// Print the cues as JSON instead of the subtitle path
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the settings command
#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the stored settings as JSON
    Show,
    /// Restore the default settings
    Reset,
    /// Replace one or both settings fields
    Set {
        #[arg(long)]
        content_criteria: Option<String>,
        #[arg(long)]
        priority_guidelines: Option<String>,
    },
}
