//! CLI module for reelcut
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// reelcut local video editor
///
/// Lists the videos in a folder with their duration and size, keeps chosen
/// time ranges of a video, and reads or generates SRT subtitles.
#[derive(Parser, Debug)]
#[command(name = "reelcut")]
#[command(about = "reelcut - probe, slice and join local videos")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Configuration file (default: ./reelcut.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe media files for duration and size
    Probe(args::ProbeArgs),
    /// List the videos in a folder
    List(args::ListArgs),
    /// Keep only the given time ranges of a video
    Edit(args::EditArgs),
    /// Print the cues of an SRT file
    Subtitles(args::SubtitlesArgs),
    /// Transcribe a video into an SRT file beside it
    Transcribe(args::TranscribeArgs),
    /// Show or change the subtitle review settings
    Settings(args::SettingsArgs),
}
