//! reelcut local video editor library
//!
//! Probes folders of videos with bounded parallelism, keeps chosen time
//! ranges of a video through ffmpeg, and reads or writes SRT subtitles.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod probe;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{EditEvent, ProbeMetadata, ProbeOutcome, TimeRange, VideoFile};
pub use error::{ReelcutError, ReelcutResult};
pub use probe::{probe_many, validate_concurrency, ProbePool};
