//! Utility functions and helpers

pub mod format;
pub mod logging;
pub mod srt;
pub mod time;

pub use format::format_size;
pub use srt::{format_srt_timestamp, group_segments, parse_srt, to_srt};
pub use time::{format_duration, format_time, parse_srt_time, parse_time_to_seconds};
