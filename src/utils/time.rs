//! Time parsing and formatting utilities

use crate::domain::errors::DomainError;

/// Split whole seconds into hours, minutes and seconds
fn hms(seconds: f64) -> (u64, u64, u64) {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    (total / 3600, (total % 3600) / 60, total % 60)
}

/// Format a media duration: `H:MM:SS` once it reaches an hour, `M:SS` below that
pub fn format_duration(seconds: f64) -> String {
    let (h, m, s) = hms(seconds);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Format a playback position.
///
/// Hours are shown when `max_duration` (or `seconds` itself if absent) is at
/// least one hour, so every position of a long video renders with the same width.
pub fn format_time(seconds: f64, max_duration: Option<f64>) -> String {
    let (h, m, s) = hms(seconds);
    if max_duration.unwrap_or(seconds) >= 3600.0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", h * 60 + m, s)
    }
}

/// Parse `H:MM:SS`, `M:SS` or plain seconds into seconds.
///
/// Components are read right to left in base 60; the last one may carry a
/// fractional part.
pub fn parse_time_to_seconds(time: &str) -> Result<f64, DomainError> {
    let trimmed = time.trim();
    if trimmed.is_empty() {
        return Err(DomainError::BadArgs("Empty time value".to_string()));
    }

    let mut seconds = 0.0;
    let mut multiplier = 1.0;
    for part in trimmed.rsplit(':') {
        let value = part
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| DomainError::BadArgs(format!("Invalid time value: {}", time)))?;
        seconds += value * multiplier;
        multiplier *= 60.0;
    }

    Ok(seconds)
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) into seconds
pub fn parse_srt_time(timestamp: &str) -> Result<f64, DomainError> {
    let invalid = || DomainError::InvalidFormat(format!("Invalid SRT timestamp: {}", timestamp));

    let (clock, millis) = timestamp.trim().split_once(',').ok_or_else(invalid)?;
    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let hours: u64 = parts[0].parse().map_err(|_| invalid())?;
    let minutes: u64 = parts[1].parse().map_err(|_| invalid())?;
    let seconds: u64 = parts[2].parse().map_err(|_| invalid())?;
    let millis: u64 = millis.parse().map_err(|_| invalid())?;

    Ok((hours * 3600 + minutes * 60 + seconds) as f64 + millis as f64 / 1000.0)
}
