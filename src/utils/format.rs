//! Human-readable size formatting

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count with 1024-based units and one decimal place
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, SIZE_UNITS[unit])
}
