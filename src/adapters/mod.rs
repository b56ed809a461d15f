// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod json_settings;
pub mod probe_ffprobe;
pub mod probe_timeout;
pub mod toml_config;
pub mod transcribe_command;

// Re-export adapters
pub use exec_ffmpeg::FFmpegAdapter;
pub use json_settings::JsonSettingsAdapter;
pub use probe_ffprobe::FFprobeAdapter;
pub use probe_timeout::TimeoutProbe;
pub use toml_config::AppConfig;
pub use transcribe_command::CommandTranscriber;
