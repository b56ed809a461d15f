//! FFmpeg execution adapter
//!
//! Slices and joins videos by running the `ffmpeg` CLI. Progress is read from
//! `-progress pipe:1`, whose `out_time_us=` lines report the output position.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::ports::*;

/// FFmpeg-based execution adapter
#[derive(Debug, Clone)]
pub struct FFmpegAdapter {
    ffmpeg_bin: PathBuf,
    video_codec: String,
    audio_codec: String,
    threads: usize,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(ffmpeg_bin: impl Into<PathBuf>, video_codec: &str, audio_codec: &str) -> Self {
        Self {
            ffmpeg_bin: ffmpeg_bin.into(),
            video_codec: video_codec.to_string(),
            audio_codec: audio_codec.to_string(),
            threads: num_cpus::get(),
        }
    }

    /// Arguments for re-encoding one range
    fn slice_args(&self, input: &Path, output: &Path, start: f64, end: f64) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-ss".to_string(),
            format!("{:.3}", start),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-t".to_string(),
            format!("{:.3}", end - start),
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-threads".to_string(),
            self.threads.to_string(),
            "-progress".to_string(),
            "pipe:1".to_string(),
            "-nostats".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }

    /// Arguments for stream-copy joining through the concat demuxer
    fn concat_args(&self, list_file: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-f".to_string(),
            "concat".to_string(),
            "-safe".to_string(),
            "0".to_string(),
            "-i".to_string(),
            list_file.to_string_lossy().to_string(),
            "-c".to_string(),
            "copy".to_string(),
            "-progress".to_string(),
            "pipe:1".to_string(),
            "-nostats".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }

    /// Run ffmpeg, forwarding progress against `expected_seconds` of output
    async fn run(
        &self,
        args: Vec<String>,
        expected_seconds: f64,
        progress: Option<ProgressSink>,
    ) -> Result<(), DomainError> {
        debug!("{} {}", self.ffmpeg_bin.display(), args.join(" "));

        let mut child = Command::new(&self.ffmpeg_bin)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DomainError::tool("ffmpeg", format!("failed to spawn: {}", e)))?;

        let stderr_task = child.stderr.take().map(|mut stderr| {
            tokio::spawn(async move {
                let mut buf = String::new();
                let _ = stderr.read_to_string(&mut buf).await;
                buf
            })
        });

        if let Some(stdout) = child.stdout.take() {
            let mut lines = BufReader::new(stdout).lines();
            while let Some(line) = lines.next_line().await? {
                if let (Some(sink), Some(percent)) =
                    (progress.as_ref(), progress_percent(&line, expected_seconds))
                {
                    let _ = sink.send(percent);
                }
            }
        }

        let status = child.wait().await?;
        let stderr = match stderr_task {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };

        if !status.success() {
            return Err(DomainError::tool(
                "ffmpeg",
                format!("exited with {}: {}", status, stderr.trim()),
            ));
        }

        Ok(())
    }
}

/// Percent complete from one `-progress` line, if it carries the output position
pub fn progress_percent(line: &str, expected_seconds: f64) -> Option<u8> {
    let (key, value) = line.trim().split_once('=')?;
    if key != "out_time_us" && key != "out_time_ms" {
        return None;
    }
    if expected_seconds <= 0.0 {
        return None;
    }
    // Both keys are in microseconds despite the name of the second one.
    let micros: f64 = value.parse().ok()?;
    let percent = (micros / 1_000_000.0 / expected_seconds * 100.0).clamp(0.0, 100.0);
    Some(percent.round() as u8)
}

/// Concat demuxer list entry, quoting the path for ffmpeg
fn concat_entry(path: &Path) -> String {
    format!("file '{}'", path.to_string_lossy().replace('\'', "'\\''"))
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    async fn slice(
        &self,
        input: &Path,
        output: &Path,
        start: f64,
        end: f64,
        progress: Option<ProgressSink>,
    ) -> Result<(), DomainError> {
        info!(
            "Slicing {} [{:.3}s, {:.3}s) -> {}",
            input.display(),
            start,
            end,
            output.display()
        );
        let args = self.slice_args(input, output, start, end);
        self.run(args, end - start, progress).await
    }

    async fn concat(
        &self,
        inputs: &[&Path],
        output: &Path,
        total_seconds: f64,
        progress: Option<ProgressSink>,
    ) -> Result<(), DomainError> {
        info!("Joining {} slices -> {}", inputs.len(), output.display());

        let mut list = tempfile::Builder::new()
            .prefix("reelcut-concat-")
            .suffix(".txt")
            .tempfile()?;
        for input in inputs {
            writeln!(list, "{}", concat_entry(input))?;
        }
        list.flush()?;

        let args = self.concat_args(list.path(), output);
        self.run(args, total_seconds, progress).await
    }
}
