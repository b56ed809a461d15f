use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reelcut_cli::app::EditInteractor;
use reelcut_cli::ports::{ExecutePort, ProgressSink};
use reelcut_cli::*;
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Writes fake media files and reports half-way and full progress
#[derive(Default)]
struct FakeExecutor {
    slices: Mutex<Vec<(f64, f64)>>,
    concat_total: Mutex<Option<f64>>,
    fail_slice: Option<usize>,
}

#[async_trait]
impl ExecutePort for FakeExecutor {
    async fn slice(
        &self,
        _input: &Path,
        output: &Path,
        start: f64,
        end: f64,
        progress: Option<ProgressSink>,
    ) -> Result<(), DomainError> {
        let index = {
            let mut slices = self.slices.lock().unwrap();
            slices.push((start, end));
            slices.len() - 1
        };
        if self.fail_slice == Some(index) {
            return Err(DomainError::tool("ffmpeg", "exited with status 1"));
        }
        if let Some(progress) = progress {
            let _ = progress.send(50);
            let _ = progress.send(100);
        }
        std::fs::write(output, format!("{}-{}", start, end))?;
        Ok(())
    }

    async fn concat(
        &self,
        inputs: &[&Path],
        output: &Path,
        total_seconds: f64,
        progress: Option<ProgressSink>,
    ) -> Result<(), DomainError> {
        *self.concat_total.lock().unwrap() = Some(total_seconds);
        let mut joined = Vec::new();
        for input in inputs {
            joined.push(std::fs::read_to_string(input)?);
        }
        if let Some(progress) = progress {
            let _ = progress.send(50);
            let _ = progress.send(100);
        }
        std::fs::write(output, joined.join("|"))?;
        Ok(())
    }
}

fn input_video(dir: &TempDir) -> PathBuf {
    let input = dir.path().join("talk.mp4");
    std::fs::write(&input, b"source").unwrap();
    input
}

async fn run_edit(
    executor: Arc<FakeExecutor>,
    input: &Path,
    ranges: &[TimeRange],
) -> (ReelcutResult<PathBuf>, Vec<EditEvent>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let result = EditInteractor::new(executor).edit(input, ranges, Some(tx)).await;

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    (result, events)
}

fn progress_values(events: &[EditEvent]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            EditEvent::Progress { percent } => Some(*percent),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_multiple_ranges_are_sliced_and_joined() {
    let dir = TempDir::new().unwrap();
    let input = input_video(&dir);
    let executor = Arc::new(FakeExecutor::default());

    let ranges = vec![TimeRange::new("0:10", "0:30"), TimeRange::new("1:00:00", "3605")];
    let (result, events) = run_edit(executor.clone(), &input, &ranges).await;
    let output = result.unwrap();

    let name = output.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("talk_edited_"));
    assert!(name.ends_with(".mp4"));
    assert_eq!(output.parent(), input.parent());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "10-30|3600-3605");

    assert_eq!(*executor.slices.lock().unwrap(), vec![(10.0, 30.0), (3600.0, 3605.0)]);
    assert_eq!(*executor.concat_total.lock().unwrap(), Some(25.0));

    assert_eq!(progress_values(&events), vec![25, 50, 75, 100, 95, 100, 100]);
    assert_eq!(events.last(), Some(&EditEvent::Complete { output }));
}

#[tokio::test]
async fn test_single_range_skips_join() {
    let dir = TempDir::new().unwrap();
    let input = input_video(&dir);
    let executor = Arc::new(FakeExecutor::default());

    let (result, events) =
        run_edit(executor.clone(), &input, &[TimeRange::new("5", "7.5")]).await;
    let output = result.unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "5-7.5");
    assert!(executor.concat_total.lock().unwrap().is_none());
    assert_eq!(progress_values(&events), vec![50, 100, 100]);
}

#[tokio::test]
async fn test_invalid_ranges_fail_before_slicing() {
    let dir = TempDir::new().unwrap();
    let input = input_video(&dir);

    for ranges in [
        vec![],
        vec![TimeRange::new("0:30", "0:10")],
        vec![TimeRange::new("abc", "0:10")],
    ] {
        let executor = Arc::new(FakeExecutor::default());
        let (result, events) = run_edit(executor.clone(), &input, &ranges).await;

        assert!(matches!(result, Err(ReelcutError::Domain(_))), "{:?}", ranges);
        assert!(executor.slices.lock().unwrap().is_empty());
        assert!(matches!(events.last(), Some(EditEvent::Failed { .. })));
    }
}

#[tokio::test]
async fn test_missing_input_is_reported() {
    let executor = Arc::new(FakeExecutor::default());
    let (result, events) = run_edit(
        executor,
        Path::new("/no/such/video.mp4"),
        &[TimeRange::new("0", "1")],
    )
    .await;

    assert!(matches!(result, Err(ReelcutError::InputNotFound { .. })));
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn test_executor_failure_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let input = input_video(&dir);
    let executor = Arc::new(FakeExecutor {
        fail_slice: Some(1),
        ..Default::default()
    });

    let ranges = vec![TimeRange::new("0", "1"), TimeRange::new("2", "3")];
    let (result, events) = run_edit(executor, &input, &ranges).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("exited with status 1"));
    match events.last() {
        Some(EditEvent::Failed { message }) => assert_eq!(message, &err.to_string()),
        other => panic!("expected failure event, got {:?}", other),
    }

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("talk.mp4")]);
}
