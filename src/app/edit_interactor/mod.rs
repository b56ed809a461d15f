// Edit interactor - Cuts time ranges out of a video and joins them

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{error, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::RangeValidator;
use crate::error::{ReelcutError, ReelcutResult};
use crate::ports::*;

/// Interactor for the slice-and-join edit use case
pub struct EditInteractor {
    executor: Arc<dyn ExecutePort>,
}

impl EditInteractor {
    /// Create new edit interactor with injected executor
    pub fn new(executor: Arc<dyn ExecutePort>) -> Self {
        Self { executor }
    }

    /// Keep only `ranges` of `input`, in the given order, and write the result
    /// next to the input as `<stem>_edited_<millis>.<ext>`.
    ///
    /// Progress is reported on `events`; a failure is both sent as
    /// [`EditEvent::Failed`] and returned. Intermediate slices live in a
    /// temporary directory that is removed either way.
    pub async fn edit(
        &self,
        input: &Path,
        ranges: &[TimeRange],
        events: Option<UnboundedSender<EditEvent>>,
    ) -> ReelcutResult<PathBuf> {
        let result = self.run_edit(input, ranges, events.as_ref()).await;
        match &result {
            Ok(output) => {
                emit(events.as_ref(), EditEvent::Progress { percent: 100 });
                emit(
                    events.as_ref(),
                    EditEvent::Complete {
                        output: output.clone(),
                    },
                );
            }
            Err(e) => {
                error!("Edit of {} failed: {}", input.display(), e);
                emit(
                    events.as_ref(),
                    EditEvent::Failed {
                        message: e.to_string(),
                    },
                );
            }
        }
        result
    }

    async fn run_edit(
        &self,
        input: &Path,
        ranges: &[TimeRange],
        events: Option<&UnboundedSender<EditEvent>>,
    ) -> ReelcutResult<PathBuf> {
        if !input.is_file() {
            return Err(ReelcutError::InputNotFound {
                path: input.display().to_string(),
            });
        }
        let spans = RangeValidator::resolve(ranges)?;
        info!("Editing {} with {} ranges", input.display(), spans.len());

        let workdir = tempfile::Builder::new().prefix("reelcut-edit-").tempdir()?;
        let count = spans.len() as f64;
        let mut slices = Vec::with_capacity(spans.len());

        for (i, (start, end)) in spans.iter().enumerate() {
            let slice = workdir.path().join(format!("slice-{}.mp4", i));
            let base = i as f64 / count * 100.0;
            drive(events, |p| base + p as f64 / count, |sink| {
                self.executor.slice(input, &slice, *start, *end, Some(sink))
            })
            .await?;
            slices.push(slice);
        }

        let output = edited_output_path(input, chrono::Utc::now().timestamp_millis());

        if let [only] = slices.as_slice() {
            move_file(only, &output)?;
        } else {
            let total: f64 = spans.iter().map(|(start, end)| end - start).sum();
            let inputs: Vec<&Path> = slices.iter().map(PathBuf::as_path).collect();
            drive(events, |p| 90.0 + p as f64 / 10.0, |sink| {
                self.executor.concat(&inputs, &output, total, Some(sink))
            })
            .await?;
        }

        info!("Edited video written to {}", output.display());
        Ok(output)
    }
}

/// Run one executor job while forwarding its progress as overall edit progress
async fn drive<J, F, M>(
    events: Option<&UnboundedSender<EditEvent>>,
    overall: M,
    job: J,
) -> Result<(), DomainError>
where
    J: FnOnce(ProgressSink) -> F,
    F: Future<Output = Result<(), DomainError>>,
    M: Fn(u8) -> f64,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<u8>();
    let forward = async {
        while let Some(percent) = rx.recv().await {
            let percent = overall(percent).round().clamp(0.0, 100.0) as u8;
            emit(events, EditEvent::Progress { percent });
        }
    };
    let (result, _) = tokio::join!(job(tx), forward);
    result
}

fn emit(events: Option<&UnboundedSender<EditEvent>>, event: EditEvent) {
    if let Some(events) = events {
        let _ = events.send(event);
    }
}

/// `<dir>/<stem>_edited_<stamp><.ext>` next to `input`
pub fn edited_output_path(input: &Path, stamp: i64) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "video".to_string());
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    input.with_file_name(format!("{}_edited_{}{}", stem, stamp, ext))
}

/// Rename, falling back to copy-and-delete across file systems
fn move_file(from: &Path, to: &Path) -> Result<(), DomainError> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    std::fs::copy(from, to)?;
    std::fs::remove_file(from)?;
    Ok(())
}
