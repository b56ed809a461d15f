//! Bounded-concurrency batch probing
//!
//! [`ProbePool::run`] probes any number of files with at most `max_concurrent`
//! probes in flight. Workers claim input indices from a shared atomic cursor,
//! so every element is probed exactly once, and each outcome is stored at its
//! input index regardless of completion order. A failing probe only produces a
//! [`ProbeOutcome::Failure`] for that element.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::domain::model::ProbeOutcome;
use crate::domain::rules::{describe_error, ConcurrencyPolicy, ProbeNormalizer};
use crate::error::{ReelcutError, ReelcutResult};
use crate::ports::ProbePort;

/// Validate a caller-supplied probe concurrency
pub fn validate_concurrency(value: i64) -> ReelcutResult<usize> {
    match usize::try_from(value) {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ReelcutError::InvalidConcurrency { value }),
    }
}

/// Probes many files through one injected prober with bounded parallelism
#[derive(Clone)]
pub struct ProbePool {
    prober: Arc<dyn ProbePort>,
    max_concurrent: usize,
}

impl ProbePool {
    /// Pool using the host default concurrency (CPU count clamped to 2..=6)
    pub fn new(prober: Arc<dyn ProbePort>) -> Self {
        Self {
            prober,
            max_concurrent: ConcurrencyPolicy::host_default(),
        }
    }

    /// Pool with an explicit concurrency; zero or negative values are rejected
    pub fn with_concurrency(prober: Arc<dyn ProbePort>, max_concurrent: i64) -> ReelcutResult<Self> {
        Ok(Self {
            prober,
            max_concurrent: validate_concurrency(max_concurrent)?,
        })
    }

    /// Upper bound on probes in flight
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Number of workers a run over `pending` paths starts
    pub fn planned_workers(&self, pending: usize) -> usize {
        ConcurrencyPolicy::worker_count(self.max_concurrent, pending)
    }

    /// Probe every path and return one outcome per path, in input order.
    ///
    /// Per-file failures never fail the batch. The only error is a worker task
    /// dying outside the per-file boundary, e.g. a panicking prober.
    pub async fn run(&self, paths: &[String]) -> ReelcutResult<Vec<ProbeOutcome>> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let paths: Arc<[String]> = paths.into();
        let cursor = Arc::new(AtomicUsize::new(0));
        let workers = self.planned_workers(paths.len());
        info!("Probing {} files with {} workers", paths.len(), workers);

        let mut tasks = JoinSet::new();
        for worker in 0..workers {
            let prober = Arc::clone(&self.prober);
            let paths = Arc::clone(&paths);
            let cursor = Arc::clone(&cursor);
            tasks.spawn(probe_worker(worker, prober, paths, cursor));
        }

        let mut slots: Vec<Option<ProbeOutcome>> = vec![None; paths.len()];
        while let Some(joined) = tasks.join_next().await {
            let finished = joined.map_err(|e| ReelcutError::WorkerFailed {
                message: e.to_string(),
            })?;
            for (index, outcome) in finished {
                slots[index] = Some(outcome);
            }
        }

        slots
            .into_iter()
            .zip(paths.iter())
            .map(|(slot, path)| {
                slot.ok_or_else(|| ReelcutError::WorkerFailed {
                    message: format!("no outcome recorded for {}", path),
                })
            })
            .collect()
    }
}

/// Claim indices until the input is exhausted, returning `(index, outcome)` pairs
async fn probe_worker(
    worker: usize,
    prober: Arc<dyn ProbePort>,
    paths: Arc<[String]>,
    cursor: Arc<AtomicUsize>,
) -> Vec<(usize, ProbeOutcome)> {
    let mut finished = Vec::new();

    loop {
        let index = cursor.fetch_add(1, Ordering::Relaxed);
        let Some(path) = paths.get(index) else {
            break;
        };

        let outcome = match prober.probe(path).await {
            Ok(metadata) => ProbeNormalizer::outcome(path, &metadata),
            Err(e) => {
                debug!(worker, path = %path, error = %e, "probe failed");
                ProbeOutcome::Failure {
                    path: path.clone(),
                    error: describe_error(&e),
                }
            }
        };
        finished.push((index, outcome));
    }

    debug!(worker, probed = finished.len(), "probe worker finished");
    finished
}

/// Probe `paths` with `max_concurrent` probes in flight, or the host default when `None`
pub async fn probe_many(
    prober: Arc<dyn ProbePort>,
    paths: &[String],
    max_concurrent: Option<i64>,
) -> ReelcutResult<Vec<ProbeOutcome>> {
    let pool = match max_concurrent {
        Some(n) => ProbePool::with_concurrency(prober, n)?,
        None => ProbePool::new(prober),
    };
    pool.run(paths).await
}
