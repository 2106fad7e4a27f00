//! Fan-out of sampling units and reduction of their counts into a π estimate.
//!
//! The budget is split with floor division into one equal chunk per unit; the
//! remainder is dropped. Each unit owns its point source, so units share
//! nothing until the single join barrier.

use std::any::Any;
use std::f64::consts::PI;
use std::thread;

use tokio::task;
use tracing::{debug, info, warn};

use crate::config::{EstimateConfig, Executor};
use crate::error::{EstimateError, Result};
use crate::sampler::{sample, PointSource, SampleCount, UniformSquare};

/// Per-unit chunk sizes for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    pub chunks: Vec<u64>,
    /// Points lost to floor division.
    pub dropped: u64,
}

impl ChunkPlan {
    pub fn total(&self) -> u64 {
        self.chunks.iter().sum()
    }
}

pub fn chunk_plan(total_points: u64, task_count: usize) -> ChunkPlan {
    if task_count == 0 {
        return ChunkPlan {
            chunks: Vec::new(),
            dropped: total_points,
        };
    }

    let chunk = total_points / task_count as u64;
    ChunkPlan {
        chunks: vec![chunk; task_count],
        dropped: total_points % task_count as u64,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub pi: f64,
    pub total_inside: u64,
    pub total_used: u64,
    pub dropped: u64,
    pub task_count: usize,
}

impl Estimate {
    pub fn abs_error(&self) -> f64 {
        (PI - self.pi).abs()
    }
}

pub fn reduce<I>(counts: I) -> SampleCount
where
    I: IntoIterator<Item = SampleCount>,
{
    counts
        .into_iter()
        .fold(SampleCount::default(), SampleCount::merge)
}

fn plan(config: &EstimateConfig) -> Result<ChunkPlan> {
    config.validate()?;

    // Checked before the chunk list exists; a huge task count must not allocate.
    let chunk = config.total_points / config.task_count as u64;
    if chunk == 0 {
        return Err(EstimateError::NoSamplesDrawn {
            total_points: config.total_points,
            task_count: config.task_count,
        });
    }

    let plan = chunk_plan(config.total_points, config.task_count);
    info!(
        tasks = config.task_count,
        chunk,
        dropped = plan.dropped,
        executor = %config.executor,
        "planned sampling units"
    );
    Ok(plan)
}

fn finish(config: &EstimateConfig, plan: &ChunkPlan, tally: SampleCount) -> Result<Estimate> {
    if tally.total == 0 {
        return Err(EstimateError::NoSamplesDrawn {
            total_points: config.total_points,
            task_count: config.task_count,
        });
    }

    Ok(Estimate {
        pi: 4.0 * tally.inside as f64 / tally.total as f64,
        total_inside: tally.inside,
        total_used: tally.total,
        dropped: plan.dropped,
        task_count: config.task_count,
    })
}

fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unit panicked".to_string()
    }
}

/// Collects every unit's outcome before deciding. A failed unit does not stop
/// the join loop, so no worker is left detached; the first failure is returned.
fn collect_counts<I>(outcomes: I) -> Result<Vec<SampleCount>>
where
    I: IntoIterator<Item = (usize, std::result::Result<SampleCount, String>)>,
{
    let mut counts = Vec::new();
    let mut failure = None;

    for (unit, outcome) in outcomes {
        match outcome {
            Ok(count) => {
                debug!(unit, inside = count.inside, total = count.total, "unit finished");
                counts.push(count);
            }
            Err(reason) => {
                warn!(unit, %reason, "unit failed");
                failure.get_or_insert(EstimateError::UnitFailed { unit, reason });
            }
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(counts),
    }
}

/// Runs one OS thread per unit. `make_source` is called with the unit index
/// on the calling thread and the source is moved into the worker.
pub fn estimate_pi_threads<S, F>(config: &EstimateConfig, make_source: F) -> Result<Estimate>
where
    S: PointSource + Send + 'static,
    F: Fn(usize) -> S,
{
    let plan = plan(config)?;

    let handles: Vec<_> = plan
        .chunks
        .iter()
        .enumerate()
        .map(|(unit, &points)| {
            let mut source = make_source(unit);
            thread::spawn(move || sample(&mut source, points))
        })
        .collect();

    let outcomes = handles
        .into_iter()
        .enumerate()
        .map(|(unit, handle)| (unit, handle.join().map_err(panic_reason)));
    let counts = collect_counts(outcomes)?;

    finish(config, &plan, reduce(counts))
}

/// Runs one tokio blocking task per unit; sampling is CPU-bound and never
/// yields, so it stays off the async workers.
pub async fn estimate_pi_tasks<S, F>(config: &EstimateConfig, make_source: F) -> Result<Estimate>
where
    S: PointSource + Send + 'static,
    F: Fn(usize) -> S,
{
    let plan = plan(config)?;

    let handles: Vec<_> = plan
        .chunks
        .iter()
        .enumerate()
        .map(|(unit, &points)| {
            let mut source = make_source(unit);
            task::spawn_blocking(move || sample(&mut source, points))
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (unit, handle) in handles.into_iter().enumerate() {
        outcomes.push((unit, handle.await.map_err(|e| e.to_string())));
    }
    let counts = collect_counts(outcomes)?;

    finish(config, &plan, reduce(counts))
}

/// Runs the thread fan-out on a blocking task so it never stalls the runtime.
async fn estimate_pi_threads_off_runtime<S, F>(
    config: &EstimateConfig,
    make_source: F,
) -> Result<Estimate>
where
    S: PointSource + Send + 'static,
    F: Fn(usize) -> S + Send + 'static,
{
    let config = config.clone();
    task::spawn_blocking(move || estimate_pi_threads(&config, make_source))
        .await
        .map_err(|e| EstimateError::FanOutFailed(e.to_string()))?
}

/// Estimates π with entropy-seeded uniform sources on the configured executor.
pub async fn estimate_pi(config: &EstimateConfig) -> Result<Estimate> {
    match config.executor {
        Executor::Tasks => estimate_pi_tasks(config, |_| UniformSquare::from_entropy()).await,
        Executor::Threads => {
            estimate_pi_threads_off_runtime(config, |_| UniformSquare::from_entropy()).await
        }
    }
}
