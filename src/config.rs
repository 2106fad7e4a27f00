use std::fmt;

use crate::error::{EstimateError, Result};

pub const DEFAULT_TOTAL_POINTS: u64 = 20_000_999;
pub const DEFAULT_TASK_COUNT: usize = 20;

/// How sampling units are fanned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Executor {
    /// One OS thread per unit.
    Threads,
    /// One tokio blocking task per unit.
    #[default]
    Tasks,
}

impl fmt::Display for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Executor::Threads => write!(f, "threads"),
            Executor::Tasks => write!(f, "tasks"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateConfig {
    pub total_points: u64,
    pub task_count: usize,
    pub executor: Executor,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        EstimateConfig {
            total_points: DEFAULT_TOTAL_POINTS,
            task_count: DEFAULT_TASK_COUNT,
            executor: Executor::default(),
        }
    }
}

impl EstimateConfig {
    pub fn new(total_points: u64, task_count: usize) -> Self {
        EstimateConfig {
            total_points,
            task_count,
            ..Default::default()
        }
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    /// Rejects zero budgets before any work is launched.
    ///
    /// A task count above the budget is accepted here; it surfaces later as
    /// [`EstimateError::NoSamplesDrawn`] once the chunk size comes out as zero.
    pub fn validate(&self) -> Result<()> {
        if self.total_points == 0 {
            return Err(EstimateError::InvalidTotalPoints);
        }
        if self.task_count == 0 {
            return Err(EstimateError::InvalidTaskCount);
        }
        Ok(())
    }
}
