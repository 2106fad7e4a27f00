use thiserror::Error;

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("total points must be greater than zero")]
    InvalidTotalPoints,

    #[error("task count must be greater than zero")]
    InvalidTaskCount,

    #[error("no samples drawn: {total_points} points split across {task_count} tasks leaves 0 per task")]
    NoSamplesDrawn { total_points: u64, task_count: usize },

    #[error("sampling unit {unit} failed: {reason}")]
    UnitFailed { unit: usize, reason: String },

    #[error("sampling fan-out failed: {0}")]
    FanOutFailed(String),
}

pub type Result<T> = std::result::Result<T, EstimateError>;
