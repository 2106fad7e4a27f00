//! Monte Carlo estimation of π over independent concurrent sampling units.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod logging;
pub mod sampler;

pub use aggregator::{chunk_plan, estimate_pi, estimate_pi_tasks, estimate_pi_threads, ChunkPlan, Estimate};
pub use config::{EstimateConfig, Executor};
pub use error::{EstimateError, Result};
pub use sampler::{in_unit_circle, sample, PointSource, SampleCount, UniformSquare};
