use std::process;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use tracing::{error, info};

use async_pi::config::{DEFAULT_TASK_COUNT, DEFAULT_TOTAL_POINTS};
use async_pi::{estimate_pi, logging, EstimateConfig, Executor};

#[derive(Parser)]
#[command(name = "async_pi")]
#[command(version, about = "Estimate pi by Monte Carlo sampling across concurrent units", long_about = None)]
struct Cli {
    /// Total number of points to sample across all units
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOTAL_POINTS)]
    total_points: u64,

    /// Number of concurrent sampling units
    #[arg(short, long, default_value_t = DEFAULT_TASK_COUNT)]
    tasks: usize,

    /// How units are fanned out
    #[arg(short, long, value_enum, default_value_t = ExecutorArg::Tasks)]
    executor: ExecutorArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExecutorArg {
    Threads,
    Tasks,
}

impl From<ExecutorArg> for Executor {
    fn from(arg: ExecutorArg) -> Self {
        match arg {
            ExecutorArg::Threads => Executor::Threads,
            ExecutorArg::Tasks => Executor::Tasks,
        }
    }
}

#[tokio::main]
async fn main() {
    logging::init_tracing();
    let cli = Cli::parse();

    let config = EstimateConfig::new(cli.total_points, cli.tasks).with_executor(cli.executor.into());

    let start = Instant::now();
    let estimate = match estimate_pi(&config).await {
        Ok(estimate) => estimate,
        Err(e) => {
            error!(error = %e, "estimate failed");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    info!(
        inside = estimate.total_inside,
        used = estimate.total_used,
        dropped = estimate.dropped,
        error = estimate.abs_error(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "estimate complete"
    );
    println!("Pi approximation: {}", estimate.pi);
}
