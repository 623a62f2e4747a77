//! Side-by-side comparison runs.
//!
//! Each config runs as an independent backtest — its own feed, ledger, and
//! log sink — so the batch parallelizes safely across a thread pool.
//! Results come back in input order.

use crate::config::RunConfig;
use crate::runner::{run_single_backtest, BacktestResult, RunError};
use rayon::prelude::*;
use std::path::Path;

/// Run every config in parallel.
///
/// With `log_dir = Some(..)`, each run logs to
/// `<log_dir>/<index>_<run-id-prefix>.log` — a distinct file per run, never
/// shared. A failed run yields its error without disturbing the others.
pub fn run_comparison(
    configs: &[RunConfig],
    log_dir: Option<&Path>,
) -> Vec<Result<BacktestResult, RunError>> {
    configs
        .par_iter()
        .enumerate()
        .map(|(index, config)| {
            let log_path = log_dir.map(|dir| {
                let run_id = config.run_id();
                dir.join(format!("{index}_{}.log", &run_id[..12.min(run_id.len())]))
            });
            run_single_backtest(config, log_path.as_deref())
        })
        .collect()
}
