//! Backtest runner — wires config → data → engine → metrics → evaluation.

use crate::artifact::ArtifactError;
use crate::config::{ConfigError, RunConfig, RunId};
use crate::evaluation::evaluate;
use crate::factory::build_strategy;
use crate::metrics::Metrics;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use stratlab_core::data::{load_bars_csv, BarFeed, DataError};
use stratlab_core::domain::{ClosedTrade, EquityPoint, Rejection};
use stratlab_core::engine::{run_backtest, EngineConfig, RunLogger};
use thiserror::Error;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    /// Run invoked with no `[strategy]` table. Checked before any I/O.
    #[error("no strategy configured")]
    NoStrategy,

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Current schema version for persisted results.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub symbol: String,
    pub strategy: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_cash: f64,
    pub metrics: Metrics,
    pub evaluation: Vec<String>,
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<ClosedTrade>,
    pub rejections: Vec<Rejection>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Run a single backtest from a `RunConfig`.
///
/// With `log_path = Some(..)` the run log goes to that file (truncated at
/// start); with `None` the log is discarded. Every failure path surfaces as
/// `RunError` before any metrics exist — no partial results.
pub fn run_single_backtest(
    config: &RunConfig,
    log_path: Option<&Path>,
) -> Result<BacktestResult, RunError> {
    let strategy_config = config.strategy.as_ref().ok_or(RunError::NoStrategy)?;
    // Eager artifact check for model-backed strategies happens inside.
    let strategy = build_strategy(strategy_config)?;

    let section = &config.backtest;
    let bars = load_bars_csv(&section.csv_path(), &section.symbol)?;
    let start = section.start.unwrap_or(bars[0].date);
    let end = section.end.unwrap_or(bars[bars.len() - 1].date);
    let feed = BarFeed::new(section.symbol.clone(), bars, start, end)?;

    let mut logger = match log_path {
        Some(path) => RunLogger::to_file(path)?,
        None => RunLogger::null(),
    };

    let engine_config = EngineConfig {
        initial_cash: section.initial_cash,
        commission_rate: section.commission_rate,
        sizer_fraction: section.sizer_fraction,
    };
    let output = run_backtest(&feed, strategy.as_ref(), &engine_config, &mut logger);

    let metrics = Metrics::compute(
        section.initial_cash,
        &output.equity_values(),
        &output.trades,
    );
    let evaluation = evaluate(&metrics);

    logger.note(format!("Ending value: {:.2}", metrics.ending_value));
    logger.note(format!("Total return: {:.2}%", metrics.total_return * 100.0));
    logger.note(format!(
        "Annualized return: {:.2}%",
        metrics.annualized_return * 100.0
    ));
    match metrics.sharpe {
        Some(sharpe) => logger.note(format!("Sharpe ratio: {sharpe:.2}")),
        None => logger.note("Sharpe ratio: n/a"),
    }
    logger.note(format!("Max drawdown: {:.2}%", metrics.max_drawdown * 100.0));
    logger.note("--- Strategy Evaluation ---");
    for line in &evaluation {
        logger.note(line);
    }

    Ok(BacktestResult {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        symbol: output.symbol,
        strategy: output.strategy,
        start_date: feed.first_date(),
        end_date: feed.last_date(),
        initial_cash: section.initial_cash,
        metrics,
        evaluation,
        equity_curve: output.equity_curve,
        trades: output.trades,
        rejections: output.rejections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BacktestSection, StrategyConfig};
    use std::io::Write;
    use std::path::PathBuf;

    fn write_series_csv(dir: &Path, closes: &[f64]) -> PathBuf {
        let path = dir.join("TEST.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Date,Open,High,Low,Close,Volume").unwrap();
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for (i, close) in closes.iter().enumerate() {
            let date = base + chrono::Duration::days(i as i64);
            writeln!(
                file,
                "{date},{close},{:.2},{:.2},{close},1000",
                close + 1.0,
                close - 1.0
            )
            .unwrap();
        }
        path
    }

    fn config_for(csv: PathBuf, strategy: Option<StrategyConfig>) -> RunConfig {
        RunConfig {
            backtest: BacktestSection {
                symbol: "TEST".into(),
                csv: Some(csv),
                start: None,
                end: None,
                initial_cash: 100_000.0,
                commission_rate: 0.001,
                sizer_fraction: 0.95,
            },
            strategy,
        }
    }

    #[test]
    fn no_strategy_aborts_before_io() {
        // Nonexistent CSV: the strategy check must fire first.
        let config = config_for(PathBuf::from("/nonexistent.csv"), None);
        let err = run_single_backtest(&config, None).unwrap_err();
        assert!(matches!(err, RunError::NoStrategy));
    }

    #[test]
    fn missing_data_is_surfaced() {
        let config = config_for(
            PathBuf::from("/nonexistent.csv"),
            Some(StrategyConfig::BuyAndHold),
        );
        let err = run_single_backtest(&config, None).unwrap_err();
        assert!(matches!(err, RunError::Data(_)));
    }

    #[test]
    fn empty_date_range_is_data_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_series_csv(dir.path(), &[100.0, 101.0, 102.0]);
        let mut config = config_for(csv, Some(StrategyConfig::BuyAndHold));
        config.backtest.start = Some(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());
        config.backtest.end = Some(NaiveDate::from_ymd_opt(2030, 12, 31).unwrap());
        let err = run_single_backtest(&config, None).unwrap_err();
        assert!(matches!(err, RunError::Data(DataError::DataNotFound { .. })));
    }

    #[test]
    fn buy_and_hold_produces_full_result() {
        let dir = tempfile::tempdir().unwrap();
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let csv = write_series_csv(dir.path(), &closes);
        let config = config_for(csv, Some(StrategyConfig::BuyAndHold));

        let result = run_single_backtest(&config, None).unwrap();
        assert_eq!(result.schema_version, SCHEMA_VERSION);
        assert_eq!(result.symbol, "TEST");
        assert_eq!(result.strategy, "buy_and_hold");
        assert_eq!(result.equity_curve.len(), 20);
        assert!(result.metrics.total_return > 0.0);
        assert_eq!(result.evaluation.len(), 3);
    }

    #[test]
    fn log_file_is_written_per_run() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_series_csv(dir.path(), &[100.0, 101.0, 102.0]);
        let config = config_for(csv, Some(StrategyConfig::BuyAndHold));
        let log_path = dir.path().join("run.log");

        run_single_backtest(&config, Some(&log_path)).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("backtest start"));
        assert!(content.contains("[BUY] EXECUTED"));
        assert!(content.contains("--- Strategy Evaluation ---"));
    }
}
