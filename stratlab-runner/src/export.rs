//! Result export — JSON, CSV, and Markdown artifact generation.
//!
//! Three formats per run:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: equity curve (the renderable chart artifact) and trade tape
//! - **Markdown**: human-readable single-run report
//!
//! Persisted JSON includes a `schema_version` field; unknown versions are
//! rejected on load.

use std::path::Path;

use anyhow::{bail, Context, Result};
use stratlab_core::domain::{ClosedTrade, EquityPoint};

use crate::runner::{BacktestResult, SCHEMA_VERSION};

// ─── JSON ───────────────────────────────────────────────────────────

/// Serialize a `BacktestResult` to pretty JSON.
pub fn export_json(result: &BacktestResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize BacktestResult to JSON")
}

/// Deserialize a `BacktestResult`, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<BacktestResult> {
    let result: BacktestResult =
        serde_json::from_str(json).context("failed to deserialize BacktestResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

// ─── CSV ────────────────────────────────────────────────────────────

/// Export the equity curve as CSV: `date,equity,cash`.
pub fn export_equity_csv(curve: &[EquityPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "equity", "cash"])?;
    for point in curve {
        wtr.write_record([
            &point.date.to_string(),
            &format!("{:.4}", point.equity),
            &format!("{:.4}", point.cash),
        ])?;
    }
    let bytes = wtr.into_inner().context("csv writer finalization failed")?;
    String::from_utf8(bytes).context("csv output was not UTF-8")
}

/// Export the trade tape as CSV.
pub fn export_trades_csv(trades: &[ClosedTrade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "symbol",
        "entry_bar",
        "entry_date",
        "entry_price",
        "exit_bar",
        "exit_date",
        "exit_price",
        "quantity",
        "gross_pnl",
        "commission",
        "net_pnl",
        "bars_held",
    ])?;
    for t in trades {
        wtr.write_record([
            &t.symbol,
            &t.entry_bar.to_string(),
            &t.entry_date.to_string(),
            &format!("{:.6}", t.entry_price),
            &t.exit_bar.to_string(),
            &t.exit_date.to_string(),
            &format!("{:.6}", t.exit_price),
            &t.quantity.to_string(),
            &format!("{:.2}", t.gross_pnl),
            &format!("{:.2}", t.commission),
            &format!("{:.2}", t.net_pnl),
            &t.bars_held.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().context("csv writer finalization failed")?;
    String::from_utf8(bytes).context("csv output was not UTF-8")
}

// ─── Markdown ───────────────────────────────────────────────────────

/// Render a single-run report.
pub fn markdown_report(result: &BacktestResult) -> String {
    let m = &result.metrics;
    let sharpe = match m.sharpe {
        Some(s) => format!("{s:.2}"),
        None => "n/a".to_string(),
    };

    let mut report = String::new();
    report.push_str(&format!(
        "# Backtest Report: {} on {}\n\n",
        result.strategy, result.symbol
    ));
    report.push_str(&format!(
        "Run `{}` | {} → {} | starting cash {:.2}\n\n",
        &result.run_id[..12.min(result.run_id.len())],
        result.start_date,
        result.end_date,
        result.initial_cash
    ));

    report.push_str("## Metrics\n\n");
    report.push_str("| Metric | Value |\n|---|---|\n");
    report.push_str(&format!("| Ending value | {:.2} |\n", m.ending_value));
    report.push_str(&format!("| Total return | {:.2}% |\n", m.total_return * 100.0));
    report.push_str(&format!(
        "| Annualized return | {:.2}% |\n",
        m.annualized_return * 100.0
    ));
    report.push_str(&format!("| Sharpe ratio | {sharpe} |\n"));
    report.push_str(&format!("| Max drawdown | {:.2}% |\n", m.max_drawdown * 100.0));
    report.push_str(&format!("| Trades | {} |\n", m.trade_count));
    report.push_str(&format!("| Commission paid | {:.2} |\n", m.total_commission));
    report.push_str(&format!("| Rejected orders | {} |\n", result.rejections.len()));

    report.push_str("\n## Evaluation\n\n");
    for line in &result.evaluation {
        report.push_str(&format!("- {line}\n"));
    }
    report
}

// ─── Bundle ─────────────────────────────────────────────────────────

/// Write `result.json`, `equity.csv`, `trades.csv`, and `report.md` to `dir`.
pub fn save_artifacts(result: &BacktestResult, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output dir {}", dir.display()))?;

    std::fs::write(dir.join("result.json"), export_json(result)?)?;
    std::fs::write(dir.join("equity.csv"), export_equity_csv(&result.equity_curve)?)?;
    std::fs::write(dir.join("trades.csv"), export_trades_csv(&result.trades)?)?;
    std::fs::write(dir.join("report.md"), markdown_report(result))?;
    Ok(())
}
