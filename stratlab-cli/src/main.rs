//! StratLab CLI — run, compare, and synth commands.
//!
//! Commands:
//! - `run` — execute a backtest from a TOML config file or a named preset
//! - `compare` — run several config files side by side, in parallel
//! - `synth` — generate a synthetic bar CSV for demos and smoke tests

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stratlab_core::data::SyntheticSeries;
use stratlab_runner::{
    markdown_report, run_comparison, run_single_backtest, save_artifacts, RunConfig,
    StrategyConfig,
};

#[derive(Parser)]
#[command(name = "stratlab", about = "StratLab — strategy backtesting engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest from a TOML config file or a named preset.
    Run {
        /// Path to a TOML config file.
        #[arg(long, conflicts_with = "strategy")]
        config: Option<PathBuf>,

        /// Named strategy preset (see `--list-strategies`).
        #[arg(long)]
        strategy: Option<String>,

        /// Symbol (required with --strategy).
        #[arg(long)]
        symbol: Option<String>,

        /// Bar CSV path. Defaults to data/{symbol}.csv.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Start date (YYYY-MM-DD). Defaults to the first bar on file.
        #[arg(long)]
        start: Option<NaiveDate>,

        /// End date (YYYY-MM-DD). Defaults to the last bar on file.
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Starting cash.
        #[arg(long, default_value_t = 1_000_000.0)]
        cash: f64,

        /// Commission rate per fill.
        #[arg(long, default_value_t = 0.001425)]
        commission: f64,

        /// Fraction of cash deployed per buy.
        #[arg(long, default_value_t = 0.95)]
        sizer: f64,

        /// Output directory for result artifacts and the run log.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// List available strategy presets and exit.
        #[arg(long, default_value_t = false)]
        list_strategies: bool,
    },
    /// Run several config files side by side, in parallel.
    Compare {
        /// TOML config files, one per run.
        #[arg(required = true)]
        configs: Vec<PathBuf>,

        /// Output directory for per-run logs and artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Generate a synthetic bar CSV.
    Synth {
        /// Symbol to stamp on the series.
        #[arg(long, default_value = "SYN")]
        symbol: String,

        /// Number of bars.
        #[arg(long, default_value_t = 504)]
        bars: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// First bar date.
        #[arg(long, default_value = "2020-01-01")]
        start: NaiveDate,

        /// Output CSV path. Defaults to data/{symbol}.csv.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            strategy,
            symbol,
            csv,
            start,
            end,
            cash,
            commission,
            sizer,
            output_dir,
            list_strategies,
        } => {
            if list_strategies {
                for name in StrategyConfig::preset_names() {
                    println!("{name}");
                }
                return Ok(());
            }
            let run_config = build_run_config(
                config, strategy, symbol, csv, start, end, cash, commission, sizer,
            )?;
            cmd_run(&run_config, &output_dir)
        }
        Commands::Compare { configs, output_dir } => cmd_compare(&configs, &output_dir),
        Commands::Synth {
            symbol,
            bars,
            seed,
            start,
            out,
        } => cmd_synth(&symbol, bars, seed, start, out),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_run_config(
    config: Option<PathBuf>,
    strategy: Option<String>,
    symbol: Option<String>,
    csv: Option<PathBuf>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    cash: f64,
    commission: f64,
    sizer: f64,
) -> Result<RunConfig> {
    if let Some(path) = config {
        return RunConfig::load(&path).with_context(|| format!("loading {}", path.display()));
    }

    let Some(name) = strategy else {
        bail!("either --config or --strategy is required");
    };
    let Some(strategy_config) = StrategyConfig::preset(&name) else {
        bail!(
            "unknown strategy '{name}' (available: {})",
            StrategyConfig::preset_names().join(", ")
        );
    };
    let Some(symbol) = symbol else {
        bail!("--symbol is required with --strategy");
    };

    Ok(RunConfig {
        backtest: stratlab_runner::config::BacktestSection {
            symbol,
            csv,
            start,
            end,
            initial_cash: cash,
            commission_rate: commission,
            sizer_fraction: sizer,
        },
        strategy: Some(strategy_config),
    })
}

fn cmd_run(config: &RunConfig, output_dir: &PathBuf) -> Result<()> {
    let run_id = config.run_id();
    let run_dir = output_dir.join(&run_id[..12]);
    let log_path = run_dir.join("trading_log.txt");

    let result = run_single_backtest(config, Some(&log_path))?;
    save_artifacts(&result, &run_dir)?;

    println!("{}", markdown_report(&result));
    println!("Artifacts written to {}", run_dir.display());
    Ok(())
}

fn cmd_compare(configs: &[PathBuf], output_dir: &PathBuf) -> Result<()> {
    let loaded: Vec<RunConfig> = configs
        .iter()
        .map(|path| RunConfig::load(path).with_context(|| format!("loading {}", path.display())))
        .collect::<Result<_>>()?;

    let log_dir = output_dir.join("logs");
    let results = run_comparison(&loaded, Some(&log_dir));

    println!(
        "{:<24} {:<20} {:>12} {:>10} {:>8} {:>10}",
        "strategy", "symbol", "ending", "return%", "sharpe", "max_dd%"
    );
    for (path, result) in configs.iter().zip(&results) {
        match result {
            Ok(r) => {
                let sharpe = r
                    .metrics
                    .sharpe
                    .map_or("n/a".to_string(), |s| format!("{s:.2}"));
                println!(
                    "{:<24} {:<20} {:>12.2} {:>10.2} {:>8} {:>10.2}",
                    r.strategy,
                    r.symbol,
                    r.metrics.ending_value,
                    r.metrics.total_return * 100.0,
                    sharpe,
                    r.metrics.max_drawdown * 100.0
                );
            }
            Err(e) => println!("{:<24} failed: {e}", path.display()),
        }
    }

    for result in results.into_iter().flatten() {
        let run_dir = output_dir.join(&result.run_id[..12]);
        save_artifacts(&result, &run_dir)?;
    }
    Ok(())
}

fn cmd_synth(
    symbol: &str,
    bars: usize,
    seed: u64,
    start: NaiveDate,
    out: Option<PathBuf>,
) -> Result<()> {
    let path = out.unwrap_or_else(|| PathBuf::from(format!("data/{symbol}.csv")));
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let series = SyntheticSeries::new(symbol, seed).generate(start, bars);
    let mut content = String::from("Date,Open,High,Low,Close,Volume\n");
    for bar in &series {
        content.push_str(&format!(
            "{},{:.4},{:.4},{:.4},{:.4},{}\n",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
        ));
    }
    std::fs::write(&path, content)
        .with_context(|| format!("writing {}", path.display()))?;

    println!("Wrote {bars} bars for {symbol} to {}", path.display());
    Ok(())
}
