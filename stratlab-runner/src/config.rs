//! Serializable run configuration.
//!
//! A TOML file captures everything needed to reproduce a backtest: data
//! selection, broker parameters, and the strategy with its numeric
//! parameters. `run_id()` is the blake3 hash of the canonical JSON
//! serialization, so identical configs share an id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Complete configuration for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub backtest: BacktestSection,
    /// Absent strategy table → `RunError::NoStrategy`, checked before any I/O.
    pub strategy: Option<StrategyConfig>,
}

/// Data selection and broker parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestSection {
    /// Instrument ticker, stamped onto every bar.
    pub symbol: String,

    /// Bar CSV path. Defaults to `data/{symbol}.csv`.
    #[serde(default)]
    pub csv: Option<PathBuf>,

    /// Start date (inclusive). Defaults to the first bar on file.
    #[serde(default)]
    pub start: Option<NaiveDate>,

    /// End date (inclusive). Defaults to the last bar on file.
    #[serde(default)]
    pub end: Option<NaiveDate>,

    #[serde(default = "default_initial_cash")]
    pub initial_cash: f64,

    #[serde(default = "default_commission_rate")]
    pub commission_rate: f64,

    #[serde(default = "default_sizer_fraction")]
    pub sizer_fraction: f64,
}

fn default_initial_cash() -> f64 {
    1_000_000.0
}

fn default_commission_rate() -> f64 {
    0.001425
}

fn default_sizer_fraction() -> f64 {
    0.95
}

impl BacktestSection {
    pub fn csv_path(&self) -> PathBuf {
        self.csv
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("data/{}.csv", self.symbol)))
    }
}

/// Strategy selection with numeric parameters (serializable tagged enum).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyConfig {
    BuyAndHold,
    MaThreshold {
        period: usize,
    },
    MaCrossover {
        fast_period: usize,
        slow_period: usize,
    },
    BollingerReversion {
        period: usize,
        multiplier: f64,
    },
    RsiThreshold {
        period: usize,
        oversold: f64,
        overbought: f64,
    },
    RsiBollinger {
        rsi_period: usize,
        bb_period: usize,
        bb_multiplier: f64,
        oversold: f64,
        overbought: f64,
    },
    RocThreshold {
        period: usize,
        threshold: f64,
    },
    RocMaCrossover {
        roc_period: usize,
        fast_period: usize,
        slow_period: usize,
    },
    MomentumSma {
        momentum_period: usize,
        sma_period: usize,
    },
    FearGreedGate,
    PutCallGate,
    VixGate,
    PredictedClose,
    ModelSignal {
        artifact: PathBuf,
    },
}

impl StrategyConfig {
    /// Named preset with the shipped default parameters, for `--strategy`.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "buy_and_hold" => Some(Self::BuyAndHold),
            "ma_threshold" => Some(Self::MaThreshold { period: 30 }),
            "ma_crossover" => Some(Self::MaCrossover {
                fast_period: 5,
                slow_period: 37,
            }),
            "bollinger_reversion" => Some(Self::BollingerReversion {
                period: 20,
                multiplier: 2.0,
            }),
            "rsi_threshold" => Some(Self::RsiThreshold {
                period: 14,
                oversold: 30.0,
                overbought: 70.0,
            }),
            "rsi_bollinger" => Some(Self::RsiBollinger {
                rsi_period: 14,
                bb_period: 20,
                bb_multiplier: 2.0,
                oversold: 30.0,
                overbought: 70.0,
            }),
            "roc_threshold" => Some(Self::RocThreshold {
                period: 20,
                threshold: 0.08,
            }),
            "roc_ma_crossover" => Some(Self::RocMaCrossover {
                roc_period: 12,
                fast_period: 10,
                slow_period: 30,
            }),
            "momentum_sma" => Some(Self::MomentumSma {
                momentum_period: 14,
                sma_period: 50,
            }),
            "fear_greed_gate" => Some(Self::FearGreedGate),
            "put_call_gate" => Some(Self::PutCallGate),
            "vix_gate" => Some(Self::VixGate),
            "predicted_close" => Some(Self::PredictedClose),
            _ => None,
        }
    }

    /// Every preset name accepted by `preset()`.
    pub fn preset_names() -> &'static [&'static str] {
        &[
            "buy_and_hold",
            "ma_threshold",
            "ma_crossover",
            "bollinger_reversion",
            "rsi_threshold",
            "rsi_bollinger",
            "roc_threshold",
            "roc_ma_crossover",
            "momentum_sma",
            "fear_greed_gate",
            "put_call_gate",
            "vix_gate",
            "predicted_close",
        ]
    }
}

impl RunConfig {
    /// Load a TOML config from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Deterministic content hash of this configuration.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
