//! Property tests — accounting invariants over random price paths.

use chrono::NaiveDate;
use proptest::prelude::*;
use stratlab_core::data::BarFeed;
use stratlab_core::domain::{Bar, OrderSide};
use stratlab_core::engine::{run_backtest, EngineConfig, RunLogger};
use stratlab_core::strategy::{MaCrossover, MaThreshold, Strategy as TradingStrategy};

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                symbol: "PROP".to_string(),
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) * 1.01,
                low: open.min(close) * 0.99,
                close,
                volume: 1000,
                fear_greed: None,
                put_call: None,
                vix: None,
                predicted_close: None,
            }
        })
        .collect()
}

/// Random walk of strictly positive closes.
fn close_series() -> impl proptest::strategy::Strategy<Value = Vec<f64>> {
    (
        20.0..500.0_f64,
        prop::collection::vec(-0.05..0.05_f64, 12..100),
    )
        .prop_map(|(start, steps)| {
            let mut closes = vec![start];
            for step in steps {
                let next = (closes.last().unwrap() * (1.0 + step)).max(0.5);
                closes.push(next);
            }
            closes
        })
}

fn check_invariants(closes: &[f64], strategy: &dyn TradingStrategy) {
    let feed = BarFeed::from_bars("PROP", bars_from_closes(closes)).unwrap();
    let config = EngineConfig {
        initial_cash: 100_000.0,
        commission_rate: 0.001425,
        sizer_fraction: 0.95,
    };
    let mut logger = RunLogger::null();
    let output = run_backtest(&feed, strategy, &config, &mut logger);

    // Cash never goes negative, equity identity holds at every step.
    let mut quantity = 0_i64;
    let mut fills = output.fills.iter().peekable();
    for (t, point) in output.equity_curve.iter().enumerate() {
        while let Some(fill) = fills.peek() {
            if fill.bar_index != t {
                break;
            }
            match fill.side {
                OrderSide::Buy => quantity += fill.quantity,
                OrderSide::Sell => quantity -= fill.quantity,
            }
            fills.next();
        }
        assert!(point.cash >= 0.0, "negative cash at bar {t}: {}", point.cash);
        let expected = point.cash + quantity as f64 * closes[t];
        assert!(
            (point.equity - expected).abs() < 1e-6,
            "equity identity violated at bar {t}"
        );
        assert!(quantity >= 0, "short position at bar {t}");
    }

    // Fills alternate buy/sell starting with a buy (long-only, full exits).
    for (i, fill) in output.fills.iter().enumerate() {
        let expected_side = if i % 2 == 0 {
            OrderSide::Buy
        } else {
            OrderSide::Sell
        };
        assert_eq!(fill.side, expected_side, "fill {i} out of order");
    }

    // Every closed trade pairs two fills; net = gross - commission.
    assert_eq!(output.trades.len(), output.fills.len() / 2);
    for trade in &output.trades {
        assert!((trade.net_pnl - (trade.gross_pnl - trade.commission)).abs() < 1e-9);
        assert!(trade.exit_bar >= trade.entry_bar);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ma_threshold_preserves_ledger_invariants(closes in close_series()) {
        check_invariants(&closes, &MaThreshold::new(5));
    }

    #[test]
    fn ma_crossover_preserves_ledger_invariants(closes in close_series()) {
        check_invariants(&closes, &MaCrossover::new(3, 7));
    }

    #[test]
    fn deterministic_replay(closes in close_series()) {
        let strategy = MaCrossover::new(3, 7);
        let config = EngineConfig::default();
        let feed = BarFeed::from_bars("PROP", bars_from_closes(&closes)).unwrap();

        let mut logger = RunLogger::null();
        let a = run_backtest(&feed, &strategy, &config, &mut logger);
        let b = run_backtest(&feed, &strategy, &config, &mut logger);

        prop_assert_eq!(a.fills.len(), b.fills.len());
        prop_assert_eq!(a.final_equity(), b.final_equity());
    }
}
