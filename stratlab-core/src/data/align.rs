//! Multi-symbol alignment on a union calendar.
//!
//! Alignment is best-effort: the calendar is the sorted union of every feed's
//! dates, and an instrument with no bar on a given date contributes `None`
//! for that step. No strict date intersection is enforced.

use super::feed::BarFeed;
use crate::domain::Bar;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Feeds aligned on a shared union calendar.
#[derive(Debug, Clone)]
pub struct AlignedBars {
    pub dates: Vec<NaiveDate>,
    /// Per symbol: one cell per calendar date, `None` when the instrument
    /// has no bar that day.
    pub by_symbol: HashMap<String, Vec<Option<Bar>>>,
}

impl AlignedBars {
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.by_symbol.keys().map(|s| s.as_str())
    }

    /// The bar for `symbol` at calendar step `t`, if present that day.
    pub fn bar(&self, symbol: &str, t: usize) -> Option<&Bar> {
        self.by_symbol.get(symbol)?.get(t)?.as_ref()
    }
}

/// Align feeds on the union of their calendars.
pub fn align_union(feeds: &[BarFeed]) -> AlignedBars {
    let dates: Vec<NaiveDate> = feeds
        .iter()
        .flat_map(|f| f.bars().iter().map(|b| b.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let index: HashMap<NaiveDate, usize> =
        dates.iter().enumerate().map(|(i, &d)| (d, i)).collect();

    let mut by_symbol = HashMap::new();
    for feed in feeds {
        let mut cells: Vec<Option<Bar>> = vec![None; dates.len()];
        for bar in feed.bars() {
            cells[index[&bar.date]] = Some(bar.clone());
        }
        by_symbol.insert(feed.symbol().to_string(), cells);
    }

    AlignedBars { dates, by_symbol }
}
