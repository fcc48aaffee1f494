//! Raw close observations and the aligned price matrix.
//!
//! Constituents trade on different calendars, so their raw series rarely
//! share a date axis. The assembler outer-joins every series onto the union
//! of observed dates and forward-fills each column independently; a column
//! stays missing before its first ever observation.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// A single raw (asset, date, close) row from a price provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseObservation {
    pub asset_id: String,
    pub date: NaiveDate,
    pub close: f64,
}

/// Dates × assets close matrix, sorted ascending by date.
///
/// Built per engine invocation and discarded with it; nothing here is meant
/// to outlive a single index computation.
#[derive(Debug, Clone, Default)]
pub struct PriceMatrix {
    pub asset_ids: Vec<String>,
    pub dates: Vec<NaiveDate>,
    rows: Vec<Vec<Option<f64>>>,
}

impl PriceMatrix {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.dates.len()
    }

    /// Close for one asset on one row, if the asset has been observed by then.
    pub fn close(&self, row: usize, asset_id: &str) -> Option<f64> {
        let col = self.asset_ids.iter().position(|id| id == asset_id)?;
        self.rows[row][col]
    }

    /// All defined closes on one row, keyed by asset id.
    pub fn closes_at(&self, row: usize) -> BTreeMap<String, f64> {
        self.asset_ids
            .iter()
            .zip(self.rows[row].iter().copied())
            .filter_map(|(id, close)| close.map(|c| (id.clone(), c)))
            .collect()
    }
}

/// Pivot raw observations into a [`PriceMatrix`] for the given constituents.
///
/// Observations may arrive in any order; duplicate (asset, date) rows keep
/// the last one seen. Rows for assets outside `asset_ids` are ignored.
///
/// With `trim_leading` (static mode), rows preceding the first date at which
/// every constituent has a real or carried value are dropped — the index
/// cannot start until all legs exist. Dynamic mode passes `false` and keeps
/// every row.
pub fn assemble_price_matrix(
    observations: &[CloseObservation],
    asset_ids: &[String],
    trim_leading: bool,
) -> PriceMatrix {
    if asset_ids.is_empty() {
        return PriceMatrix::default();
    }

    let mut by_asset: BTreeMap<&str, BTreeMap<NaiveDate, f64>> = asset_ids
        .iter()
        .map(|id| (id.as_str(), BTreeMap::new()))
        .collect();

    for obs in observations {
        if let Some(series) = by_asset.get_mut(obs.asset_id.as_str()) {
            series.insert(obs.date, obs.close);
        }
    }

    let timeline: BTreeSet<NaiveDate> = by_asset
        .values()
        .flat_map(|series| series.keys().copied())
        .collect();

    let mut dates: Vec<NaiveDate> = Vec::with_capacity(timeline.len());
    let mut rows: Vec<Vec<Option<f64>>> = Vec::with_capacity(timeline.len());
    let mut carried: Vec<Option<f64>> = vec![None; asset_ids.len()];

    for date in timeline {
        for (col, id) in asset_ids.iter().enumerate() {
            if let Some(&close) = by_asset[id.as_str()].get(&date) {
                carried[col] = Some(close);
            }
        }
        dates.push(date);
        rows.push(carried.clone());
    }

    if trim_leading {
        match rows.iter().position(|row| row.iter().all(Option::is_some)) {
            Some(first_full) => {
                dates.drain(..first_full);
                rows.drain(..first_full);
            }
            None => {
                dates.clear();
                rows.clear();
            }
        }
    }

    PriceMatrix {
        asset_ids: asset_ids.to_vec(),
        dates,
        rows,
    }
}
