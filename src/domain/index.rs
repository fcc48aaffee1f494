//! Index valuation: walks the price matrix date by date and emits the series.
//!
//! Per date the engine applies dynamic-entry admission (if configured), then
//! the quarterly rebalance check, then values the active set. Rebalances are
//! priced at and take effect on the same day's close, before that day's
//! point is emitted.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::admission::EntryAdmissionPolicy;
use super::ledger::AllocationLedger;
use super::price_series::PriceMatrix;
use super::rebalance::RebalanceScheduler;

/// Constituent membership policy.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexMode {
    /// All constituents from the first date every leg has a close.
    Static,
    /// Constituents join over time once their close reaches the floor.
    DynamicEntry { min_entry_price: f64 },
}

/// Engine parameters. Plain call parameters, not engine state.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub base_value: f64,
    pub mode: IndexMode,
    pub include_breakdown: bool,
}

/// One output record per retained date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexPoint {
    pub date: NaiveDate,
    pub value: f64,
    /// Per-constituent value contribution, keyed by display symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BTreeMap<String, f64>>,
}

/// Output rounding: 4 decimals, applied at emission only.
fn round_output(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Compute the equal-weight index series for an assembled matrix.
///
/// A pure function of its inputs: all ledger and membership state is local
/// to the call, so concurrent invocations over different baskets need no
/// coordination. An empty matrix yields an empty series.
///
/// `labels` maps asset ids to display symbols for breakdown output; ids
/// without a label fall back to themselves. Pass an empty map when
/// `include_breakdown` is off.
pub fn compute_index(
    matrix: &PriceMatrix,
    config: &IndexConfig,
    labels: &BTreeMap<String, String>,
) -> Vec<IndexPoint> {
    if matrix.is_empty() || matrix.asset_ids.is_empty() {
        return Vec::new();
    }

    let policy = match config.mode {
        IndexMode::Static => None,
        IndexMode::DynamicEntry { min_entry_price } => {
            Some(EntryAdmissionPolicy::new(min_entry_price))
        }
    };

    let mut ledger = AllocationLedger::new();
    let mut active: BTreeSet<String> = BTreeSet::new();
    let mut scheduler = RebalanceScheduler::new();
    let mut series = Vec::with_capacity(matrix.row_count());

    for row in 0..matrix.row_count() {
        let date = matrix.dates[row];
        let closes = matrix.closes_at(row);

        match &policy {
            Some(policy) => {
                policy.apply(&closes, &mut active, &mut ledger, config.base_value);
                if active.is_empty() {
                    // Nothing qualifies yet: no point for this date.
                    continue;
                }
            }
            None => {
                if active.is_empty() {
                    active = matrix.asset_ids.iter().cloned().collect();
                    let per_asset = config.base_value / active.len() as f64;
                    ledger.initialize(per_asset, &active, &closes);
                }
            }
        }

        if scheduler.check(date) {
            let pool = ledger.value(&closes, &active);
            ledger.reallocate(pool, &active, &closes);
        }

        let breakdown = config.include_breakdown.then(|| {
            active
                .iter()
                .filter_map(|asset_id| {
                    let shares = ledger.shares(asset_id)?;
                    let close = closes.get(asset_id)?;
                    let label = labels
                        .get(asset_id)
                        .cloned()
                        .unwrap_or_else(|| asset_id.clone());
                    Some((label, round_output(shares * close)))
                })
                .collect()
        });

        series.push(IndexPoint {
            date,
            value: round_output(ledger.value(&closes, &active)),
            breakdown,
        });
    }

    series
}
