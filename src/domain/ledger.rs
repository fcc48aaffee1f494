//! Allocation ledger: per-asset share counts and equal-weight re-splits.

use std::collections::{BTreeMap, BTreeSet};

/// Share counts held against the current equal-weight split.
///
/// All arithmetic is plain f64; rounding happens only when the valuer emits
/// output, never here, so successive re-splits do not compound rounding
/// error. Shares live in a `BTreeMap` so summation order is fixed and
/// repeated runs produce bit-identical values.
///
/// Prices are assumed strictly positive at initialize/reallocate time; a
/// zero or negative close would yield inf/NaN shares. Excluding such rows is
/// the price-ingestion layer's job, not this ledger's.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationLedger {
    shares: BTreeMap<String, f64>,
}

impl AllocationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed shares for a group of assets entering together, each receiving
    /// `allocation_per_asset` of value at its own close.
    pub fn initialize(
        &mut self,
        allocation_per_asset: f64,
        assets: &BTreeSet<String>,
        closes: &BTreeMap<String, f64>,
    ) {
        for asset_id in assets {
            if let Some(&close) = closes.get(asset_id) {
                self.shares
                    .insert(asset_id.clone(), allocation_per_asset / close);
            }
        }
    }

    /// Total value of the active set at the given closes.
    pub fn value(&self, closes: &BTreeMap<String, f64>, active: &BTreeSet<String>) -> f64 {
        active
            .iter()
            .filter_map(|asset_id| {
                let shares = self.shares.get(asset_id)?;
                let close = closes.get(asset_id)?;
                Some(shares * close)
            })
            .sum()
    }

    /// Equal-weight re-split: every active member ends up holding
    /// `total_value / |active|` of value at the given closes. Used by both
    /// the quarterly rebalance and dynamic-entry admission.
    pub fn reallocate(
        &mut self,
        total_value: f64,
        active: &BTreeSet<String>,
        closes: &BTreeMap<String, f64>,
    ) {
        if active.is_empty() {
            return;
        }
        let per_asset = total_value / active.len() as f64;
        for asset_id in active {
            if let Some(&close) = closes.get(asset_id) {
                self.shares.insert(asset_id.clone(), per_asset / close);
            }
        }
    }

    pub fn shares(&self, asset_id: &str) -> Option<f64> {
        self.shares.get(asset_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn closes(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(id, c)| (id.to_string(), *c)).collect()
    }

    #[test]
    fn initialize_splits_allocation_per_asset() {
        let mut ledger = AllocationLedger::new();
        let active = set(&["X", "Y"]);
        let day_one = closes(&[("X", 100.0), ("Y", 25.0)]);

        ledger.initialize(50.0, &active, &day_one);

        assert!((ledger.shares("X").unwrap() - 0.5).abs() < f64::EPSILON);
        assert!((ledger.shares("Y").unwrap() - 2.0).abs() < f64::EPSILON);
        assert!((ledger.value(&day_one, &active) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn value_sums_only_active_members() {
        let mut ledger = AllocationLedger::new();
        let all = set(&["X", "Y"]);
        let day_one = closes(&[("X", 100.0), ("Y", 100.0)]);
        ledger.initialize(50.0, &all, &day_one);

        let only_x = set(&["X"]);
        assert!((ledger.value(&day_one, &only_x) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn value_with_empty_active_set_is_zero() {
        let ledger = AllocationLedger::new();
        assert_eq!(ledger.value(&closes(&[("X", 100.0)]), &set(&[])), 0.0);
    }

    #[test]
    fn reallocate_conserves_total_value() {
        let mut ledger = AllocationLedger::new();
        let active = set(&["X", "Y"]);
        ledger.initialize(50.0, &active, &closes(&[("X", 100.0), ("Y", 100.0)]));

        // X doubled, Y flat: 100 + 50 = 150 before the re-split.
        let later = closes(&[("X", 200.0), ("Y", 100.0)]);
        let before = ledger.value(&later, &active);
        assert!((before - 150.0).abs() < 1e-9);

        ledger.reallocate(before, &active, &later);
        let after = ledger.value(&later, &active);
        assert!((after - before).abs() < 1e-9);
    }

    #[test]
    fn reallocate_equalizes_per_member_value() {
        let mut ledger = AllocationLedger::new();
        let active = set(&["X", "Y"]);
        ledger.initialize(50.0, &active, &closes(&[("X", 100.0), ("Y", 100.0)]));

        let later = closes(&[("X", 200.0), ("Y", 100.0)]);
        ledger.reallocate(150.0, &active, &later);

        assert!((ledger.shares("X").unwrap() - 0.375).abs() < 1e-12);
        assert!((ledger.shares("Y").unwrap() - 0.75).abs() < 1e-12);
        assert!((ledger.shares("X").unwrap() * 200.0 - 75.0).abs() < 1e-9);
        assert!((ledger.shares("Y").unwrap() * 100.0 - 75.0).abs() < 1e-9);
    }

    #[test]
    fn reallocate_over_enlarged_set_injects_no_capital() {
        let mut ledger = AllocationLedger::new();
        let founders = set(&["X"]);
        let day_one = closes(&[("X", 100.0)]);
        ledger.initialize(100.0, &founders, &day_one);

        let enlarged = set(&["X", "Y"]);
        let later = closes(&[("X", 100.0), ("Y", 40.0)]);
        let pool = ledger.value(&later, &founders);
        ledger.reallocate(pool, &enlarged, &later);

        assert!((ledger.value(&later, &enlarged) - pool).abs() < 1e-9);
        assert!((ledger.shares("Y").unwrap() * 40.0 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn reallocate_with_empty_active_set_is_a_no_op() {
        let mut ledger = AllocationLedger::new();
        ledger.reallocate(100.0, &set(&[]), &closes(&[("X", 100.0)]));
        assert_eq!(ledger, AllocationLedger::new());
    }
}
