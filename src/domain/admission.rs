//! Dynamic-entry admission policy.
//!
//! In dynamic mode the active set starts empty and grows as constituents
//! first trade at or above a price floor. Membership is never revoked, even
//! if a member later trades below the floor.

use std::collections::{BTreeMap, BTreeSet};

use super::ledger::AllocationLedger;

/// Admits new constituents once their close clears `min_entry_price`.
///
/// The floor keeps low-priced and recently listed instruments from grabbing
/// a distortive equal share the day they appear in the data.
#[derive(Debug, Clone)]
pub struct EntryAdmissionPolicy {
    min_entry_price: f64,
}

impl EntryAdmissionPolicy {
    pub fn new(min_entry_price: f64) -> Self {
        Self { min_entry_price }
    }

    /// Run the admission check for one date, in chronological order.
    ///
    /// Qualifying newcomers join `active` and the pool is re-split equally
    /// across the enlarged set; no new capital is injected, so incumbents
    /// fund the newcomers and everyone leaves at the same per-member value.
    /// The very first admission has no pool to split and is seeded from
    /// `base_value` instead, normalizing the index to its base on day one.
    ///
    /// Returns the admitted asset ids (empty when nothing qualifies).
    pub fn apply(
        &self,
        closes: &BTreeMap<String, f64>,
        active: &mut BTreeSet<String>,
        ledger: &mut AllocationLedger,
        base_value: f64,
    ) -> Vec<String> {
        let admitted: Vec<String> = closes
            .iter()
            .filter(|(asset_id, close)| {
                !active.contains(*asset_id) && **close >= self.min_entry_price
            })
            .map(|(asset_id, _)| asset_id.clone())
            .collect();

        if admitted.is_empty() {
            return admitted;
        }

        let pool = if active.is_empty() {
            base_value
        } else {
            ledger.value(closes, active)
        };

        active.extend(admitted.iter().cloned());
        ledger.reallocate(pool, active, closes);

        admitted
    }
}
