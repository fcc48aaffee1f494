//! Calendar-quarter rebalance detection.

use chrono::{Datelike, NaiveDate};

/// Months that open a calendar quarter.
pub const QUARTER_START_MONTHS: [u32; 4] = [1, 4, 7, 10];

/// Detects the first trading row on or after each quarter's first calendar
/// day by comparing the current row's month against the previously processed
/// row's month. Never fires on the first processed row.
///
/// Known limitation: because only adjacent processed rows are compared, a
/// quarter with zero rows in the matrix silently skips its rebalance. Fine
/// for daily equities data.
#[derive(Debug, Clone, Default)]
pub struct RebalanceScheduler {
    prev_month: Option<u32>,
}

impl RebalanceScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `date`; true when a quarterly re-split is due on it.
    pub fn check(&mut self, date: NaiveDate) -> bool {
        let month = date.month();
        let due = match self.prev_month {
            None => false,
            Some(prev) => prev != month && QUARTER_START_MONTHS.contains(&month),
        };
        self.prev_month = Some(month);
        due
    }
}
