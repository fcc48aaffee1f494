//! Price provider port trait.

use crate::domain::error::BasketIndexError;
use crate::domain::price_series::CloseObservation;
use chrono::NaiveDate;

/// Source of raw close observations. Order of returned rows is not
/// guaranteed; the assembler sorts and pivots.
pub trait PricePort {
    /// All (asset, date, close) observations for one asset from `start_date`
    /// forward.
    fn fetch_closes(
        &self,
        asset_id: &str,
        start_date: NaiveDate,
    ) -> Result<Vec<CloseObservation>, BasketIndexError>;

    /// Asset ids the provider has data for.
    fn list_assets(&self) -> Result<Vec<String>, BasketIndexError>;

    /// (first date, last date, row count) for one asset, if any data exists.
    fn data_range(
        &self,
        asset_id: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, BasketIndexError>;
}
