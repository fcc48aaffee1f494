#![allow(dead_code)]

use basketindex::domain::error::BasketIndexError;
use basketindex::domain::index::{IndexConfig, IndexMode};
pub use basketindex::domain::price_series::CloseObservation;
use basketindex::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::collections::HashMap;

pub struct MockPricePort {
    pub data: HashMap<String, Vec<CloseObservation>>,
    pub errors: HashMap<String, String>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_closes(mut self, asset_id: &str, closes: Vec<CloseObservation>) -> Self {
        self.data.insert(asset_id.to_string(), closes);
        self
    }

    pub fn with_error(mut self, asset_id: &str, reason: &str) -> Self {
        self.errors.insert(asset_id.to_string(), reason.to_string());
        self
    }
}

impl PricePort for MockPricePort {
    fn fetch_closes(
        &self,
        asset_id: &str,
        start_date: NaiveDate,
    ) -> Result<Vec<CloseObservation>, BasketIndexError> {
        if let Some(reason) = self.errors.get(asset_id) {
            return Err(BasketIndexError::PriceData {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(asset_id)
            .map(|closes| {
                closes
                    .iter()
                    .filter(|o| o.date >= start_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_assets(&self) -> Result<Vec<String>, BasketIndexError> {
        let mut assets: Vec<String> = self.data.keys().cloned().collect();
        assets.sort();
        Ok(assets)
    }

    fn data_range(
        &self,
        asset_id: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, BasketIndexError> {
        if let Some(reason) = self.errors.get(asset_id) {
            return Err(BasketIndexError::PriceData {
                reason: reason.clone(),
            });
        }
        match self.data.get(asset_id) {
            Some(closes) if !closes.is_empty() => {
                let first = closes.iter().map(|o| o.date).min().unwrap();
                let last = closes.iter().map(|o| o.date).max().unwrap();
                Ok(Some((first, last, closes.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn obs(asset_id: &str, date_str: &str, close: f64) -> CloseObservation {
    CloseObservation {
        asset_id: asset_id.to_string(),
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        close,
    }
}

pub fn symbols(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

pub fn static_config(base_value: f64) -> IndexConfig {
    IndexConfig {
        base_value,
        mode: IndexMode::Static,
        include_breakdown: false,
    }
}

pub fn dynamic_config(base_value: f64, min_entry_price: f64) -> IndexConfig {
    IndexConfig {
        base_value,
        mode: IndexMode::DynamicEntry { min_entry_price },
        include_breakdown: false,
    }
}

/// Daily closes walking from `start_close` in fixed 0.5 steps.
pub fn generate_closes(asset_id: &str, start: &str, days: usize, start_close: f64) -> Vec<CloseObservation> {
    let first = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    (0..days)
        .map(|i| CloseObservation {
            asset_id: asset_id.to_string(),
            date: first + chrono::Duration::days(i as i64),
            close: start_close + i as f64 * 0.5,
        })
        .collect()
}
