//! CSV file price adapter.
//!
//! One `<ASSET_ID>.csv` file per asset under a base directory, with a
//! `date,close` header row. Dates are `YYYY-MM-DD`.

use crate::domain::error::BasketIndexError;
use crate::domain::price_series::CloseObservation;
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, asset_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", asset_id))
    }

    fn read_rows(&self, asset_id: &str) -> Result<Vec<(NaiveDate, f64)>, BasketIndexError> {
        let path = self.csv_path(asset_id);
        let content = fs::read_to_string(&path).map_err(|e| BasketIndexError::PriceData {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut rows = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| BasketIndexError::PriceData {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(0).ok_or_else(|| BasketIndexError::PriceData {
                reason: format!("missing date column in {}", path.display()),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                BasketIndexError::PriceData {
                    reason: format!("invalid date in {}: {}", path.display(), e),
                }
            })?;

            let close: f64 = record
                .get(1)
                .ok_or_else(|| BasketIndexError::PriceData {
                    reason: format!("missing close column in {}", path.display()),
                })?
                .parse()
                .map_err(|e| BasketIndexError::PriceData {
                    reason: format!("invalid close value in {}: {}", path.display(), e),
                })?;

            rows.push((date, close));
        }

        Ok(rows)
    }
}

impl PricePort for CsvPriceAdapter {
    fn fetch_closes(
        &self,
        asset_id: &str,
        start_date: NaiveDate,
    ) -> Result<Vec<CloseObservation>, BasketIndexError> {
        let observations = self
            .read_rows(asset_id)?
            .into_iter()
            .filter(|&(date, _)| date >= start_date)
            .map(|(date, close)| CloseObservation {
                asset_id: asset_id.to_string(),
                date,
                close,
            })
            .collect();
        Ok(observations)
    }

    fn list_assets(&self) -> Result<Vec<String>, BasketIndexError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| BasketIndexError::PriceData {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut assets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| BasketIndexError::PriceData {
                reason: format!("directory entry error: {}", e),
            })?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(asset_id) = name.strip_suffix(".csv") {
                assets.push(asset_id.to_string());
            }
        }

        assets.sort();
        Ok(assets)
    }

    fn data_range(
        &self,
        asset_id: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, BasketIndexError> {
        if !self.csv_path(asset_id).exists() {
            return Ok(None);
        }
        let rows = self.read_rows(asset_id)?;
        let Some(first) = rows.iter().map(|&(date, _)| date).min() else {
            return Ok(None);
        };
        let last = rows.iter().map(|&(date, _)| date).max().unwrap_or(first);
        Ok(Some((first, last, rows.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, asset_id: &str, content: &str) {
        let mut file = fs::File::create(dir.path().join(format!("{}.csv", asset_id))).unwrap();
        write!(file, "{}", content).unwrap();
    }

    fn d(date: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn fetch_closes_parses_and_filters_by_start_date() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "AAPL",
            "date,close\n2024-01-02,185.5\n2024-01-03,186.1\n2023-12-29,184.0\n",
        );
        let adapter = CsvPriceAdapter::new(dir.path().to_path_buf());

        let closes = adapter.fetch_closes("AAPL", d("2024-01-01")).unwrap();
        assert_eq!(closes.len(), 2);
        assert!(closes.iter().all(|o| o.asset_id == "AAPL"));
        assert!(closes.iter().all(|o| o.date >= d("2024-01-01")));
    }

    #[test]
    fn fetch_closes_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvPriceAdapter::new(dir.path().to_path_buf());

        let result = adapter.fetch_closes("GHOST", d("2024-01-01"));
        assert!(matches!(result, Err(BasketIndexError::PriceData { .. })));
    }

    #[test]
    fn fetch_closes_bad_close_value_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "BAD", "date,close\n2024-01-02,not-a-number\n");
        let adapter = CsvPriceAdapter::new(dir.path().to_path_buf());

        let result = adapter.fetch_closes("BAD", d("2024-01-01"));
        assert!(matches!(result, Err(BasketIndexError::PriceData { .. })));
    }

    #[test]
    fn list_assets_returns_sorted_csv_stems() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "MSFT", "date,close\n2024-01-02,390.0\n");
        write_csv(&dir, "AAPL", "date,close\n2024-01-02,185.5\n");
        fs::File::create(dir.path().join("notes.txt")).unwrap();
        let adapter = CsvPriceAdapter::new(dir.path().to_path_buf());

        assert_eq!(adapter.list_assets().unwrap(), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn data_range_reports_bounds_and_count() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "AAPL",
            "date,close\n2024-01-03,186.1\n2024-01-02,185.5\n2024-01-04,187.0\n",
        );
        let adapter = CsvPriceAdapter::new(dir.path().to_path_buf());

        let range = adapter.data_range("AAPL").unwrap();
        assert_eq!(range, Some((d("2024-01-02"), d("2024-01-04"), 3)));
    }

    #[test]
    fn data_range_none_for_missing_asset() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvPriceAdapter::new(dir.path().to_path_buf());
        assert_eq!(adapter.data_range("GHOST").unwrap(), None);
    }
}
