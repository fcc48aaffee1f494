//! CSV report adapter.
//!
//! `date,value` columns, plus one column per display symbol when any point
//! carries a breakdown. Dynamic baskets grow their membership over time, so
//! the column set is the union of symbols across the whole series; cells
//! before a symbol's admission stay empty.

use crate::domain::error::BasketIndexError;
use crate::domain::index::IndexPoint;
use crate::ports::report_port::ReportPort;
use std::collections::BTreeSet;
use std::io::Write;

pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write(&self, series: &[IndexPoint], out: &mut dyn Write) -> Result<(), BasketIndexError> {
        let symbols: BTreeSet<&String> = series
            .iter()
            .filter_map(|point| point.breakdown.as_ref())
            .flat_map(|breakdown| breakdown.keys())
            .collect();

        let mut wtr = csv::Writer::from_writer(out);

        let mut header = vec!["date".to_string(), "value".to_string()];
        header.extend(symbols.iter().map(|s| s.to_string()));
        wtr.write_record(&header)
            .map_err(|e| BasketIndexError::Report {
                reason: format!("CSV write error: {}", e),
            })?;

        for point in series {
            let mut record = vec![point.date.to_string(), point.value.to_string()];
            for symbol in &symbols {
                let cell = point
                    .breakdown
                    .as_ref()
                    .and_then(|breakdown| breakdown.get(*symbol))
                    .map(|contribution| contribution.to_string())
                    .unwrap_or_default();
                record.push(cell);
            }
            wtr.write_record(&record)
                .map_err(|e| BasketIndexError::Report {
                    reason: format!("CSV write error: {}", e),
                })?;
        }

        wtr.flush().map_err(|e| BasketIndexError::Report {
            reason: format!("CSV flush error: {}", e),
        })?;
        Ok(())
    }
}
