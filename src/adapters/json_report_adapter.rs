//! JSON report adapter.

use crate::domain::error::BasketIndexError;
use crate::domain::index::IndexPoint;
use crate::ports::report_port::ReportPort;
use std::io::Write;

pub struct JsonReportAdapter;

impl ReportPort for JsonReportAdapter {
    fn write(&self, series: &[IndexPoint], out: &mut dyn Write) -> Result<(), BasketIndexError> {
        serde_json::to_writer_pretty(&mut *out, series).map_err(|e| BasketIndexError::Report {
            reason: format!("JSON write error: {}", e),
        })?;
        writeln!(out)?;
        Ok(())
    }
}
