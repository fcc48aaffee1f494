//! Index-series output port trait.

use crate::domain::error::BasketIndexError;
use crate::domain::index::IndexPoint;
use std::io::Write;

/// Sink for a computed index series. Writing to a generic `Write` leaves the
/// choice of stdout versus file to the caller.
pub trait ReportPort {
    fn write(&self, series: &[IndexPoint], out: &mut dyn Write) -> Result<(), BasketIndexError>;
}
