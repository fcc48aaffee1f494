//! Port traits at the system's seams.

pub mod config_port;
pub mod price_port;
pub mod report_port;
pub mod symbol_port;
