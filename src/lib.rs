//! basketindex — equal-weight "pseudo-ETF" index builder.
//!
//! Turns a basket of per-asset daily close histories into a single
//! normalized performance series with quarterly rebalancing and an optional
//! dynamic-entry mode that admits constituents over time.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
