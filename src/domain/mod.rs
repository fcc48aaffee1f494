//! Core domain types and logic for the indexing engine.

pub mod admission;
pub mod basket;
pub mod error;
pub mod index;
pub mod ledger;
pub mod price_series;
pub mod rebalance;
