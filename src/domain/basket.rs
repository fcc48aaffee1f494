//! Basket definitions: symbol-list parsing and data-availability checks.

use chrono::NaiveDate;

use crate::domain::error::BasketIndexError;
use crate::domain::index::IndexMode;
use crate::ports::price_port::PricePort;
use std::collections::HashSet;

/// Two closes is the minimum for the series to show any movement at all.
pub const MIN_CLOSE_ROWS: usize = 2;

/// A user-defined pseudo-ETF basket.
#[derive(Debug, Clone)]
pub struct Basket {
    pub name: String,
    pub symbols: Vec<String>,
    pub mode: IndexMode,
    pub base_value: f64,
    pub include_breakdown: bool,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum BasketError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),

    #[error("unknown mode: {0} (expected 'static' or 'dynamic_entry')")]
    UnknownMode(String),

    #[error("all symbols failed validation")]
    AllSymbolsFailed,
}

/// Parse a comma-separated symbol list: trimmed, upper-cased, no blanks, no
/// duplicates.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, BasketError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(BasketError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if seen.contains(&symbol) {
            return Err(BasketError::DuplicateSymbol(symbol));
        }
        seen.insert(symbol.clone());
        symbols.push(symbol);
    }

    Ok(symbols)
}

/// Parse a mode name, binding the entry floor for dynamic baskets.
pub fn parse_mode(name: &str, min_entry_price: f64) -> Result<IndexMode, BasketError> {
    match name {
        "static" => Ok(IndexMode::Static),
        "dynamic_entry" => Ok(IndexMode::DynamicEntry { min_entry_price }),
        other => Err(BasketError::UnknownMode(other.to_string())),
    }
}

pub struct BasketValidationResult {
    pub symbols: Vec<String>,
    pub skipped: Vec<SkippedSymbol>,
}

#[derive(Debug, Clone)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone)]
pub enum SkipReason {
    NoData,
    InsufficientRows { rows: usize },
}

/// Check each symbol against the price provider, keeping those with usable
/// data and reporting the rest. An empty surviving list is not an error
/// here; callers decide whether that means "no data yet" or a failure.
pub fn validate_symbols(
    price_port: &dyn PricePort,
    symbols: Vec<String>,
    start_date: NaiveDate,
) -> Result<BasketValidationResult, BasketIndexError> {
    let mut valid = Vec::new();
    let mut skipped = Vec::new();

    for symbol in symbols {
        let closes = match price_port.fetch_closes(&symbol, start_date) {
            Ok(closes) => closes,
            Err(e) => {
                eprintln!("Warning: skipping {} ({})", symbol, e);
                skipped.push(SkippedSymbol {
                    symbol,
                    reason: SkipReason::NoData,
                });
                continue;
            }
        };

        if closes.is_empty() {
            eprintln!("Warning: skipping {} (no data found)", symbol);
            skipped.push(SkippedSymbol {
                symbol,
                reason: SkipReason::NoData,
            });
            continue;
        }

        if closes.len() < MIN_CLOSE_ROWS {
            eprintln!(
                "Warning: skipping {} (only {} rows, minimum {} required)",
                symbol,
                closes.len(),
                MIN_CLOSE_ROWS
            );
            skipped.push(SkippedSymbol {
                symbol,
                reason: SkipReason::InsufficientRows { rows: closes.len() },
            });
            continue;
        }

        valid.push(symbol);
    }

    Ok(BasketValidationResult {
        symbols: valid,
        skipped,
    })
}
