//! Domain error types.

use crate::domain::basket::BasketError;

/// Top-level error type for basketindex.
#[derive(Debug, thiserror::Error)]
pub enum BasketIndexError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("price data error: {reason}")]
    PriceData { reason: String },

    #[error("no price data for {asset_id}")]
    NoData { asset_id: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Basket(#[from] BasketError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BasketIndexError> for std::process::ExitCode {
    fn from(err: &BasketIndexError) -> Self {
        let code: u8 = match err {
            BasketIndexError::Io(_) => 1,
            BasketIndexError::ConfigParse { .. }
            | BasketIndexError::ConfigMissing { .. }
            | BasketIndexError::ConfigInvalid { .. } => 2,
            BasketIndexError::PriceData { .. } | BasketIndexError::Report { .. } => 3,
            BasketIndexError::Basket(_) => 4,
            BasketIndexError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
