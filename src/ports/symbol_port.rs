//! Display-symbol lookup port trait.

/// Maps asset ids to display symbols. Consulted only when breakdown output
/// is requested; ids without a mapping fall back to themselves.
pub trait SymbolLookupPort {
    fn display_symbol(&self, asset_id: &str) -> Option<String>;
}
