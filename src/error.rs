//! Errors raised at the engine boundary.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Caller contract violations. Per-piece packing failures are never errors;
/// they are reported in [`crate::types::PackingResult::unplaced`].
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("sheet dimensions must be positive, got {0}x{1}")]
    InvalidStock(f64, f64),

    #[error("kerf must be a non-negative number, got {0}")]
    InvalidKerf(f64),

    #[error("sheet cap must be at least 1")]
    InvalidSheetCap,

    #[error("piece '{label}' has invalid dimensions {width}x{height}")]
    InvalidPiece {
        label: String,
        width: f64,
        height: f64,
    },
}
