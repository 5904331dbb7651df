//! Rectangular sheet cutting: packs a list of pieces onto fixed-size stock
//! sheets using maximal free rectangles, a small grid of sort orders and fit
//! heuristics, and a consolidation pass that empties the sparsest sheet.

pub mod error;
pub mod geometry;
pub mod maxrects;
pub mod render;
pub mod score;
pub mod solver;
pub mod suggest;
pub mod types;

pub use error::{Error, Result};
pub use solver::Solver;
