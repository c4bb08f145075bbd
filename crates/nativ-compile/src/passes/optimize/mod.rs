//! Optimization passes.

mod peephole;


pub use peephole::PeepholeOptimizer;

/// Tolerance for angle comparisons.
pub(super) const EPSILON: f64 = 1e-10;
