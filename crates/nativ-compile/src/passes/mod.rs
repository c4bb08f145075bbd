//! Built-in compilation passes.
//!
//! - [`decompose`]: rewriting into the target basis
//! - [`optimize`]: peephole optimization of native circuits
//! - [`analysis`]: read-only cost measurement

pub mod analysis;
pub mod decompose;
pub mod optimize;

pub use analysis::CostAnalysis;
pub use decompose::{BasisTranslation, Decomposer, RewriteRule, RuleTable, Template};
pub use optimize::PeepholeOptimizer;
