//! nativ compilation framework
//!
//! This crate rewrites circuits over the full [`GateKind`](nativ_ir::GateKind) vocabulary into
//! the hardware-native basis `{id, rz, sx, x, ecr}` and reduces their cost.
//! It follows a pass-based architecture: each stage is a [`Pass`] run in
//! order by a [`PassManager`], sharing results through a [`PropertySet`].
//!
//! # Architecture
//!
//! ```text
//! Input Circuit
//!       |
//!       v
//! +-------------+
//! | PassManager | <-- PropertySet (basis gates, cost reports)
//! +-------------+
//!       |
//!       +-- BasisTranslation   (rule table, worklist to a fixed point)
//!       +-- PeepholeOptimizer  (rz fusion, x/sx cancellation)
//!       +-- CostAnalysis
//!       |
//!       v
//! Native Circuit
//! ```
//!
//! The [`EquivalenceVerifier`] sits outside the pipeline and checks, for
//! small registers, that a compiled circuit implements the original unitary
//! up to global phase.
//!
//! # Example: Basic Compilation
//!
//! ```rust
//! use nativ_compile::{CompilerConfig, EquivalenceVerifier, compile};
//! use nativ_ir::Circuit;
//!
//! let circuit = Circuit::bell().unwrap();
//! let compiled = compile(&circuit, &CompilerConfig::default()).unwrap();
//!
//! assert!(compiled.is_native());
//! assert_eq!(compiled.count_ops().get("ecr"), Some(&1));
//! EquivalenceVerifier::default().verify(&circuit, &compiled).unwrap();
//! ```
//!
//! # Optimization Levels
//!
//! | Level | Passes Included |
//! |-------|-----------------|
//! | 0 | Basis translation |
//! | 1-3 | + Peephole optimization |
//!
//! # Custom Passes
//!
//! Implement the [`Pass`] trait to create custom compilation passes:
//!
//! ```rust
//! use nativ_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use nativ_ir::Circuit;
//!
//! struct MyCustomPass;
//!
//! impl Pass for MyCustomPass {
//!     fn name(&self) -> &str { "my_custom_pass" }
//!     fn kind(&self) -> PassKind { PassKind::Analysis }
//!
//!     fn run(&self, circuit: &mut Circuit, props: &mut PropertySet) -> CompileResult<()> {
//!         Ok(())
//!     }
//! }
//! ```

pub mod config;
pub mod cost;
pub mod error;
pub mod library;
pub mod manager;
pub mod pass;
pub mod property;
pub mod unitary;
pub mod verify;

// Built-in passes
pub mod passes;

use nativ_ir::Circuit;

pub use config::{CompilerConfig, VerifierConfig};
pub use cost::{CircuitCost, OptimizationReport};
pub use error::{CompileError, CompileResult};
pub use library::{Matrix, gate_matrix};
pub use manager::{PassManager, PassManagerBuilder};
pub use pass::{Pass, PassKind};
pub use property::{BasisGates, PropertySet};
pub use unitary::circuit_unitary;
pub use verify::{EquivalenceVerifier, VerificationReport};

/// Compile `circuit` into the configured basis.
///
/// The input is left untouched; the result is a new circuit over the same
/// register.
pub fn compile(circuit: &Circuit, config: &CompilerConfig) -> CompileResult<Circuit> {
    compile_with_properties(circuit, config).map(|(compiled, _)| compiled)
}

/// Compile `circuit` and also return the property set filled by the passes,
/// including the [`OptimizationReport`] and final [`CircuitCost`].
pub fn compile_with_properties(
    circuit: &Circuit,
    config: &CompilerConfig,
) -> CompileResult<(Circuit, PropertySet)> {
    config.validate()?;
    let (pm, mut properties) = PassManagerBuilder::from_config(config).build();

    let mut compiled = circuit.clone();
    pm.run(&mut compiled, &mut properties)?;
    Ok((compiled, properties))
}
