//! nativ circuit model
//!
//! This crate provides the structural representation of quantum circuits
//! consumed and produced by the nativ basis-gate compiler: a fixed-size qubit
//! register and an ordered list of validated gate instructions.
//!
//! # Core Components
//!
//! - [`QubitId`]: index into the register
//! - [`GateKind`]: the fixed gate vocabulary, native and composite
//! - [`Instruction`]: a gate with its qubit operands and angle parameters
//! - [`Circuit`]: the register plus instructions, with validated construction
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use nativ_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new(2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.len(), 2);
//! assert!(!circuit.is_native());
//! ```
//!
//! # Native Basis
//!
//! | Gate | Qubits | Parameters |
//! |------|--------|------------|
//! | `id` | 1 | 0 |
//! | `x` | 1 | 0 |
//! | `sx` | 1 | 0 |
//! | `rz` | 1 | 1 |
//! | `ecr` | 2 | 0 |
//!
//! Every other [`GateKind`] is composite and is rewritten by the compiler.
//!
//! # Interchange Format
//!
//! Circuits serialize to JSON as
//! `{"name", "qubit_count", "instructions": [{"kind", "qubits", "parameters"}]}`.
//! Deserialization applies the same validation as [`Circuit::append`].

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult, Operand};
pub use gate::GateKind;
pub use instruction::Instruction;
pub use qubit::QubitId;
