//! Error types for the IR crate.

use std::fmt;

use crate::gate::GateKind;
use crate::qubit::QubitId;
use thiserror::Error;

/// Which operand list of an instruction failed an arity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The qubit operands.
    Qubits,
    /// The angle parameters.
    Parameters,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Qubits => f.write_str("qubits"),
            Operand::Parameters => f.write_str("parameters"),
        }
    }
}

/// Errors that can occur when building or loading a circuit.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index outside the register.
    #[error("Qubit {qubit} out of range for {qubit_count}-qubit register (gate: {kind})")]
    InvalidQubitIndex {
        /// Gate being appended.
        kind: GateKind,
        /// The offending qubit.
        qubit: QubitId,
        /// Register size.
        qubit_count: u32,
    },

    /// Wrong number of qubits or parameters for a gate kind.
    #[error("Gate '{kind}' requires {expected} {operand}, got {got}")]
    ArityMismatch {
        /// Gate being appended.
        kind: GateKind,
        /// Which operand list is wrong.
        operand: Operand,
        /// Fixed count for this kind.
        expected: usize,
        /// Count actually supplied.
        got: usize,
    },

    /// The same qubit appears twice in one instruction.
    #[error("Duplicate qubit {qubit} in operation (gate: {kind})")]
    DuplicateQubit {
        /// Gate being appended.
        kind: GateKind,
        /// The repeated qubit.
        qubit: QubitId,
    },

    /// Angle is NaN or infinite.
    #[error("Parameter {index} of gate '{kind}' is not finite: {value}")]
    InvalidParameter {
        /// Gate being appended.
        kind: GateKind,
        /// Position in the parameter list.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// Gate name not in the supported vocabulary.
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
