//! Error types for the compilation crate.

use nativ_ir::{GateKind, IrError};
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// Gate kind is neither in the basis nor covered by a rewrite rule.
    #[error("No rewrite rule for gate '{0}' and it is not in the target basis")]
    UnsupportedGateKind(GateKind),

    /// Rewriting did not reach the basis within the configured ceilings.
    #[error(
        "Decomposition of '{kind}' did not terminate: depth {depth} (limit {max_depth}), \
         {emitted} instructions (limit {max_instructions})"
    )]
    DecompositionTooDeep {
        kind: GateKind,
        depth: usize,
        max_depth: usize,
        emitted: usize,
        max_instructions: usize,
    },

    /// Compiled circuit does not implement the original unitary.
    #[error(
        "Unitaries differ by {max_deviation:.3e} at ({row}, {col}), tolerance {tolerance:.1e}"
    )]
    EquivalenceViolation {
        max_deviation: f64,
        row: usize,
        col: usize,
        tolerance: f64,
    },

    /// Circuit too large for dense unitary reconstruction.
    #[error("Verifier supports at most {max_qubits} qubits, circuit has {num_qubits}")]
    VerifierQubitLimit { num_qubits: u32, max_qubits: u32 },

    /// The two circuits being compared act on different registers.
    #[error("Qubit count mismatch: original has {original}, compiled has {compiled}")]
    QubitCountMismatch { original: u32, compiled: u32 },

    /// Invalid compiler configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
