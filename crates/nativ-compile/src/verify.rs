//! Equivalence checking by dense unitary comparison.
//!
//! The verifier is a test oracle: it rebuilds the unitary of both circuits,
//! removes the global phase and compares entrywise. It is never part of the
//! compilation pipeline itself.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use nativ_ir::Circuit;

use crate::config::VerifierConfig;
use crate::error::{CompileError, CompileResult};
use crate::library::Matrix;
use crate::unitary::circuit_unitary;

/// Outcome of a successful equivalence check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Largest entrywise deviation after phase alignment.
    pub max_deviation: f64,
    /// Register size of the compared circuits.
    pub num_qubits: u32,
}

/// Checks that two circuits implement the same unitary up to global phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquivalenceVerifier {
    /// Largest register accepted.
    pub max_qubits: u32,
    /// Maximum entrywise deviation.
    pub tolerance: f64,
}

impl Default for EquivalenceVerifier {
    fn default() -> Self {
        Self::from(&VerifierConfig::default())
    }
}

impl From<&VerifierConfig> for EquivalenceVerifier {
    fn from(config: &VerifierConfig) -> Self {
        Self {
            max_qubits: config.max_qubits,
            tolerance: config.tolerance,
        }
    }
}

impl EquivalenceVerifier {
    /// Create a verifier with explicit limits.
    pub fn new(max_qubits: u32, tolerance: f64) -> Self {
        Self {
            max_qubits,
            tolerance,
        }
    }

    /// Compare `compiled` against `original`.
    pub fn verify(&self, original: &Circuit, compiled: &Circuit) -> CompileResult<VerificationReport> {
        if original.num_qubits() != compiled.num_qubits() {
            return Err(CompileError::QubitCountMismatch {
                original: original.num_qubits(),
                compiled: compiled.num_qubits(),
            });
        }
        let num_qubits = original.num_qubits();
        if num_qubits > self.max_qubits {
            return Err(CompileError::VerifierQubitLimit {
                num_qubits,
                max_qubits: self.max_qubits,
            });
        }

        let expected = circuit_unitary(original)?;
        let actual = circuit_unitary(compiled)?;
        let (max_deviation, row, col) = phase_aligned_deviation(&expected, &actual);
        debug!(
            "Verified {} against {}: max deviation {:.3e} at ({}, {})",
            compiled.name(),
            original.name(),
            max_deviation,
            row,
            col
        );

        if max_deviation > self.tolerance {
            return Err(CompileError::EquivalenceViolation {
                max_deviation,
                row,
                col,
                tolerance: self.tolerance,
            });
        }
        Ok(VerificationReport {
            max_deviation,
            num_qubits,
        })
    }
}

/// Largest `|actual - phase * expected|` and where it occurs.
///
/// The phase is fixed by the first entry of `expected`, in row-major order,
/// that is clearly nonzero. Every column of a unitary has unit norm, so an
/// entry of magnitude at least `1 / (2 sqrt(dim))` always exists.
pub fn phase_aligned_deviation(expected: &Matrix, actual: &Matrix) -> (f64, usize, usize) {
    let dim = expected.nrows().max(1);
    #[allow(clippy::cast_precision_loss)]
    let threshold = 0.5 / (dim as f64).sqrt();

    let phase = expected
        .indexed_iter()
        .find(|(_, e)| e.norm() >= threshold)
        .map(|(idx, e)| actual[idx] / e)
        .filter(|ratio| ratio.norm() > 0.0)
        .map_or(Complex64::new(1.0, 0.0), |ratio| ratio / ratio.norm());

    let mut worst = (0.0, 0, 0);
    for ((row, col), e) in expected.indexed_iter() {
        let deviation = (actual[[row, col]] - phase * e).norm();
        if deviation > worst.0 {
            worst = (deviation, row, col);
        }
    }
    worst
}
