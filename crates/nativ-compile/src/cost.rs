//! Circuit cost model.
//!
//! Costs compare lexicographically: multi-qubit (ECR) count first, then
//! single-qubit count, then depth.

use serde::{Deserialize, Serialize};
use std::fmt;

use nativ_ir::Circuit;

/// Lexicographic cost of a circuit.
///
/// Field order defines the ordering, so the derived `Ord` is the cost order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CircuitCost {
    /// Instructions on two or more qubits.
    pub multi_qubit: usize,
    /// Instructions on one qubit.
    pub single_qubit: usize,
    /// Largest number of instructions on any one qubit.
    pub depth: usize,
}

impl CircuitCost {
    /// Measure a circuit.
    pub fn of(circuit: &Circuit) -> Self {
        let multi_qubit = circuit.num_multi_qubit_ops();
        Self {
            multi_qubit,
            single_qubit: circuit.len() - multi_qubit,
            depth: circuit.depth(),
        }
    }

    /// Total instruction count.
    pub fn total(&self) -> usize {
        self.multi_qubit + self.single_qubit
    }
}

impl fmt::Display for CircuitCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} multi-qubit, {} single-qubit, depth {}",
            self.multi_qubit, self.single_qubit, self.depth
        )
    }
}

/// Result of a peephole optimization run, stored in the
/// [`PropertySet`](crate::PropertySet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationReport {
    /// Cost before optimization.
    pub before: CircuitCost,
    /// Cost after optimization.
    pub after: CircuitCost,
    /// Number of rewrite rounds until the fixed point.
    pub iterations: usize,
}

impl OptimizationReport {
    /// Number of instructions removed.
    pub fn removed(&self) -> usize {
        self.before.total().saturating_sub(self.after.total())
    }
}
