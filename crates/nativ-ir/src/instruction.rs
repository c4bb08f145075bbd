//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult, Operand};
use crate::gate::GateKind;
use crate::qubit::QubitId;

/// A gate applied to an ordered list of qubits with its angle parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of gate.
    pub kind: GateKind,
    /// Qubits this instruction operates on, in operand order.
    pub qubits: Vec<QubitId>,
    /// Angle parameters in radians.
    #[serde(default)]
    pub parameters: Vec<f64>,
}

impl Instruction {
    /// Create an instruction without validating its shape.
    ///
    /// Shape is checked when the instruction enters a [`Circuit`](crate::Circuit).
    pub fn gate(
        kind: GateKind,
        qubits: impl IntoIterator<Item = QubitId>,
        parameters: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            kind,
            qubits: qubits.into_iter().collect(),
            parameters: parameters.into_iter().collect(),
        }
    }

    /// Create a parameterless single-qubit gate instruction.
    pub fn single_qubit_gate(kind: GateKind, qubit: QubitId) -> Self {
        Self::gate(kind, [qubit], [])
    }

    /// Create a single-qubit gate instruction with one angle.
    pub fn rotation(kind: GateKind, theta: f64, qubit: QubitId) -> Self {
        Self::gate(kind, [qubit], [theta])
    }

    /// Create an RZ instruction.
    pub fn rz(theta: f64, qubit: QubitId) -> Self {
        Self::rotation(GateKind::Rz, theta, qubit)
    }

    /// Create a parameterless two-qubit gate instruction.
    pub fn two_qubit_gate(kind: GateKind, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(kind, [q1, q2], [])
    }

    /// Check arity, parameter count, register range and operand uniqueness.
    pub fn validate(&self, qubit_count: u32) -> IrResult<()> {
        let kind = self.kind;
        if self.qubits.len() != kind.num_qubits() {
            return Err(IrError::ArityMismatch {
                kind,
                operand: Operand::Qubits,
                expected: kind.num_qubits(),
                got: self.qubits.len(),
            });
        }
        if self.parameters.len() != kind.num_params() {
            return Err(IrError::ArityMismatch {
                kind,
                operand: Operand::Parameters,
                expected: kind.num_params(),
                got: self.parameters.len(),
            });
        }
        for (i, &qubit) in self.qubits.iter().enumerate() {
            if qubit.0 >= qubit_count {
                return Err(IrError::InvalidQubitIndex {
                    kind,
                    qubit,
                    qubit_count,
                });
            }
            if self.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit { kind, qubit });
            }
        }
        if let Some((index, &value)) = self
            .parameters
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite())
        {
            return Err(IrError::InvalidParameter { kind, index, value });
        }
        Ok(())
    }

    /// Get the gate name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Check if the gate is in the native basis.
    pub fn is_native(&self) -> bool {
        self.kind.is_native()
    }

    /// First angle parameter, if any.
    pub fn angle(&self) -> Option<f64> {
        self.parameters.first().copied()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;
        if !self.parameters.is_empty() {
            let params: Vec<_> = self.parameters.iter().map(|p| format!("{p:.6}")).collect();
            write!(f, "({})", params.join(", "))?;
        }
        let qubits: Vec<_> = self.qubits.iter().map(ToString::to_string).collect();
        write!(f, " {}", qubits.join(", "))
    }
}
