//! High-level circuit builder API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{IrError, IrResult};
use crate::gate::GateKind;
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// A quantum circuit: a fixed-size qubit register and an ordered list of
/// validated instructions.
///
/// Instructions are causally ordered per qubit by their position in the list.
/// The register size never changes after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircuitRecord")]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits in the register.
    qubit_count: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

/// Unvalidated wire form of a [`Circuit`].
#[derive(Deserialize)]
struct CircuitRecord {
    #[serde(default = "default_name")]
    name: String,
    qubit_count: u32,
    #[serde(default)]
    instructions: Vec<Instruction>,
}

fn default_name() -> String {
    "circuit".into()
}

impl TryFrom<CircuitRecord> for Circuit {
    type Error = IrError;

    fn try_from(record: CircuitRecord) -> Result<Self, Self::Error> {
        let mut circuit = Circuit::with_name(record.name, record.qubit_count);
        circuit.replace_instructions(record.instructions)?;
        Ok(circuit)
    }
}

impl Circuit {
    /// Create an empty circuit over `qubit_count` qubits.
    pub fn new(qubit_count: u32) -> Self {
        Self::with_name(default_name(), qubit_count)
    }

    /// Create an empty named circuit.
    pub fn with_name(name: impl Into<String>, qubit_count: u32) -> Self {
        Self {
            name: name.into(),
            qubit_count,
            instructions: vec![],
        }
    }

    /// Append a gate after validating its operands against the register.
    ///
    /// Fails with [`IrError::InvalidQubitIndex`] or [`IrError::ArityMismatch`]
    /// and leaves the circuit unchanged.
    pub fn append(&mut self, kind: GateKind, qubits: &[QubitId], parameters: &[f64]) -> IrResult<()> {
        self.push(Instruction::gate(
            kind,
            qubits.iter().copied(),
            parameters.iter().copied(),
        ))?;
        Ok(())
    }

    /// Append a prebuilt instruction after validating it.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        instruction.validate(self.qubit_count)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Replace the whole instruction list, validating every entry first.
    ///
    /// On error the circuit keeps its previous instructions.
    pub fn replace_instructions(&mut self, instructions: Vec<Instruction>) -> IrResult<()> {
        for inst in &instructions {
            inst.validate(self.qubit_count)?;
        }
        self.instructions = instructions;
        Ok(())
    }

    fn apply(&mut self, kind: GateKind, qubits: &[QubitId], parameters: &[f64]) -> IrResult<&mut Self> {
        self.append(kind, qubits, parameters)?;
        Ok(self)
    }

    // =========================================================================
    // Native gates
    // =========================================================================

    /// Apply identity gate.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Id, &[qubit], &[])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::X, &[qubit], &[])
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::SX, &[qubit], &[])
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Rz, &[qubit], &[theta])
    }

    /// Apply echoed cross-resonance gate.
    pub fn ecr(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::ECR, &[q1, q2], &[])
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Y, &[qubit], &[])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Z, &[qubit], &[])
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::H, &[qubit], &[])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::S, &[qubit], &[])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Sdg, &[qubit], &[])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::T, &[qubit], &[])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Tdg, &[qubit], &[])
    }

    /// Apply sqrt(X)-dagger gate.
    pub fn sxdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::SXdg, &[qubit], &[])
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::P, &[qubit], &[theta])
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Rx, &[qubit], &[theta])
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Ry, &[qubit], &[theta])
    }

    /// Apply universal U gate.
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::U, &[qubit], &[theta, phi, lambda])
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CX, &[control, target], &[])
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CY, &[control, target], &[])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CZ, &[control, target], &[])
    }

    /// Apply controlled-Hadamard gate.
    pub fn ch(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CH, &[control, target], &[])
    }

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CP, &[control, target], &[theta])
    }

    /// Apply controlled-Rx gate.
    pub fn crx(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CRx, &[control, target], &[theta])
    }

    /// Apply controlled-Ry gate.
    pub fn cry(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CRy, &[control, target], &[theta])
    }

    /// Apply controlled-Rz gate.
    pub fn crz(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CRz, &[control, target], &[theta])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Swap, &[q1, q2], &[])
    }

    // =========================================================================
    // Three-qubit gates
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CCX, &[c1, c2, target], &[])
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CSwap, &[control, t1, t2], &[])
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.qubit_count
    }

    /// Get the instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Check that every instruction is in the native basis.
    pub fn is_native(&self) -> bool {
        self.instructions.iter().all(Instruction::is_native)
    }

    /// Circuit depth: the largest number of instructions touching any one qubit.
    pub fn depth(&self) -> usize {
        let mut per_qubit = vec![0usize; self.qubit_count as usize];
        for inst in &self.instructions {
            for q in &inst.qubits {
                per_qubit[q.index()] += 1;
            }
        }
        per_qubit.into_iter().max().unwrap_or(0)
    }

    /// Number of instructions acting on two or more qubits.
    pub fn num_multi_qubit_ops(&self) -> usize {
        self.instructions
            .iter()
            .filter(|inst| inst.qubits.len() > 1)
            .count()
    }

    /// Instruction counts keyed by gate name.
    pub fn count_ops(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    // =========================================================================
    // Interchange
    // =========================================================================

    /// Parse and validate a circuit from its JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the circuit to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state preparation circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_name("bell", 2);
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
        Ok(circuit)
    }

    /// Create a GHZ state preparation circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_name("ghz", n);
        if n == 0 {
            return Ok(circuit);
        }

        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        Ok(circuit)
    }

    /// Create a QFT circuit.
    pub fn qft(n: u32) -> IrResult<Self> {
        use std::f64::consts::PI;

        let mut circuit = Self::with_name("qft", n);
        for i in 0..n {
            circuit.h(QubitId(i))?;
            for j in (i + 1)..n {
                let angle = PI / 2f64.powi((j - i) as i32);
                circuit.cp(angle, QubitId(j), QubitId(i))?;
            }
        }

        // Bit reversal
        for i in 0..n / 2 {
            circuit.swap(QubitId(i), QubitId(n - 1 - i))?;
        }
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Operand;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new(3);
        assert_eq!(circuit.name(), "circuit");
        assert_eq!(circuit.num_qubits(), 3);
        assert!(circuit.is_empty());
        assert!(circuit.is_native());
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_append_validates() {
        let mut circuit = Circuit::new(2);
        circuit.append(GateKind::H, &[QubitId(0)], &[]).unwrap();

        let err = circuit
            .append(GateKind::X, &[QubitId(2)], &[])
            .unwrap_err();
        assert_eq!(
            err,
            IrError::InvalidQubitIndex {
                kind: GateKind::X,
                qubit: QubitId(2),
                qubit_count: 2,
            }
        );

        let err = circuit
            .append(GateKind::Rz, &[QubitId(0)], &[])
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::ArityMismatch {
                kind: GateKind::Rz,
                operand: Operand::Parameters,
                ..
            }
        ));

        assert_eq!(circuit.len(), 1);
    }

    #[test]
    fn test_is_native() {
        let mut circuit = Circuit::new(2);
        circuit.rz(PI, QubitId(0)).unwrap().sx(QubitId(1)).unwrap();
        circuit.ecr(QubitId(0), QubitId(1)).unwrap();
        assert!(circuit.is_native());

        circuit.h(QubitId(0)).unwrap();
        assert!(!circuit.is_native());
    }

    #[test]
    fn test_depth_and_counts() {
        let circuit = Circuit::ghz(3).unwrap();
        // q1 is touched by both CX gates
        assert_eq!(circuit.depth(), 2);
        assert_eq!(circuit.num_multi_qubit_ops(), 2);

        let counts = circuit.count_ops();
        assert_eq!(counts.get("h"), Some(&1));
        assert_eq!(counts.get("cx"), Some(&2));
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.len(), 2);
        assert_eq!(circuit.instructions()[1].kind, GateKind::CX);
    }

    #[test]
    fn test_qft_structure() {
        let circuit = Circuit::qft(3).unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts.get("h"), Some(&3));
        assert_eq!(counts.get("cp"), Some(&3));
        assert_eq!(counts.get("swap"), Some(&1));
    }

    #[test]
    fn test_qft_wide_register() {
        let circuit = Circuit::qft(40).unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts.get("h"), Some(&40));
        assert_eq!(counts.get("cp"), Some(&(40 * 39 / 2)));
        assert_eq!(counts.get("swap"), Some(&20));

        // cp(q39, q0) carries the smallest angle, pi / 2^39
        let smallest = circuit
            .instructions()
            .iter()
            .filter_map(Instruction::angle)
            .fold(f64::INFINITY, f64::min);
        assert!((smallest - PI / 2f64.powi(39)).abs() < 1e-24);
        assert!(smallest > 0.0);
    }

    #[test]
    fn test_replace_instructions_is_atomic() {
        let mut circuit = Circuit::bell().unwrap();
        let bad = vec![
            Instruction::single_qubit_gate(GateKind::X, QubitId(0)),
            Instruction::single_qubit_gate(GateKind::X, QubitId(5)),
        ];
        assert!(circuit.replace_instructions(bad).is_err());
        assert_eq!(circuit.len(), 2);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut circuit = Circuit::with_name("demo", 2);
        circuit.u(0.1, 0.2, 0.3, QubitId(1)).unwrap();
        circuit.cx(QubitId(1), QubitId(0)).unwrap();

        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
    }

    #[test]
    fn test_json_defaults_and_validation() {
        let json = r#"{"qubit_count": 1, "instructions": [{"kind": "h", "qubits": [0]}]}"#;
        let circuit: Circuit = serde_json::from_str(json).unwrap();
        assert_eq!(circuit.name(), "circuit");
        assert_eq!(circuit.len(), 1);

        let json = r#"{"qubit_count": 1, "instructions": [{"kind": "cx", "qubits": [0, 1]}]}"#;
        let err = serde_json::from_str::<Circuit>(json).unwrap_err();
        assert!(err.to_string().contains("cx"), "{err}");
    }
}
