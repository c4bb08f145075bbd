//! Property-based tests for circuit construction and the JSON interchange.
//!
//! Every append must either succeed and grow the circuit by one validated
//! instruction, or fail and leave the circuit untouched.

use nativ_ir::{Circuit, GateKind, Instruction, IrError, QubitId};
use proptest::collection::SizeRange;
use proptest::prelude::*;

/// A gate request that may or may not be valid for the register.
#[derive(Debug, Clone)]
struct GateRequest {
    kind: GateKind,
    qubits: Vec<u32>,
    parameters: Vec<f64>,
}

impl GateRequest {
    fn expected_valid(&self, qubit_count: u32) -> bool {
        let in_range = self.qubits.iter().all(|&q| q < qubit_count);
        let distinct = self
            .qubits
            .iter()
            .enumerate()
            .all(|(i, q)| !self.qubits[..i].contains(q));
        self.qubits.len() == self.kind.num_qubits()
            && self.parameters.len() == self.kind.num_params()
            && in_range
            && distinct
    }

    fn qubit_ids(&self) -> Vec<QubitId> {
        self.qubits.iter().copied().map(QubitId).collect()
    }
}

fn arb_kind() -> impl Strategy<Value = GateKind> {
    prop::sample::select(GateKind::ALL.to_vec())
}

/// Requests drawn with the right arity most of the time, but free to pick
/// out-of-range or repeated qubits.
fn arb_request(qubit_count: u32) -> impl Strategy<Value = GateRequest> {
    (arb_kind(), prop::bool::weighted(0.8)).prop_flat_map(move |(kind, exact_arity)| {
        let (nq, np): (SizeRange, SizeRange) = if exact_arity {
            (kind.num_qubits().into(), kind.num_params().into())
        } else {
            ((1..=3).into(), (0..=3).into())
        };
        (
            prop::collection::vec(0..qubit_count + 2, nq),
            prop::collection::vec(-10.0f64..10.0, np),
        )
            .prop_map(move |(qubits, parameters)| GateRequest {
                kind,
                qubits,
                parameters,
            })
    })
}

fn arb_requests() -> impl Strategy<Value = (u32, Vec<GateRequest>)> {
    (1u32..=4).prop_flat_map(|n| (Just(n), prop::collection::vec(arb_request(n), 0..30)))
}

/// A circuit built only from valid requests.
fn arb_valid_circuit() -> impl Strategy<Value = Circuit> {
    arb_requests().prop_map(|(n, requests)| {
        let mut circuit = Circuit::with_name("prop", n);
        for req in requests.into_iter().filter(|r| r.expected_valid(n)) {
            circuit
                .append(req.kind, &req.qubit_ids(), &req.parameters)
                .unwrap();
        }
        circuit
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn append_is_all_or_nothing((n, requests) in arb_requests()) {
        let mut circuit = Circuit::new(n);
        for req in requests {
            let before = circuit.clone();
            let result = circuit.append(req.kind, &req.qubit_ids(), &req.parameters);

            prop_assert_eq!(result.is_ok(), req.expected_valid(n));
            if result.is_ok() {
                prop_assert_eq!(circuit.len(), before.len() + 1);
            } else {
                prop_assert_eq!(&circuit, &before);
            }
        }
        for inst in circuit.instructions() {
            prop_assert!(inst.validate(n).is_ok());
        }
    }

    #[test]
    fn json_preserves_structure(circuit in arb_valid_circuit()) {
        let json = circuit.to_json().unwrap();
        let back = Circuit::from_json(&json).unwrap();

        prop_assert_eq!(back.name(), circuit.name());
        prop_assert_eq!(back.num_qubits(), circuit.num_qubits());
        prop_assert_eq!(back.len(), circuit.len());
        for (a, b) in circuit.instructions().iter().zip(back.instructions()) {
            prop_assert_eq!(a.kind, b.kind);
            prop_assert_eq!(&a.qubits, &b.qubits);
            prop_assert_eq!(a.parameters.len(), b.parameters.len());
            for (x, y) in a.parameters.iter().zip(&b.parameters) {
                prop_assert!((x - y).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn metrics_are_consistent(circuit in arb_valid_circuit()) {
        let total: usize = circuit.count_ops().values().sum();
        prop_assert_eq!(total, circuit.len());
        prop_assert!(circuit.depth() <= circuit.len());
        prop_assert!(circuit.num_multi_qubit_ops() <= circuit.len());
        if !circuit.is_empty() {
            prop_assert!(circuit.depth() >= 1);
        }
    }

    #[test]
    fn replace_rejects_any_bad_entry(circuit in arb_valid_circuit(), extra in 0u32..8) {
        let mut target = circuit.clone();
        let mut instructions = circuit.instructions().to_vec();
        let bad_qubit = circuit.num_qubits() + extra;
        instructions.push(Instruction::single_qubit_gate(GateKind::X, QubitId(bad_qubit)));

        let err = target.replace_instructions(instructions).unwrap_err();
        let is_range_error = matches!(err, IrError::InvalidQubitIndex { .. });
        prop_assert!(is_range_error);
        prop_assert_eq!(&target, &circuit);
    }
}

#[test]
fn json_rejects_invalid_instruction() {
    let json = r#"{"qubit_count": 2, "instructions": [{"kind": "cx", "qubits": [1, 1]}]}"#;
    assert!(Circuit::from_json(json).is_err());

    let json = r#"{"qubit_count": 1, "instructions": [{"kind": "rz", "qubits": [0]}]}"#;
    assert!(Circuit::from_json(json).is_err());

    let json = r#"{"qubit_count": 1, "instructions": [{"kind": "iswap", "qubits": [0]}]}"#;
    assert!(Circuit::from_json(json).is_err());
}
