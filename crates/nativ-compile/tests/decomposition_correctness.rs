//! Property-based tests for decomposition and optimization correctness.
//!
//! Every compiled circuit must implement the same unitary as its input, up to
//! global phase, and optimization must never add two-qubit gates.

use std::f64::consts::TAU;

use nativ_compile::passes::{Decomposer, PeepholeOptimizer};
use nativ_compile::{BasisGates, CompilerConfig, EquivalenceVerifier, compile};
use nativ_ir::{Circuit, GateKind, Instruction, QubitId};
use proptest::prelude::*;

/// Generate a random instruction of any kind on a register of `num_qubits`.
fn arb_instruction(num_qubits: u32, kinds: Vec<GateKind>) -> impl Strategy<Value = Instruction> {
    let kinds: Vec<_> = kinds
        .into_iter()
        .filter(|k| k.num_qubits() <= num_qubits as usize)
        .collect();
    prop::sample::select(kinds).prop_flat_map(move |kind| {
        let register: Vec<QubitId> = (0..num_qubits).map(QubitId).collect();
        (
            prop::sample::subsequence(register, kind.num_qubits()).prop_shuffle(),
            prop::collection::vec(-TAU..TAU, kind.num_params()),
        )
            .prop_map(move |(qubits, params)| Instruction::gate(kind, qubits, params))
    })
}

/// Generate a random circuit over `kinds` with 1-4 qubits.
fn arb_circuit(kinds: Vec<GateKind>, max_len: usize) -> impl Strategy<Value = Circuit> {
    (1_u32..=4).prop_flat_map(move |num_qubits| {
        prop::collection::vec(arb_instruction(num_qubits, kinds.clone()), 0..=max_len).prop_map(
            move |instructions| {
                let mut circuit = Circuit::new(num_qubits);
                for inst in instructions {
                    circuit.push(inst).unwrap();
                }
                circuit
            },
        )
    })
}

fn composite_kinds() -> Vec<GateKind> {
    GateKind::ALL.into_iter().filter(|k| !k.is_native()).collect()
}

/// A single composite instruction on a 3 or 4 qubit register.
fn arb_composite_case() -> impl Strategy<Value = Circuit> {
    (3_u32..=4).prop_flat_map(|num_qubits| {
        arb_instruction(num_qubits, composite_kinds()).prop_map(move |inst| {
            let mut circuit = Circuit::new(num_qubits);
            circuit.push(inst).unwrap();
            circuit
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn decomposition_preserves_unitary(circuit in arb_composite_case()) {
        let native = Decomposer::new()
            .decompose(&circuit, &BasisGates::native())
            .unwrap();
        prop_assert!(native.is_native());

        let report = EquivalenceVerifier::default().verify(&circuit, &native);
        prop_assert!(report.is_ok(), "{:?}", report);
    }

    #[test]
    fn optimizer_preserves_unitary_and_ecr_count(circuit in arb_circuit(GateKind::NATIVE.to_vec(), 30)) {
        let mut optimized = circuit.clone();
        let report = PeepholeOptimizer::new().optimize(&mut optimized).unwrap();

        prop_assert!(report.after.multi_qubit <= report.before.multi_qubit);
        prop_assert_eq!(optimized.num_multi_qubit_ops(), circuit.num_multi_qubit_ops());
        prop_assert!(report.after <= report.before);
        prop_assert!(optimized.len() <= circuit.len());

        let check = EquivalenceVerifier::default().verify(&circuit, &optimized);
        prop_assert!(check.is_ok(), "{:?}", check);
    }

    #[test]
    fn optimizer_is_idempotent(circuit in arb_circuit(GateKind::NATIVE.to_vec(), 30)) {
        let mut once = circuit;
        PeepholeOptimizer::new().optimize(&mut once).unwrap();
        let mut twice = once.clone();
        PeepholeOptimizer::new().optimize(&mut twice).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn compile_preserves_unitary(circuit in arb_circuit(GateKind::ALL.to_vec(), 8)) {
        let compiled = compile(&circuit, &CompilerConfig::default()).unwrap();
        prop_assert!(compiled.is_native());
        prop_assert_eq!(compiled.num_qubits(), circuit.num_qubits());

        let check = EquivalenceVerifier::default().verify(&circuit, &compiled);
        prop_assert!(check.is_ok(), "{:?}", check);
    }

    #[test]
    fn optimization_never_adds_ecr(circuit in arb_circuit(GateKind::ALL.to_vec(), 8)) {
        let level0 = CompilerConfig {
            optimization_level: 0,
            ..CompilerConfig::default()
        };
        let unoptimized = compile(&circuit, &level0).unwrap();
        let optimized = compile(&circuit, &CompilerConfig::default()).unwrap();
        let ecr_optimized = optimized.count_ops().get("ecr").copied();
        let ecr_unoptimized = unoptimized.count_ops().get("ecr").copied();
        prop_assert_eq!(ecr_optimized, ecr_unoptimized);
        prop_assert!(optimized.len() <= unoptimized.len());
    }

    #[test]
    fn native_circuits_decompose_to_themselves(circuit in arb_circuit(GateKind::NATIVE.to_vec(), 20)) {
        let out = Decomposer::new()
            .decompose(&circuit, &BasisGates::native())
            .unwrap();
        prop_assert_eq!(out, circuit);
    }
}
