//! Tests for basis decomposition.

use std::f64::consts::{FRAC_PI_2, PI};

use nativ_ir::{Circuit, GateKind, Instruction, QubitId};

use crate::error::CompileError;
use crate::pass::Pass;
use crate::property::{BasisGates, PropertySet};
use crate::verify::EquivalenceVerifier;

use super::{BasisTranslation, Decomposer, RuleTable};

fn decompose(circuit: &Circuit) -> Circuit {
    Decomposer::new()
        .decompose(circuit, &BasisGates::native())
        .unwrap()
}

fn names(circuit: &Circuit) -> Vec<&'static str> {
    circuit.instructions().iter().map(Instruction::name).collect()
}

#[test]
fn test_h_decomposes_to_rz_sx_rz() {
    let mut circuit = Circuit::new(1);
    circuit.h(QubitId(0)).unwrap();
    let out = decompose(&circuit);

    assert_eq!(names(&out), ["rz", "sx", "rz"]);
    assert_eq!(out.instructions()[0].angle(), Some(FRAC_PI_2));
    assert_eq!(out.instructions()[2].angle(), Some(FRAC_PI_2));
}

#[test]
fn test_cx_uses_one_ecr() {
    let mut circuit = Circuit::new(2);
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    let out = decompose(&circuit);

    assert!(out.is_native());
    assert_eq!(out.count_ops().get("ecr"), Some(&1));
    assert_eq!(names(&out), ["x", "ecr", "rz", "sx"]);
    assert_eq!(out.instructions()[1].qubits, vec![QubitId(0), QubitId(1)]);
    EquivalenceVerifier::default()
        .verify(&circuit, &out)
        .unwrap();
}

#[test]
fn test_swap_uses_three_ecr() {
    let mut circuit = Circuit::new(2);
    circuit.swap(QubitId(0), QubitId(1)).unwrap();
    let out = decompose(&circuit);

    assert_eq!(out.count_ops().get("ecr"), Some(&3));
    assert_eq!(out.len(), 12);
    EquivalenceVerifier::default()
        .verify(&circuit, &out)
        .unwrap();
}

#[test]
fn test_ecr_counts_per_kind() {
    let expected = [
        (GateKind::CX, 1),
        (GateKind::CY, 1),
        (GateKind::CZ, 1),
        (GateKind::CH, 1),
        (GateKind::CP, 2),
        (GateKind::CRx, 2),
        (GateKind::CRy, 2),
        (GateKind::CRz, 2),
        (GateKind::Swap, 3),
        (GateKind::CCX, 6),
        (GateKind::CSwap, 8),
    ];
    for (kind, ecr) in expected {
        let n = kind.num_qubits() as u32;
        let mut circuit = Circuit::new(n);
        circuit
            .append(kind, &(0..n).map(QubitId).collect::<Vec<_>>(), &vec![0.4; kind.num_params()])
            .unwrap();
        let out = decompose(&circuit);
        assert_eq!(out.num_multi_qubit_ops(), ecr, "{kind}");
    }
}

#[test]
fn test_every_kind_is_equivalent() {
    let verifier = EquivalenceVerifier::default();
    for kind in GateKind::ALL {
        // Reverse the operands so the register order differs from operand order.
        let n = kind.num_qubits() as u32;
        let qubits: Vec<_> = (0..n).rev().map(QubitId).collect();
        let params: Vec<_> = [1.3, -0.6, 2.9][..kind.num_params()].to_vec();

        let mut circuit = Circuit::new(n);
        circuit.append(kind, &qubits, &params).unwrap();
        let out = decompose(&circuit);

        assert!(out.is_native(), "{kind}");
        verifier
            .verify(&circuit, &out)
            .unwrap_or_else(|e| panic!("{kind}: {e}"));
    }
}

#[test]
fn test_native_circuit_is_unchanged() {
    let mut circuit = Circuit::new(2);
    circuit.rz(0.3, QubitId(0)).unwrap();
    circuit.sx(QubitId(1)).unwrap();
    circuit.ecr(QubitId(1), QubitId(0)).unwrap();
    circuit.x(QubitId(0)).unwrap();
    circuit.id(QubitId(1)).unwrap();

    assert_eq!(decompose(&circuit), circuit);
}

#[test]
fn test_order_preserved_across_qubits() {
    let mut circuit = Circuit::new(2);
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    let out = decompose(&circuit);

    assert_eq!(names(&out), ["rz", "sx", "rz", "x", "ecr", "rz", "sx"]);
}

#[test]
fn test_custom_basis_keeps_kinds() {
    let basis = BasisGates::new([GateKind::CX, GateKind::Rz, GateKind::SX, GateKind::X]);
    let mut circuit = Circuit::new(2);
    circuit.cz(QubitId(0), QubitId(1)).unwrap();

    let out = Decomposer::new().decompose(&circuit, &basis).unwrap();
    assert_eq!(names(&out), ["rz", "sx", "rz", "cx", "rz", "sx", "rz"]);
}

#[test]
fn test_missing_rule() {
    let mut circuit = Circuit::new(1);
    circuit.h(QubitId(0)).unwrap();

    let err = Decomposer::with_rules(RuleTable::empty())
        .decompose(&circuit, &BasisGates::native())
        .unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedGateKind(GateKind::H)));
}

#[test]
fn test_basis_without_rz_fails() {
    let mut circuit = Circuit::new(1);
    circuit.s(QubitId(0)).unwrap();

    let err = Decomposer::new()
        .decompose(&circuit, &BasisGates::new([GateKind::SX, GateKind::X]))
        .unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedGateKind(GateKind::Rz)));
}

fn h_to_h(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![Instruction::single_qubit_gate(GateKind::H, q[0])]
}

fn z_to_s(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![Instruction::single_qubit_gate(GateKind::S, q[0])]
}

fn s_to_z(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![Instruction::single_qubit_gate(GateKind::Z, q[0])]
}

fn y_fans_out(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![Instruction::single_qubit_gate(GateKind::Z, q[0]); 8]
}

fn z_fans_out(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![Instruction::single_qubit_gate(GateKind::X, q[0]); 8]
}

fn h_out_of_range(_: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![Instruction::single_qubit_gate(GateKind::X, QubitId(99))]
}

#[test]
fn test_self_referential_rule_is_too_deep() {
    let mut rules = RuleTable::empty();
    rules.insert(GateKind::H, h_to_h);

    let mut circuit = Circuit::new(1);
    circuit.h(QubitId(0)).unwrap();

    let err = Decomposer::with_rules(rules)
        .decompose(&circuit, &BasisGates::native())
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::DecompositionTooDeep {
            kind: GateKind::H,
            depth: 16,
            ..
        }
    ));
}

#[test]
fn test_cyclic_rules_are_too_deep() {
    let mut rules = RuleTable::empty();
    rules.insert(GateKind::Z, z_to_s);
    rules.insert(GateKind::S, s_to_z);

    let mut circuit = Circuit::new(1);
    circuit.z(QubitId(0)).unwrap();

    let err = Decomposer::with_rules(rules)
        .with_limits(5, 100)
        .decompose(&circuit, &BasisGates::native())
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::DecompositionTooDeep { max_depth: 5, .. }
    ));
}

#[test]
fn test_output_ceiling() {
    let mut rules = RuleTable::empty();
    rules.insert(GateKind::Y, y_fans_out);
    rules.insert(GateKind::Z, z_fans_out);

    let mut circuit = Circuit::new(1);
    circuit.y(QubitId(0)).unwrap();

    let decomposer = Decomposer::with_rules(rules).with_limits(16, 50);
    let err = decomposer
        .decompose(&circuit, &BasisGates::native())
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::DecompositionTooDeep {
            kind: GateKind::X,
            emitted: 51,
            max_instructions: 50,
            ..
        }
    ));

    // Reaching the ceiling exactly is allowed
    let out = decomposer
        .clone()
        .with_limits(16, 64)
        .decompose(&circuit, &BasisGates::native())
        .unwrap();
    assert_eq!(out.len(), 64);
}

#[test]
fn test_malformed_template_output_rejected() {
    let mut rules = RuleTable::empty();
    rules.insert(GateKind::H, h_out_of_range);

    let mut circuit = Circuit::new(1);
    circuit.h(QubitId(0)).unwrap();

    let err = Decomposer::with_rules(rules)
        .decompose(&circuit, &BasisGates::native())
        .unwrap_err();
    assert!(matches!(err, CompileError::Ir(_)));
}

#[test]
fn test_basis_translation_pass() {
    let mut circuit = Circuit::bell().unwrap();
    let mut props = PropertySet::new();
    let pass = BasisTranslation::new();

    assert!(pass.should_run(&circuit, &props));
    pass.run(&mut circuit, &mut props).unwrap();
    assert!(circuit.is_native());
    assert_eq!(circuit.name(), "bell");
    assert!(!pass.should_run(&circuit, &props));

    props.basis_gates = Some(BasisGates::new([GateKind::H, GateKind::CX]));
    assert!(pass.should_run(&circuit, &props));
}

#[test]
fn test_angles_not_range_checked() {
    let mut circuit = Circuit::new(1);
    circuit.rx(100.0 * PI + 0.25, QubitId(0)).unwrap();
    let out = decompose(&circuit);
    EquivalenceVerifier::default()
        .verify(&circuit, &out)
        .unwrap();
}
