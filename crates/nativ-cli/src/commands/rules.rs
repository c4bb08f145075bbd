//! Rules command implementation.

use anyhow::Result;
use console::style;

use nativ_compile::BasisGates;
use nativ_compile::passes::{Decomposer, RuleTable};
use nativ_ir::{Circuit, GateKind, Instruction, QubitId};

/// Execute the rules command.
pub fn execute() -> Result<()> {
    let decomposer = Decomposer::new();
    let basis = BasisGates::native();

    println!("{}", style("Native basis:").bold());
    let native: Vec<_> = basis.gates().iter().map(|k| k.name()).collect();
    println!("  {}", native.join(", "));
    println!();
    println!("{}", style("Decomposition rules:").bold());

    for rule in decomposer.rules().iter() {
        let kind = rule.source;
        let (qubits, params) = sample_operands(kind);
        let expansion = rule.expand(&qubits, &params);

        let ecr = native_ecr_count(&decomposer, &basis, kind, &qubits, &params)?;
        println!(
            "  {:<6} {:>2} ecr  -> {}",
            style(kind.name()).cyan(),
            ecr,
            format_sequence(&expansion)
        );
    }

    println!();
    println!("  {} rules", RuleTable::standard().len());
    Ok(())
}

fn sample_operands(kind: GateKind) -> (Vec<QubitId>, Vec<f64>) {
    let qubits = (0..kind.num_qubits() as u32).map(QubitId).collect();
    (qubits, vec![0.0; kind.num_params()])
}

/// ECR count after full decomposition of a single `kind` instruction.
fn native_ecr_count(
    decomposer: &Decomposer,
    basis: &BasisGates,
    kind: GateKind,
    qubits: &[QubitId],
    params: &[f64],
) -> Result<usize> {
    let mut circuit = Circuit::new(kind.num_qubits() as u32);
    circuit.append(kind, qubits, params)?;
    Ok(decomposer.decompose(&circuit, basis)?.num_multi_qubit_ops())
}

fn format_sequence(instructions: &[Instruction]) -> String {
    instructions
        .iter()
        .map(|inst| {
            let qubits: Vec<_> = inst.qubits.iter().map(ToString::to_string).collect();
            format!("{} {}", inst.name(), qubits.join(","))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
