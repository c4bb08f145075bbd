//! Peephole optimization of native circuits.
//!
//! Each qubit's instruction stream is scanned in order, with multi-qubit
//! instructions acting as barriers on every qubit they touch. Adjacent
//! single-qubit instructions are rewritten by these rules:
//!
//! - `rz(a) rz(b)` becomes `rz((a + b) mod 2π)`
//! - `rz(θ)` with `θ ≡ 0 (mod 2π)` and `id` are deleted
//! - `x x` is deleted
//! - `sx sx` becomes `x`, which may cancel further
//!
//! When the target basis has no `x`, `sx sx` is left alone and only four
//! consecutive `sx` are deleted, so the output never leaves the basis.
//!
//! `ecr` and any other multi-qubit instruction is never touched, so the
//! multi-qubit count cannot grow.

use std::f64::consts::TAU;

use tracing::{debug, info, warn};

use nativ_ir::{Circuit, GateKind, Instruction};

use crate::cost::{CircuitCost, OptimizationReport};
use crate::error::CompileResult;
use crate::library::square;
use crate::pass::{Pass, PassKind};
use crate::property::{BasisGates, PropertySet};

use super::EPSILON;

/// Maximum number of rewrite rounds.
const MAX_ITERATIONS: usize = 100;

/// Peephole optimizer for native single-qubit streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeepholeOptimizer;

/// Outcome of trying to combine two adjacent single-qubit instructions.
enum Merge {
    /// Both instructions disappear.
    Cancel,
    /// The earlier instruction is replaced, the later one disappears.
    Replace(Instruction),
    /// Both disappear and a new instruction continues the scan.
    Continue(Instruction),
    /// No rule applies.
    Keep,
}

impl PeepholeOptimizer {
    /// Create a new peephole optimizer.
    pub fn new() -> Self {
        Self
    }

    /// Optimize `circuit` in place for the native basis and report the cost
    /// change.
    pub fn optimize(&self, circuit: &mut Circuit) -> CompileResult<OptimizationReport> {
        self.optimize_for(circuit, &BasisGates::native())
    }

    /// Optimize `circuit` in place without introducing kinds outside `basis`.
    pub fn optimize_for(
        &self,
        circuit: &mut Circuit,
        basis: &BasisGates,
    ) -> CompileResult<OptimizationReport> {
        let before = CircuitCost::of(circuit);
        let collapse_sx = basis.contains(GateKind::X);
        let mut instructions = circuit.instructions().to_vec();
        let mut iterations = 0;
        let mut converged = false;

        while iterations < MAX_ITERATIONS {
            iterations += 1;
            let (next, changed) =
                rewrite_round(&instructions, circuit.num_qubits() as usize, collapse_sx);
            instructions = next;
            if !changed {
                converged = true;
                break;
            }
        }
        if !converged {
            warn!(
                "Peephole optimizer stopped after {} rounds without reaching a fixed point",
                MAX_ITERATIONS
            );
        }

        circuit.replace_instructions(instructions)?;
        let after = CircuitCost::of(circuit);
        Ok(OptimizationReport {
            before,
            after,
            iterations,
        })
    }
}

impl Pass for PeepholeOptimizer {
    fn name(&self) -> &'static str {
        "PeepholeOptimizer"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let report = match &properties.basis_gates {
            Some(basis) => self.optimize_for(circuit, basis)?,
            None => self.optimize(circuit)?,
        };
        info!(
            "Peephole optimization: {} -> {} in {} rounds",
            report.before, report.after, report.iterations
        );
        properties.insert(report);
        Ok(())
    }
}

/// One left-to-right scan. Returns the rewritten list and whether anything
/// changed.
fn rewrite_round(
    instructions: &[Instruction],
    num_qubits: usize,
    collapse_sx: bool,
) -> (Vec<Instruction>, bool) {
    let mut slots: Vec<Option<Instruction>> = Vec::with_capacity(instructions.len());
    // Live slot indices per qubit, most recent last.
    let mut stacks: Vec<Vec<usize>> = vec![Vec::new(); num_qubits];
    let mut changed = false;

    for inst in instructions {
        if inst.qubits.len() != 1 {
            for q in &inst.qubits {
                stacks[q.index()].push(slots.len());
            }
            slots.push(Some(inst.clone()));
            continue;
        }

        let q = inst.qubits[0].index();
        let mut pending = Some(inst.clone());
        while let Some(current) = pending.take() {
            if is_identity(&current) {
                changed = true;
                break;
            }

            if !collapse_sx
                && current.kind == GateKind::SX
                && ends_with_three_sx(&slots, &stacks[q])
            {
                for _ in 0..3 {
                    if let Some(slot) = stacks[q].pop() {
                        slots[slot] = None;
                    }
                }
                changed = true;
                break;
            }

            let top = stacks[q].last().copied();
            let outcome = top
                .and_then(|slot| slots[slot].as_ref())
                .filter(|prev| prev.qubits.len() == 1)
                .map_or(Merge::Keep, |prev| merge(prev, &current, collapse_sx));

            match (outcome, top) {
                (Merge::Keep, _) | (_, None) => {
                    stacks[q].push(slots.len());
                    slots.push(Some(current));
                }
                (Merge::Cancel, Some(slot)) => {
                    slots[slot] = None;
                    stacks[q].pop();
                    changed = true;
                }
                (Merge::Replace(merged), Some(slot)) => {
                    changed = true;
                    if is_identity(&merged) {
                        slots[slot] = None;
                        stacks[q].pop();
                    } else {
                        slots[slot] = Some(merged);
                    }
                }
                (Merge::Continue(next), Some(slot)) => {
                    slots[slot] = None;
                    stacks[q].pop();
                    changed = true;
                    pending = Some(next);
                }
            }
        }
    }

    let out: Vec<Instruction> = slots.into_iter().flatten().collect();
    if changed {
        debug!(
            "Peephole round: {} -> {} instructions",
            instructions.len(),
            out.len()
        );
    }
    (out, changed)
}

/// Combine `prev` followed by `next` on the same qubit.
fn merge(prev: &Instruction, next: &Instruction, collapse_sx: bool) -> Merge {
    match (prev.kind, next.kind) {
        (GateKind::Rz, GateKind::Rz) => {
            let sum = prev.parameters[0] + next.parameters[0];
            Merge::Replace(Instruction::rz(normalize_angle(sum), prev.qubits[0]))
        }
        (a, b) if a == b => match square(a) {
            Some(GateKind::Id) => Merge::Cancel,
            Some(GateKind::X) if !collapse_sx => Merge::Keep,
            Some(kind) => Merge::Continue(Instruction::single_qubit_gate(kind, prev.qubits[0])),
            None => Merge::Keep,
        },
        _ => Merge::Keep,
    }
}

/// Whether the three most recent live instructions on a qubit are all `sx`.
fn ends_with_three_sx(slots: &[Option<Instruction>], stack: &[usize]) -> bool {
    stack.len() >= 3
        && stack[stack.len() - 3..].iter().all(|&slot| {
            slots[slot]
                .as_ref()
                .is_some_and(|inst| inst.kind == GateKind::SX)
        })
}

/// Reduce an angle to `[0, 2π)`, snapping values within tolerance of a full
/// turn to zero.
fn normalize_angle(theta: f64) -> f64 {
    let r = theta.rem_euclid(TAU);
    if r < EPSILON || TAU - r < EPSILON {
        0.0
    } else {
        r
    }
}

/// Instructions that act as the identity up to global phase.
fn is_identity(inst: &Instruction) -> bool {
    match inst.kind {
        GateKind::Id => true,
        GateKind::Rz => inst
            .angle()
            .is_some_and(|theta| normalize_angle(theta) == 0.0),
        _ => false,
    }
}
