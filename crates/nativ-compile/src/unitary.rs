//! Dense unitary reconstruction for small circuits.
//!
//! Qubit `q` is bit `q` of a basis-state index. Building the full unitary
//! costs `O(4^n)` memory, so reconstruction is capped at
//! [`MAX_UNITARY_QUBITS`].

use nativ_ir::{Circuit, Instruction};
use num_complex::Complex64;

use crate::error::{CompileError, CompileResult};
use crate::library::{Matrix, gate_matrix};

/// Hard ceiling on the register size accepted by [`circuit_unitary`].
pub const MAX_UNITARY_QUBITS: u32 = 14;

/// Build the `2^n x 2^n` unitary implemented by `circuit`.
pub fn circuit_unitary(circuit: &Circuit) -> CompileResult<Matrix> {
    let n = circuit.num_qubits();
    if n > MAX_UNITARY_QUBITS {
        return Err(CompileError::VerifierQubitLimit {
            num_qubits: n,
            max_qubits: MAX_UNITARY_QUBITS,
        });
    }

    let mut unitary = Matrix::eye(1usize << n);
    for inst in circuit.instructions() {
        let gate = gate_matrix(inst.kind, &inst.parameters)?;
        apply_instruction(&mut unitary, inst, &gate);
    }
    Ok(unitary)
}

/// Left-multiply `unitary` by `gate` acting on the instruction's operands.
fn apply_instruction(unitary: &mut Matrix, inst: &Instruction, gate: &Matrix) {
    let k = inst.qubits.len();
    let local_dim = 1usize << k;

    // Local bit j belongs to operand k-1-j (operand 0 is the MSB).
    let masks: Vec<usize> = (0..k)
        .map(|j| 1usize << inst.qubits[k - 1 - j].index())
        .collect();
    let operand_mask: usize = masks.iter().sum();

    let offsets: Vec<usize> = (0..local_dim)
        .map(|local| {
            masks
                .iter()
                .enumerate()
                .filter(|(j, _)| (local >> j) & 1 == 1)
                .map(|(_, m)| m)
                .sum::<usize>()
        })
        .collect();

    let dim = unitary.nrows();
    let mut amps = vec![Complex64::new(0.0, 0.0); local_dim];
    for base in (0..dim).filter(|b| b & operand_mask == 0) {
        for col in 0..dim {
            for (amp, off) in amps.iter_mut().zip(&offsets) {
                *amp = unitary[[base | off, col]];
            }
            for (row, off) in offsets.iter().enumerate() {
                unitary[[base | off, col]] = (0..local_dim)
                    .map(|c| gate[[row, c]] * amps[c])
                    .sum();
            }
        }
    }
}
