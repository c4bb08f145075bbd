//! Canonical gate matrices.
//!
//! Every [`GateKind`] has a fixed unitary, given here as a dense
//! `2^k x 2^k` matrix over its `k` operands. Operand 0 is the most
//! significant bit of the local index, so `cx(c, t)` has the textbook matrix
//! with the control first.
//!
//! The native basis is `{id, x, sx, rz, ecr}`:
//!
//! | Gate | Matrix |
//! |------|--------|
//! | `id` | identity |
//! | `x` | bit flip |
//! | `sx` | principal square root of `x` |
//! | `rz(θ)` | `diag(e^{-iθ/2}, e^{iθ/2})` |
//! | `ecr` | `1/√2 [[0,0,1,i],[0,0,i,1],[1,-i,0,0],[-i,1,0,0]]` |

use ndarray::{Array2, array, s};
use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use nativ_ir::{GateKind, IrError, Operand};

use crate::error::CompileResult;

/// Dense complex matrix.
pub type Matrix = Array2<Complex64>;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Canonical unitary of `kind` with the given angle parameters.
///
/// Fails with [`IrError::ArityMismatch`] if the parameter count is wrong.
pub fn gate_matrix(kind: GateKind, params: &[f64]) -> CompileResult<Matrix> {
    if params.len() != kind.num_params() {
        return Err(IrError::ArityMismatch {
            kind,
            operand: Operand::Parameters,
            expected: kind.num_params(),
            got: params.len(),
        }
        .into());
    }

    let m = match kind {
        GateKind::Id => Matrix::eye(2),
        GateKind::X => x(),
        GateKind::SX => sx(),
        GateKind::Rz => rz(params[0]),
        GateKind::ECR => ecr(),
        GateKind::Y => y(),
        GateKind::Z => phase(PI),
        GateKind::H => h(),
        GateKind::S => phase(PI / 2.0),
        GateKind::Sdg => phase(-PI / 2.0),
        GateKind::T => phase(PI / 4.0),
        GateKind::Tdg => phase(-PI / 4.0),
        GateKind::SXdg => sxdg(),
        GateKind::P => phase(params[0]),
        GateKind::Rx => rx(params[0]),
        GateKind::Ry => ry(params[0]),
        GateKind::U => u(params[0], params[1], params[2]),
        GateKind::CX => controlled(&x()),
        GateKind::CY => controlled(&y()),
        GateKind::CZ => controlled(&phase(PI)),
        GateKind::CH => controlled(&h()),
        GateKind::CP => controlled(&phase(params[0])),
        GateKind::CRx => controlled(&rx(params[0])),
        GateKind::CRy => controlled(&ry(params[0])),
        GateKind::CRz => controlled(&rz(params[0])),
        GateKind::Swap => swap(),
        GateKind::CCX => controlled(&controlled(&x())),
        GateKind::CSwap => controlled(&swap()),
    };
    Ok(m)
}

/// The gate equal to `kind · kind`, for the parameterless native gates.
///
/// `x · x = id` and `sx · sx = x`.
pub fn square(kind: GateKind) -> Option<GateKind> {
    match kind {
        GateKind::Id | GateKind::X => Some(GateKind::Id),
        GateKind::SX => Some(GateKind::X),
        _ => None,
    }
}

fn x() -> Matrix {
    array![[ZERO, ONE], [ONE, ZERO]]
}

fn y() -> Matrix {
    array![[ZERO, -I], [I, ZERO]]
}

fn h() -> Matrix {
    let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
    array![[s, s], [s, -s]]
}

fn sx() -> Matrix {
    let p = Complex64::new(0.5, 0.5);
    let m = Complex64::new(0.5, -0.5);
    array![[p, m], [m, p]]
}

fn sxdg() -> Matrix {
    let p = Complex64::new(0.5, 0.5);
    let m = Complex64::new(0.5, -0.5);
    array![[m, p], [p, m]]
}

fn phase(lambda: f64) -> Matrix {
    array![[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, lambda)]]
}

fn rz(theta: f64) -> Matrix {
    array![
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)]
    ]
}

fn rx(theta: f64) -> Matrix {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    array![[c, s], [s, c]]
}

fn ry(theta: f64) -> Matrix {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    array![[c, -s], [s, c]]
}

fn u(theta: f64, phi: f64, lambda: f64) -> Matrix {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    array![
        [Complex64::new(c, 0.0), -Complex64::from_polar(s, lambda)],
        [
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda)
        ]
    ]
}

fn ecr() -> Matrix {
    let r = Complex64::new(FRAC_1_SQRT_2, 0.0);
    let i = Complex64::new(0.0, FRAC_1_SQRT_2);
    array![
        [ZERO, ZERO, r, i],
        [ZERO, ZERO, i, r],
        [r, -i, ZERO, ZERO],
        [-i, r, ZERO, ZERO]
    ]
}

fn swap() -> Matrix {
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ZERO, ONE, ZERO],
        [ZERO, ONE, ZERO, ZERO],
        [ZERO, ZERO, ZERO, ONE]
    ]
}

/// Add a control on a new most significant operand.
fn controlled(target: &Matrix) -> Matrix {
    let d = target.nrows();
    let mut m = Matrix::eye(2 * d);
    m.slice_mut(s![d.., d..]).assign(target);
    m
}
