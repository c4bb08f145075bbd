//! Gate kinds supported by the circuit model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IrError;

/// Every gate kind the compiler understands.
///
/// The first five variants form the hardware-native basis; every other kind
/// is composite and must be rewritten before execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum GateKind {
    // Native basis
    /// Identity gate.
    Id,
    /// Pauli-X gate.
    X,
    /// sqrt(X) gate.
    SX,
    /// Rotation around Z axis.
    Rz,
    /// Echoed cross-resonance gate.
    ECR,

    // Single-qubit composite gates
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X)-dagger gate.
    SXdg,
    /// Phase gate.
    P,
    /// Rotation around X axis.
    Rx,
    /// Rotation around Y axis.
    Ry,
    /// Universal single-qubit gate U(θ, φ, λ).
    U,

    // Two-qubit composite gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// Controlled phase gate.
    CP,
    /// Controlled rotation around X.
    CRx,
    /// Controlled rotation around Y.
    CRy,
    /// Controlled rotation around Z.
    CRz,
    /// SWAP gate.
    Swap,

    // Three-qubit composite gates
    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
}

impl GateKind {
    /// The hardware-native basis `{id, rz, sx, x, ecr}`.
    pub const NATIVE: [GateKind; 5] = [
        GateKind::Id,
        GateKind::Rz,
        GateKind::SX,
        GateKind::X,
        GateKind::ECR,
    ];

    /// Every supported kind, in declaration order.
    pub const ALL: [GateKind; 28] = [
        GateKind::Id,
        GateKind::X,
        GateKind::SX,
        GateKind::Rz,
        GateKind::ECR,
        GateKind::Y,
        GateKind::Z,
        GateKind::H,
        GateKind::S,
        GateKind::Sdg,
        GateKind::T,
        GateKind::Tdg,
        GateKind::SXdg,
        GateKind::P,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::U,
        GateKind::CX,
        GateKind::CY,
        GateKind::CZ,
        GateKind::CH,
        GateKind::CP,
        GateKind::CRx,
        GateKind::CRy,
        GateKind::CRz,
        GateKind::Swap,
        GateKind::CCX,
        GateKind::CSwap,
    ];

    /// Get the name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Id => "id",
            GateKind::X => "x",
            GateKind::SX => "sx",
            GateKind::Rz => "rz",
            GateKind::ECR => "ecr",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::H => "h",
            GateKind::S => "s",
            GateKind::Sdg => "sdg",
            GateKind::T => "t",
            GateKind::Tdg => "tdg",
            GateKind::SXdg => "sxdg",
            GateKind::P => "p",
            GateKind::Rx => "rx",
            GateKind::Ry => "ry",
            GateKind::U => "u",
            GateKind::CX => "cx",
            GateKind::CY => "cy",
            GateKind::CZ => "cz",
            GateKind::CH => "ch",
            GateKind::CP => "cp",
            GateKind::CRx => "crx",
            GateKind::CRy => "cry",
            GateKind::CRz => "crz",
            GateKind::Swap => "swap",
            GateKind::CCX => "ccx",
            GateKind::CSwap => "cswap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> usize {
        match self {
            GateKind::Id
            | GateKind::X
            | GateKind::SX
            | GateKind::Rz
            | GateKind::Y
            | GateKind::Z
            | GateKind::H
            | GateKind::S
            | GateKind::Sdg
            | GateKind::T
            | GateKind::Tdg
            | GateKind::SXdg
            | GateKind::P
            | GateKind::Rx
            | GateKind::Ry
            | GateKind::U => 1,

            GateKind::ECR
            | GateKind::CX
            | GateKind::CY
            | GateKind::CZ
            | GateKind::CH
            | GateKind::CP
            | GateKind::CRx
            | GateKind::CRy
            | GateKind::CRz
            | GateKind::Swap => 2,

            GateKind::CCX | GateKind::CSwap => 3,
        }
    }

    /// Get the number of angle parameters this gate takes.
    #[inline]
    pub fn num_params(self) -> usize {
        match self {
            GateKind::Rz
            | GateKind::P
            | GateKind::Rx
            | GateKind::Ry
            | GateKind::CP
            | GateKind::CRx
            | GateKind::CRy
            | GateKind::CRz => 1,
            GateKind::U => 3,
            _ => 0,
        }
    }

    /// Check if this gate is in the hardware-native basis.
    #[inline]
    pub fn is_native(self) -> bool {
        Self::NATIVE.contains(&self)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| IrError::UnknownGate(s.to_string()))
    }
}

impl TryFrom<String> for GateKind {
    type Error = IrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GateKind> for &'static str {
    fn from(kind: GateKind) -> Self {
        kind.name()
    }
}
