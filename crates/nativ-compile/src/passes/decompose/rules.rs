//! The rewrite-rule table.
//!
//! Each rule maps one non-native gate kind to a template: a function from the
//! instruction's operands and angles to a replacement sequence, listed in
//! circuit order. Templates may emit other composite kinds; the table as a
//! whole must reach the native basis without cycles.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use nativ_ir::{GateKind, Instruction, QubitId};

/// Expands one instruction's operands and angles into its replacement.
pub type Template = fn(&[QubitId], &[f64]) -> Vec<Instruction>;

/// A single rewrite rule.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    /// Gate kind this rule replaces.
    pub source: GateKind,
    /// Replacement generator.
    pub template: Template,
}

impl RewriteRule {
    /// Instantiate the template for concrete operands.
    pub fn expand(&self, qubits: &[QubitId], parameters: &[f64]) -> Vec<Instruction> {
        (self.template)(qubits, parameters)
    }
}

/// Rewrite rules keyed by source kind.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: BTreeMap<GateKind, RewriteRule>,
}

impl RuleTable {
    /// A table with no rules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard table covering every composite kind.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.insert(GateKind::Y, y);
        table.insert(GateKind::Z, z);
        table.insert(GateKind::H, h);
        table.insert(GateKind::S, s);
        table.insert(GateKind::Sdg, sdg);
        table.insert(GateKind::T, t);
        table.insert(GateKind::Tdg, tdg);
        table.insert(GateKind::SXdg, sxdg);
        table.insert(GateKind::P, p);
        table.insert(GateKind::Rx, rx);
        table.insert(GateKind::Ry, ry);
        table.insert(GateKind::U, u);
        table.insert(GateKind::CX, cx);
        table.insert(GateKind::CY, cy);
        table.insert(GateKind::CZ, cz);
        table.insert(GateKind::CH, ch);
        table.insert(GateKind::CP, cp);
        table.insert(GateKind::CRx, crx);
        table.insert(GateKind::CRy, cry);
        table.insert(GateKind::CRz, crz);
        table.insert(GateKind::Swap, swap);
        table.insert(GateKind::CCX, ccx);
        table.insert(GateKind::CSwap, cswap);
        table
    }

    /// Add or replace the rule for `source`.
    pub fn insert(&mut self, source: GateKind, template: Template) -> Option<RewriteRule> {
        self.rules.insert(source, RewriteRule { source, template })
    }

    /// Look up the rule for a kind.
    pub fn get(&self, kind: GateKind) -> Option<&RewriteRule> {
        self.rules.get(&kind)
    }

    /// Iterate over rules sorted by source kind.
    pub fn iter(&self) -> impl Iterator<Item = &RewriteRule> + '_ {
        self.rules.values()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// =============================================================================
// Instruction shorthands
// =============================================================================

fn g1(kind: GateKind, q: QubitId) -> Instruction {
    Instruction::single_qubit_gate(kind, q)
}

fn r1(kind: GateKind, theta: f64, q: QubitId) -> Instruction {
    Instruction::rotation(kind, theta, q)
}

fn rz_(theta: f64, q: QubitId) -> Instruction {
    Instruction::rz(theta, q)
}

fn cx_(c: QubitId, t: QubitId) -> Instruction {
    Instruction::two_qubit_gate(GateKind::CX, c, t)
}

// =============================================================================
// Single-qubit templates
// =============================================================================

fn y(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![rz_(PI, q[0]), g1(GateKind::X, q[0])]
}

fn z(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![rz_(PI, q[0])]
}

fn h(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![
        rz_(FRAC_PI_2, q[0]),
        g1(GateKind::SX, q[0]),
        rz_(FRAC_PI_2, q[0]),
    ]
}

fn s(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![rz_(FRAC_PI_2, q[0])]
}

fn sdg(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![rz_(-FRAC_PI_2, q[0])]
}

fn t(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![rz_(FRAC_PI_4, q[0])]
}

fn tdg(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![rz_(-FRAC_PI_4, q[0])]
}

fn sxdg(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    vec![rz_(PI, q[0]), g1(GateKind::SX, q[0]), rz_(PI, q[0])]
}

fn p(q: &[QubitId], a: &[f64]) -> Vec<Instruction> {
    vec![rz_(a[0], q[0])]
}

fn rx(q: &[QubitId], a: &[f64]) -> Vec<Instruction> {
    vec![
        rz_(FRAC_PI_2, q[0]),
        g1(GateKind::SX, q[0]),
        rz_(a[0] + PI, q[0]),
        g1(GateKind::SX, q[0]),
        rz_(FRAC_PI_2, q[0]),
    ]
}

fn ry(q: &[QubitId], a: &[f64]) -> Vec<Instruction> {
    vec![
        g1(GateKind::SX, q[0]),
        rz_(a[0] + PI, q[0]),
        g1(GateKind::SX, q[0]),
        rz_(PI, q[0]),
    ]
}

// u(θ, φ, λ) = Rz(φ) Ry(θ) Rz(λ), so λ is applied first.
fn u(q: &[QubitId], a: &[f64]) -> Vec<Instruction> {
    let (theta, phi, lambda) = (a[0], a[1], a[2]);
    vec![
        rz_(lambda, q[0]),
        r1(GateKind::Ry, theta, q[0]),
        rz_(phi, q[0]),
    ]
}

// =============================================================================
// Two-qubit templates
// =============================================================================

fn cx(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    let (c, t) = (q[0], q[1]);
    vec![
        g1(GateKind::X, c),
        Instruction::two_qubit_gate(GateKind::ECR, c, t),
        rz_(FRAC_PI_2, c),
        g1(GateKind::SX, t),
    ]
}

fn cz(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    let (c, t) = (q[0], q[1]);
    vec![g1(GateKind::H, t), cx_(c, t), g1(GateKind::H, t)]
}

fn cy(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    let (c, t) = (q[0], q[1]);
    vec![g1(GateKind::Sdg, t), cx_(c, t), g1(GateKind::S, t)]
}

fn ch(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    let (c, t) = (q[0], q[1]);
    vec![
        g1(GateKind::S, t),
        g1(GateKind::H, t),
        g1(GateKind::T, t),
        cx_(c, t),
        g1(GateKind::Tdg, t),
        g1(GateKind::H, t),
        g1(GateKind::Sdg, t),
    ]
}

fn cp(q: &[QubitId], a: &[f64]) -> Vec<Instruction> {
    let (c, t) = (q[0], q[1]);
    let half = a[0] / 2.0;
    vec![
        r1(GateKind::P, half, c),
        cx_(c, t),
        r1(GateKind::P, -half, t),
        cx_(c, t),
        r1(GateKind::P, half, t),
    ]
}

fn crz(q: &[QubitId], a: &[f64]) -> Vec<Instruction> {
    let (c, t) = (q[0], q[1]);
    let half = a[0] / 2.0;
    vec![rz_(half, t), cx_(c, t), rz_(-half, t), cx_(c, t)]
}

fn cry(q: &[QubitId], a: &[f64]) -> Vec<Instruction> {
    let (c, t) = (q[0], q[1]);
    let half = a[0] / 2.0;
    vec![
        r1(GateKind::Ry, half, t),
        cx_(c, t),
        r1(GateKind::Ry, -half, t),
        cx_(c, t),
    ]
}

fn crx(q: &[QubitId], a: &[f64]) -> Vec<Instruction> {
    let (c, t) = (q[0], q[1]);
    let half = a[0] / 2.0;
    vec![
        g1(GateKind::S, t),
        cx_(c, t),
        r1(GateKind::Ry, -half, t),
        cx_(c, t),
        r1(GateKind::Ry, half, t),
        g1(GateKind::Sdg, t),
    ]
}

fn swap(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    let (a, b) = (q[0], q[1]);
    vec![cx_(a, b), cx_(b, a), cx_(a, b)]
}

// =============================================================================
// Three-qubit templates
// =============================================================================

fn ccx(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    let (a, b, c) = (q[0], q[1], q[2]);
    vec![
        g1(GateKind::H, c),
        cx_(b, c),
        g1(GateKind::Tdg, c),
        cx_(a, c),
        g1(GateKind::T, c),
        cx_(b, c),
        g1(GateKind::Tdg, c),
        cx_(a, c),
        g1(GateKind::T, b),
        g1(GateKind::T, c),
        g1(GateKind::H, c),
        cx_(a, b),
        g1(GateKind::T, a),
        g1(GateKind::Tdg, b),
        cx_(a, b),
    ]
}

fn cswap(q: &[QubitId], _: &[f64]) -> Vec<Instruction> {
    let (c, a, b) = (q[0], q[1], q[2]);
    vec![
        cx_(b, a),
        Instruction::gate(GateKind::CCX, [c, a, b], []),
        cx_(b, a),
    ]
}
