//! Basis decomposition.
//!
//! Every instruction whose kind is outside the target basis is replaced by
//! its rule template, and the result is decomposed again until only basis
//! kinds remain. Rewriting uses an explicit worklist bounded by a nesting
//! depth and a total output size, so malformed or cyclic rule tables fail
//! with [`CompileError::DecompositionTooDeep`] instead of looping.

mod rules;

pub use rules::{RewriteRule, RuleTable, Template};

use tracing::debug;

use nativ_ir::{Circuit, GateKind, Instruction};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{BasisGates, PropertySet};

/// Default rewrite nesting ceiling.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Default output size ceiling.
pub const DEFAULT_MAX_INSTRUCTIONS: usize = 1_000_000;

/// Rewrites circuits into a target basis using a [`RuleTable`].
#[derive(Debug, Clone)]
pub struct Decomposer {
    rules: RuleTable,
    max_depth: usize,
    max_instructions: usize,
}

impl Decomposer {
    /// Create a decomposer with the standard rules and default ceilings.
    pub fn new() -> Self {
        Self::with_rules(RuleTable::standard())
    }

    /// Create a decomposer with a custom rule table.
    pub fn with_rules(rules: RuleTable) -> Self {
        Self {
            rules,
            max_depth: DEFAULT_MAX_DEPTH,
            max_instructions: DEFAULT_MAX_INSTRUCTIONS,
        }
    }

    /// Set the rewrite nesting and output size ceilings.
    #[must_use]
    pub fn with_limits(mut self, max_depth: usize, max_instructions: usize) -> Self {
        self.max_depth = max_depth;
        self.max_instructions = max_instructions;
        self
    }

    /// The rewrite nesting and output size ceilings.
    pub fn limits(&self) -> (usize, usize) {
        (self.max_depth, self.max_instructions)
    }

    /// The rule table in use.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Produce a new circuit over `basis` equivalent to `circuit`.
    ///
    /// Instruction order is preserved: each instruction's expansion appears
    /// where the instruction was.
    pub fn decompose(&self, circuit: &Circuit, basis: &BasisGates) -> CompileResult<Circuit> {
        let qubit_count = circuit.num_qubits();
        let mut output: Vec<Instruction> = Vec::with_capacity(circuit.len());
        let mut worklist: Vec<(Instruction, usize)> = Vec::new();

        for inst in circuit.instructions() {
            worklist.push((inst.clone(), 0));

            while let Some((inst, depth)) = worklist.pop() {
                // Templates from custom tables are not trusted to be well formed.
                inst.validate(qubit_count)?;

                let kind = inst.kind;
                if basis.contains(kind) {
                    output.push(inst);
                    if output.len() > self.max_instructions {
                        return Err(self.too_deep(kind, depth, output.len()));
                    }
                    continue;
                }

                let rule = self
                    .rules
                    .get(kind)
                    .ok_or(CompileError::UnsupportedGateKind(kind))?;
                if depth >= self.max_depth || worklist.len() > self.max_instructions {
                    return Err(self.too_deep(kind, depth, output.len()));
                }

                let expansion = rule.expand(&inst.qubits, &inst.parameters);
                worklist.extend(expansion.into_iter().rev().map(|i| (i, depth + 1)));
            }
        }

        debug!(
            "Decomposed {} instructions into {}",
            circuit.len(),
            output.len()
        );

        let mut result = Circuit::with_name(circuit.name(), qubit_count);
        result.replace_instructions(output)?;
        Ok(result)
    }

    fn too_deep(&self, kind: GateKind, depth: usize, emitted: usize) -> CompileError {
        CompileError::DecompositionTooDeep {
            kind,
            depth,
            max_depth: self.max_depth,
            emitted,
            max_instructions: self.max_instructions,
        }
    }
}

impl Default for Decomposer {
    fn default() -> Self {
        Self::new()
    }
}

/// Basis translation pass.
///
/// Rewrites every instruction outside the basis in
/// [`PropertySet::basis_gates`], or the native basis when none is set.
#[derive(Debug, Clone, Default)]
pub struct BasisTranslation {
    decomposer: Decomposer,
}

impl BasisTranslation {
    /// Create a translation pass with the standard rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a translation pass around a configured decomposer.
    pub fn with_decomposer(decomposer: Decomposer) -> Self {
        Self { decomposer }
    }
}

impl Pass for BasisTranslation {
    fn name(&self) -> &'static str {
        "BasisTranslation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let native = BasisGates::native();
        let basis = properties.basis_gates.as_ref().unwrap_or(&native);
        *circuit = self.decomposer.decompose(circuit, basis)?;
        Ok(())
    }

    fn should_run(&self, circuit: &Circuit, properties: &PropertySet) -> bool {
        match &properties.basis_gates {
            Some(basis) => circuit.instructions().iter().any(|i| !basis.contains(i.kind)),
            None => !circuit.is_native(),
        }
    }
}

#[cfg(test)]
mod tests;
