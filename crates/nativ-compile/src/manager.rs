//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use nativ_ir::Circuit;

use crate::config::CompilerConfig;
use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{BasisTranslation, CostAnalysis, Decomposer, PeepholeOptimizer, RuleTable};
use crate::property::{BasisGates, PropertySet};

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given circuit.
    #[instrument(skip(self, circuit, properties), fields(qubits = circuit.num_qubits()))]
    pub fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            circuit.num_qubits()
        );

        for pass in &self.passes {
            if pass.should_run(circuit, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(circuit, properties)?;
                debug!("Pass {} completed, ops: {}", pass.name(), circuit.len());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final depth: {}, ops: {}",
            circuit.depth(),
            circuit.len()
        );

        Ok(())
    }

    /// Names of the passes, in execution order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating pass managers with preset configurations.
pub struct PassManagerBuilder {
    /// Optimization level (0-3).
    optimization_level: u8,
    /// Decomposition rules and ceilings.
    decomposer: Decomposer,
    /// Target properties.
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            optimization_level: 1,
            decomposer: Decomposer::new(),
            properties: PropertySet::new().with_basis_gates(BasisGates::native()),
        }
    }

    /// Create a builder from a compiler configuration.
    pub fn from_config(config: &CompilerConfig) -> Self {
        Self::new()
            .with_optimization_level(config.optimization_level)
            .with_basis_gates(config.basis_gates.clone())
            .with_decomposer(
                Decomposer::new().with_limits(config.max_depth, config.max_instructions),
            )
    }

    /// Set the optimization level.
    ///
    /// - Level 0: Decomposition only
    /// - Level 1 and above: Decomposition followed by peephole optimization
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(3);
        self
    }

    /// Set the target basis.
    #[must_use]
    pub fn with_basis_gates(mut self, basis_gates: BasisGates) -> Self {
        self.properties.basis_gates = Some(basis_gates);
        self
    }

    /// Use a custom rule table, keeping the current ceilings.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        let (max_depth, max_instructions) = self.decomposer.limits();
        self.decomposer = Decomposer::with_rules(rules).with_limits(max_depth, max_instructions);
        self
    }

    /// Use a configured decomposer.
    #[must_use]
    pub fn with_decomposer(mut self, decomposer: Decomposer) -> Self {
        self.decomposer = decomposer;
        self
    }

    /// Set the target properties.
    #[must_use]
    pub fn with_properties(mut self, properties: PropertySet) -> Self {
        self.properties = properties;
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();

        pm.add_pass(BasisTranslation::with_decomposer(self.decomposer));

        if self.optimization_level >= 1 {
            pm.add_pass(PeepholeOptimizer::new());
        }

        pm.add_pass(CostAnalysis);

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
