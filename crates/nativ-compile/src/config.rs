//! Compiler configuration.
//!
//! A [`CompilerConfig`] is an explicit value passed to
//! [`compile`](crate::compile); there is no process-wide default. It can be
//! loaded from YAML or JSON, with every field optional:
//!
//! ```yaml
//! basis_gates: [id, rz, sx, x, ecr]
//! optimization_level: 1
//! max_depth: 16
//! max_instructions: 1000000
//! verifier:
//!   max_qubits: 10
//!   tolerance: 1.0e-9
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CompileError, CompileResult};
use crate::property::BasisGates;
use crate::unitary::MAX_UNITARY_QUBITS;

/// Complete compiler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Gate kinds left untouched by decomposition.
    #[serde(default)]
    pub basis_gates: BasisGates,

    /// 0 = decomposition only, 1 and above add peephole optimization.
    #[serde(default = "default_optimization_level")]
    pub optimization_level: u8,

    /// Maximum rewrite nesting before decomposition gives up.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of emitted instructions.
    #[serde(default = "default_max_instructions")]
    pub max_instructions: usize,

    /// Equivalence verifier settings
    #[serde(default)]
    pub verifier: VerifierConfig,
}

/// Equivalence verifier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifierConfig {
    /// Largest register for which a dense unitary is built.
    #[serde(default = "default_verifier_max_qubits")]
    pub max_qubits: u32,

    /// Maximum entrywise deviation after global phase alignment.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

// Default value functions
fn default_optimization_level() -> u8 {
    1
}

fn default_max_depth() -> usize {
    16
}

fn default_max_instructions() -> usize {
    1_000_000
}

fn default_verifier_max_qubits() -> u32 {
    10
}

fn default_tolerance() -> f64 {
    1e-9
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            basis_gates: BasisGates::native(),
            optimization_level: default_optimization_level(),
            max_depth: default_max_depth(),
            max_instructions: default_max_instructions(),
            verifier: VerifierConfig::default(),
        }
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        VerifierConfig {
            max_qubits: default_verifier_max_qubits(),
            tolerance: default_tolerance(),
        }
    }
}

impl CompilerConfig {
    /// Parse and validate a YAML configuration.
    pub fn from_yaml_str(contents: &str) -> CompileResult<Self> {
        let config: CompilerConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| CompileError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(contents: &str) -> CompileResult<Self> {
        let config: CompilerConfig = serde_json::from_str(contents)
            .map_err(|e| CompileError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file. `.json` files are parsed as JSON,
    /// anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CompileResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CompileError::InvalidConfiguration(format!("{}: {e}", path.display()))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> CompileResult<()> {
        if self.basis_gates.is_empty() {
            return Err(CompileError::InvalidConfiguration(
                "basis_gates must not be empty".into(),
            ));
        }
        if self.optimization_level > 3 {
            return Err(CompileError::InvalidConfiguration(format!(
                "optimization_level must be 0-3, got {}",
                self.optimization_level
            )));
        }
        if self.max_depth == 0 {
            return Err(CompileError::InvalidConfiguration(
                "max_depth must be at least 1".into(),
            ));
        }
        if self.max_instructions == 0 {
            return Err(CompileError::InvalidConfiguration(
                "max_instructions must be at least 1".into(),
            ));
        }
        self.verifier.validate()
    }
}

impl VerifierConfig {
    /// Validate verifier settings.
    pub fn validate(&self) -> CompileResult<()> {
        if self.max_qubits > MAX_UNITARY_QUBITS {
            return Err(CompileError::InvalidConfiguration(format!(
                "verifier.max_qubits must be at most {MAX_UNITARY_QUBITS}, got {}",
                self.max_qubits
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(CompileError::InvalidConfiguration(format!(
                "verifier.tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
