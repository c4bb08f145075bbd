//! Verify command implementation.

use anyhow::{Context, Result};
use console::style;

use nativ_compile::EquivalenceVerifier;

use super::common::{load_circuit, load_config};

/// Execute the verify command.
pub fn execute(original: &str, compiled: &str, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let a = load_circuit(original)?;
    let b = load_circuit(compiled)?;

    let report = EquivalenceVerifier::from(&config.verifier)
        .verify(&a, &b)
        .with_context(|| format!("{compiled} does not match {original}"))?;

    println!(
        "{} {} qubits, max deviation {:.2e} (tolerance {:.1e})",
        style("✓").green().bold(),
        report.num_qubits,
        report.max_deviation,
        config.verifier.tolerance
    );
    Ok(())
}
