//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use nativ_compile::{CircuitCost, CompilerConfig};
use nativ_ir::Circuit;

/// Load a circuit from a JSON file.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    Circuit::from_json(&source).with_context(|| format!("Invalid circuit in {path}"))
}

/// Save a circuit as pretty-printed JSON.
pub fn save_circuit(circuit: &Circuit, path: &str) -> Result<()> {
    let content = circuit.to_json().context("Failed to serialize circuit")?;
    fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))?;
    Ok(())
}

/// Load the compiler configuration, falling back to defaults.
pub fn load_config(path: Option<&str>) -> Result<CompilerConfig> {
    match path {
        Some(path) => CompilerConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration: {path}")),
        None => Ok(CompilerConfig::default()),
    }
}

/// Default output path: `<dir>/<stem>_native.json` next to the input.
pub fn default_output_path(input: &str) -> String {
    let p = Path::new(input);
    let stem = p.file_stem().unwrap_or_default().to_string_lossy();
    p.with_file_name(format!("{stem}_native.json"))
        .to_string_lossy()
        .into_owned()
}

/// Print the per-gate instruction counts.
pub fn print_gate_counts(circuit: &Circuit) {
    let counts: Vec<_> = circuit
        .count_ops()
        .into_iter()
        .map(|(name, count)| format!("{name}: {count}"))
        .collect();
    println!("  {:<8} {}", "Gates:", counts.join(", "));
}

/// Print a one-line cost summary.
pub fn print_cost(label: &str, cost: &CircuitCost) {
    println!(
        "  {:<8} {} ecr, {} single-qubit, depth {}",
        label,
        style(cost.multi_qubit).yellow(),
        cost.single_qubit,
        cost.depth
    );
}
