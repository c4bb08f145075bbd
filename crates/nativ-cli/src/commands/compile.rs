//! Compile command implementation.

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use nativ_compile::{
    CircuitCost, EquivalenceVerifier, OptimizationReport, compile_with_properties,
};

use super::common::{
    default_output_path, load_circuit, load_config, print_cost, print_gate_counts, save_circuit,
};

/// Execute the compile command.
pub fn execute(
    input: &str,
    output: Option<&str>,
    config_path: Option<&str>,
    optimization_level: Option<u8>,
    verify: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(level) = optimization_level {
        config.optimization_level = level;
    }

    println!(
        "{} Compiling {} (level {})",
        style("→").cyan().bold(),
        style(input).green(),
        config.optimization_level
    );

    let circuit = load_circuit(input)?;
    println!(
        "  Loaded: {} qubits, {} instructions",
        circuit.num_qubits(),
        circuit.len()
    );

    let (compiled, props) =
        compile_with_properties(&circuit, &config).context("Compilation failed")?;

    println!("{} Compilation complete", style("✓").green().bold());
    print_cost("Input:", &CircuitCost::of(&circuit));
    print_cost("Output:", &CircuitCost::of(&compiled));
    print_gate_counts(&compiled);
    if let Some(report) = props.get::<OptimizationReport>() {
        info!(
            "Optimizer removed {} instructions in {} rounds",
            report.removed(),
            report.iterations
        );
    }

    if verify {
        let verifier = EquivalenceVerifier::from(&config.verifier);
        let report = verifier
            .verify(&circuit, &compiled)
            .context("Verification failed")?;
        println!(
            "{} Equivalent up to global phase (max deviation {:.2e})",
            style("✓").green().bold(),
            report.max_deviation
        );
    }

    let output_path = output.map_or_else(|| default_output_path(input), str::to_string);
    save_circuit(&compiled, &output_path)?;
    println!("  Output: {}", style(&output_path).green());

    Ok(())
}
