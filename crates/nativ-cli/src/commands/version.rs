//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - basis-gate decomposition and optimization",
        style("nativ").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  nativ-ir       Circuit model and JSON interchange");
    println!("  nativ-compile  Decomposition, peephole optimization, verification");
    println!("  nativ-cli      Command-line interface");
    println!();
    println!("Native basis: {}", style("id, rz, sx, x, ecr").green());
    println!("License:      {}", style("Apache-2.0").dim());
}
