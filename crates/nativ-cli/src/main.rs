//! nativ Command-Line Interface
//!
//! The main entry point for the nativ CLI tool.
//!
//! ```text
//! nativ compile -i bell.json -o bell_native.json --verify
//! nativ rules
//! nativ verify -a bell.json -b bell_native.json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{compile, rules, verify, version};

/// nativ - basis-gate decomposition and optimization for {id, rz, sx, x, ecr}
#[derive(Parser)]
#[command(name = "nativ")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON circuit into the native basis
    Compile {
        /// Input circuit (JSON)
        #[arg(short, long)]
        input: String,

        /// Output file (defaults to <input>_native.json)
        #[arg(short, long)]
        output: Option<String>,

        /// Compiler configuration (YAML or JSON)
        #[arg(short, long, env = "NATIV_CONFIG")]
        config: Option<String>,

        /// Optimization level (0-3), overrides the configuration
        #[arg(short = 'O', long)]
        optimization_level: Option<u8>,

        /// Check the result against the input unitary
        #[arg(long)]
        verify: bool,
    },

    /// Check that two circuits implement the same unitary
    Verify {
        /// Reference circuit (JSON)
        #[arg(short = 'a', long)]
        original: String,

        /// Circuit under test (JSON)
        #[arg(short = 'b', long)]
        compiled: String,

        /// Compiler configuration supplying verifier settings
        #[arg(short, long, env = "NATIV_CONFIG")]
        config: Option<String>,
    },

    /// List the decomposition rule table
    Rules,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Compile {
            input,
            output,
            config,
            optimization_level,
            verify,
        } => compile::execute(
            &input,
            output.as_deref(),
            config.as_deref(),
            optimization_level,
            verify,
        ),
        Commands::Verify {
            original,
            compiled,
            config,
        } => verify::execute(&original, &compiled, config.as_deref()),
        Commands::Rules => rules::execute(),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
