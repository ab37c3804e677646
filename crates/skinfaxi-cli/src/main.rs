//! Skinfaxi Command-Line Interface
//!
//! ```text
//!            S K I N F A X I
//!   Natural-language quantum computation
//!        "the shining mane pulls the day"
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{backends, compute, info, version};

/// Skinfaxi - natural-language quantum computation on simulators and hardware
#[derive(Parser)]
#[command(name = "skinfaxi")]
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
    /// Run a quantum computation described in natural language
    Compute {
        /// What to compute, e.g. "Create a Bell state"
        #[arg(short, long)]
        query: String,

        /// Number of shots
        #[arg(short, long, default_value = "1024")]
        shots: u32,
    },

    /// List available IBM Quantum backends
    Backends,

    /// Describe a quantum operation (bell_state, qft, grover, ...)
    Info {
        /// Operation name
        operation: String,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Compute { query, shots } => compute::execute(&query, shots).await,
        Commands::Backends => backends::execute().await,
        Commands::Info { operation } => {
            info::execute(&operation);
            Ok(())
        }
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compute() {
        let cli = Cli::try_parse_from([
            "skinfaxi",
            "compute",
            "--query",
            "Create a Bell state",
            "--shots",
            "2048",
        ])
        .unwrap();

        match cli.command {
            Commands::Compute { query, shots } => {
                assert_eq!(query, "Create a Bell state");
                assert_eq!(shots, 2048);
            }
            _ => panic!("expected compute command"),
        }
    }

    #[test]
    fn test_parse_compute_default_shots() {
        let cli = Cli::try_parse_from(["skinfaxi", "compute", "-q", "random numbers"]).unwrap();
        match cli.command {
            Commands::Compute { shots, .. } => assert_eq!(shots, 1024),
            _ => panic!("expected compute command"),
        }
    }

    #[test]
    fn test_parse_requires_query() {
        assert!(Cli::try_parse_from(["skinfaxi", "compute"]).is_err());
    }

    #[test]
    fn test_parse_info() {
        let cli = Cli::try_parse_from(["skinfaxi", "info", "qft"]).unwrap();
        match cli.command {
            Commands::Info { operation } => assert_eq!(operation, "qft"),
            _ => panic!("expected info command"),
        }
    }
}
