//! Compute command implementation.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use skinfaxi_engine::{Config, Services, handle_quantum_compute};

/// Execute the compute command.
pub async fn execute(query: &str, shots: u32) -> Result<()> {
    println!(
        "{} Computing {} ({} shots)",
        style("→").cyan().bold(),
        style(format!("\"{query}\"")).green(),
        shots
    );

    let config = Config::from_env();
    let services = Services::init(&config).await?;

    if services.ibm.is_some() {
        println!("  IBM Quantum configured; hardware tier enabled");
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Running computation...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let report = handle_quantum_compute(&services, query, shots).await;
    spinner.finish_and_clear();

    println!("{report}");
    Ok(())
}
