//! Backends command implementation.

use anyhow::Result;
use console::style;

use skinfaxi_engine::{Config, Services, handle_list_backends};
use skinfaxi_hal::Backend;

/// Execute the backends command.
pub async fn execute() -> Result<()> {
    println!("{} Available backends:\n", style("Skinfaxi").cyan().bold());

    let config = Config::from_env();
    let services = Services::init(&config).await?;

    // Local simulator is always present.
    let caps = services.simulator.capabilities();
    println!(
        "  {} {} (local)",
        style("●").green(),
        style(&caps.name).bold()
    );
    println!("    Qubits: {}", caps.num_qubits);
    println!("    Max shots: {}", caps.max_shots);
    println!();

    // Remote listing (or the enablement hint).
    println!("{}", handle_list_backends(&services).await);

    Ok(())
}
