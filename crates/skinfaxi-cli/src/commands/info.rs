//! Info command implementation.

use console::style;

use skinfaxi_engine::operation_info;

/// Execute the info command.
pub fn execute(operation: &str) {
    println!(
        "{} {}",
        style(operation).cyan().bold(),
        operation_info(operation)
    );
}
