//! Text-boundary entry points.
//!
//! Everything returned from here is renderable text: recoverable
//! failures are absorbed inside the pipeline, unrecoverable ones become
//! `"Error: ..."` strings, and a missing query short-circuits with a
//! fixed message before the pipeline runs.

use tracing::debug;

use crate::builder::build;
use crate::dispatch::execute;
use crate::intent::classify;
use crate::report::format_report;
use crate::services::Services;

/// Fixed response for a request without a query.
pub const MISSING_QUERY: &str = "Missing required parameter: query";

/// Default shot count when the caller doesn't specify one.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Run the full classify → build → execute → format chain.
pub async fn handle_quantum_compute(services: &Services, query: &str, shots: u32) -> String {
    if query.trim().is_empty() {
        return MISSING_QUERY.to_string();
    }

    let request = classify(services.llm.as_ref(), query, shots).await;
    debug!(operation = %request.operation, qubits = request.qubit_count, "classified");

    let circuit = match build(&request) {
        Ok(circuit) => circuit,
        Err(err) => return format!("Error: {err}"),
    };

    let result = match execute(services, &circuit, shots).await {
        Ok(result) => result,
        Err(err) => return format!("Error: {err}"),
    };

    format_report(&request, &circuit, &result)
}

/// List remote backends, or explain how to enable them.
pub async fn handle_list_backends(services: &Services) -> String {
    let Some(ibm) = &services.ibm else {
        return "IBM Quantum not available. Using local simulator only.\n\n\
                To enable IBM Quantum:\n\
                1. Set IBM_QUANTUM_TOKEN in environment\n\
                2. Get token from: https://quantum.ibm.com/account"
            .to_string();
    };

    let backends = match ibm.backends().await {
        Ok(backends) => backends,
        Err(err) => return format!("Error listing backends: {err}"),
    };

    let mut out = format!("IBM Quantum Backends ({} found):\n\n", backends.len());
    for backend in &backends {
        out.push_str(&format!("• {}\n", backend.name));
        out.push_str(&format!("  - Qubits: {}\n", backend.num_qubits));
        out.push_str(&format!(
            "  - Status: {}\n",
            if backend.operational { "up" } else { "down" }
        ));
        out.push_str(&format!(
            "  - Simulator: {}\n\n",
            if backend.simulator { "yes" } else { "no" }
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::Config;

    async fn offline_services() -> Services {
        Services::init(&Config::offline()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_query_short_circuits() {
        let services = offline_services().await;
        assert_eq!(
            handle_quantum_compute(&services, "", 1024).await,
            MISSING_QUERY
        );
        assert_eq!(
            handle_quantum_compute(&services, "   ", 1024).await,
            MISSING_QUERY
        );
    }

    #[tokio::test]
    async fn test_list_backends_without_token() {
        let services = offline_services().await;
        let listing = handle_list_backends(&services).await;
        assert!(listing.contains("IBM_QUANTUM_TOKEN"));
        assert!(listing.contains("local simulator only"));
    }
}
