//! Tiered execution dispatch.
//!
//! The fallback order is a first-class artifact: [`tier_plan`] computes
//! the ordered list of attempts from the available capability handles,
//! and [`execute`] walks it, advancing on failure. Remote hardware is
//! tried first when an IBM handle exists; the local simulator is the
//! unconditional floor.

use tracing::{info, warn};

use skinfaxi_hal::{Backend, ExecutionResult};
use skinfaxi_ir::Circuit;

use crate::error::{EngineError, EngineResult};
use crate::services::Services;

/// One execution attempt in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionTier {
    /// Least-busy operational IBM hardware device.
    RemoteHardware,
    /// In-process statevector simulator.
    LocalSimulator,
}

/// The ordered list of tiers reachable with the given services.
pub fn tier_plan(services: &Services) -> Vec<ExecutionTier> {
    let mut plan = Vec::with_capacity(2);
    if services.ibm.is_some() {
        plan.push(ExecutionTier::RemoteHardware);
    }
    plan.push(ExecutionTier::LocalSimulator);
    plan
}

/// Execute a circuit under the tiered fallback policy.
///
/// Tiers are attempted in order; any failure is logged and control falls
/// through to the next tier. Only exhaustion of the whole plan (the local
/// simulator itself failing) surfaces as an error.
pub async fn execute(
    services: &Services,
    circuit: &Circuit,
    shots: u32,
) -> EngineResult<ExecutionResult> {
    for tier in tier_plan(services) {
        match attempt(services, tier, circuit, shots).await {
            Ok(result) => {
                info!(
                    backend = %result.backend_name,
                    kind = %result.backend_kind,
                    shots,
                    "execution succeeded"
                );
                return Ok(result);
            }
            Err(err) => {
                warn!(?tier, "execution tier failed: {err}; falling through");
            }
        }
    }

    Err(EngineError::ExecutionExhausted)
}

async fn attempt(
    services: &Services,
    tier: ExecutionTier,
    circuit: &Circuit,
    shots: u32,
) -> EngineResult<ExecutionResult> {
    match tier {
        ExecutionTier::RemoteHardware => {
            let ibm = services
                .ibm
                .as_ref()
                .ok_or(EngineError::TierUnavailable("remote hardware"))?;

            let device = ibm
                .least_busy()
                .await
                .map_err(skinfaxi_hal::HalError::from)?;

            if (device.num_qubits as usize) < circuit.num_qubits() {
                return Err(EngineError::Hal(skinfaxi_hal::HalError::CircuitTooLarge(
                    format!(
                        "circuit needs {} qubits, {} has {}",
                        circuit.num_qubits(),
                        device.name,
                        device.num_qubits
                    ),
                )));
            }

            info!(backend = %device.name, pending = device.pending_jobs, "submitting to hardware");
            let backend = ibm.backend(device);
            let job_id = backend.submit(circuit, shots).await?;
            let result = backend.wait(&job_id, services.remote_timeout).await?;
            Ok(result)
        }
        ExecutionTier::LocalSimulator => {
            let job_id = services.simulator.submit(circuit, shots).await?;
            Ok(services.simulator.result(&job_id).await?)
        }
    }
}
