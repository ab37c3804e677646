//! IBM Quantum backend implementation.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use skinfaxi_hal::{
    Backend, BackendAvailability, BackendKind, Capabilities, Counts, ExecutionResult, HalResult,
    JobId, JobStatus,
};
use skinfaxi_ir::{Circuit, emit};

use crate::api::{BackendInfo, IbmClient, outcome_to_binary};
use crate::error::IbmResult;

/// Shape of a submitted circuit, remembered for result normalization.
#[derive(Debug, Clone, Copy)]
struct SubmittedShape {
    num_clbits: usize,
    depth: usize,
    width: usize,
}

/// A single IBM Quantum device exposed through the HAL trait.
pub struct IbmBackend {
    /// Shared API client.
    client: Arc<IbmClient>,
    /// Device info captured at selection time.
    info: BackendInfo,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Shapes of circuits submitted through this backend.
    shapes: Arc<RwLock<HashMap<String, SubmittedShape>>>,
}

impl IbmBackend {
    /// Bind a backend to a device reported by the listing.
    pub fn new(client: Arc<IbmClient>, info: BackendInfo) -> Self {
        let capabilities = Capabilities::hardware(&info.name, info.num_qubits);
        Self {
            client,
            info,
            capabilities,
            shapes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The device info this backend was bound to.
    pub fn info(&self) -> &BackendInfo {
        &self.info
    }

    async fn fetch_counts(&self, job_id: &str, num_clbits: usize) -> IbmResult<Counts> {
        let results = self.client.job_results(job_id).await?;
        let mut counts = Counts::new();

        if let Some(first) = results.results.first() {
            for (key, &count) in &first.counts {
                counts.insert(outcome_to_binary(key, num_clbits), count);
            }
        }

        Ok(counts)
    }
}

#[async_trait]
impl Backend for IbmBackend {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn kind(&self) -> BackendKind {
        if self.info.simulator {
            BackendKind::CloudSimulator
        } else {
            BackendKind::Hardware
        }
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        if self.info.operational {
            Ok(BackendAvailability {
                is_available: true,
                queue_depth: Some(self.info.pending_jobs),
                status_message: None,
            })
        } else {
            Ok(BackendAvailability::unavailable("device not operational"))
        }
    }

    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        let qasm = emit(circuit);
        debug!(backend = %self.info.name, shots, "submitting sampler job");

        let id = self
            .client
            .submit_job(&self.info.name, &qasm, shots)
            .await
            .map_err(skinfaxi_hal::HalError::from)?;

        self.shapes.write().await.insert(
            id.clone(),
            SubmittedShape {
                num_clbits: circuit.num_clbits(),
                depth: circuit.depth(),
                width: circuit.width(),
            },
        );

        Ok(JobId::new(id))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let status = self
            .client
            .job_status(&job_id.0)
            .await
            .map_err(skinfaxi_hal::HalError::from)?;

        let mapped = if status.is_completed() {
            JobStatus::Completed
        } else if status.is_failed() {
            JobStatus::Failed(status.reason.unwrap_or_else(|| "unknown".to_string()))
        } else if status.is_cancelled() {
            JobStatus::Cancelled
        } else if status.is_running() {
            JobStatus::Running
        } else {
            JobStatus::Queued
        };

        Ok(mapped)
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let shape = self
            .shapes
            .read()
            .await
            .get(&job_id.0)
            .copied()
            .unwrap_or(SubmittedShape {
                num_clbits: self.capabilities.num_qubits as usize,
                depth: 0,
                width: 0,
            });

        let counts = self
            .fetch_counts(&job_id.0, shape.num_clbits)
            .await
            .map_err(skinfaxi_hal::HalError::from)?;

        let shots = u32::try_from(counts.total_shots()).unwrap_or(u32::MAX);

        Ok(ExecutionResult::new(counts, shots)
            .with_backend(&self.info.name, self.kind())
            .with_circuit_shape(shape.depth, shape.width))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        self.client
            .cancel_job(&job_id.0)
            .await
            .map_err(skinfaxi_hal::HalError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str, simulator: bool) -> BackendInfo {
        BackendInfo {
            name: name.into(),
            num_qubits: 127,
            operational: true,
            simulator,
            pending_jobs: 2,
        }
    }

    #[tokio::test]
    async fn test_kind_from_device_flags() {
        let client = Arc::new(IbmClient::new("token").unwrap());

        let hw = IbmBackend::new(client.clone(), device("ibm_torino", false));
        assert_eq!(hw.kind(), BackendKind::Hardware);
        assert_eq!(hw.name(), "ibm_torino");

        let sim = IbmBackend::new(client, device("ibmq_qasm_simulator", true));
        assert_eq!(sim.kind(), BackendKind::CloudSimulator);
    }

    #[tokio::test]
    async fn test_availability_reflects_operational() {
        let client = Arc::new(IbmClient::new("token").unwrap());

        let mut info = device("ibm_fez", false);
        info.operational = false;
        let backend = IbmBackend::new(client, info);

        let avail = backend.availability().await.unwrap();
        assert!(!avail.is_available);
    }
}
