//! IBM Quantum service handle: device discovery and selection.

use std::sync::Arc;

use tracing::{debug, info};

use crate::api::{BackendInfo, IbmClient};
use crate::backend::IbmBackend;
use crate::error::{IbmError, IbmResult};

/// Connected IBM Quantum account.
///
/// Construction probes the API by listing devices, so a bad token fails
/// here rather than at first submission.
pub struct IbmService {
    client: Arc<IbmClient>,
}

impl IbmService {
    /// Connect with an API token and verify it by listing backends.
    pub async fn connect(token: &str) -> IbmResult<Self> {
        let client = Arc::new(IbmClient::new(token)?);
        let backends = client.list_backends().await?;
        info!("IBM Quantum connected: {} backends visible", backends.len());
        Ok(Self { client })
    }

    /// Build a service around an existing client (used by tests).
    pub fn from_client(client: Arc<IbmClient>) -> Self {
        Self { client }
    }

    /// List all visible devices.
    pub async fn backends(&self) -> IbmResult<Vec<BackendInfo>> {
        self.client.list_backends().await
    }

    /// Pick the least busy operational hardware device.
    ///
    /// Filters out simulators and offline devices, then sorts ascending
    /// by pending-job count.
    pub async fn least_busy(&self) -> IbmResult<BackendInfo> {
        let backends = self.backends().await?;
        let selected = select_least_busy(backends).ok_or(IbmError::NoBackends)?;
        debug!(
            backend = %selected.name,
            pending = selected.pending_jobs,
            "selected least busy hardware device"
        );
        Ok(selected)
    }

    /// Bind a HAL backend to a selected device.
    pub fn backend(&self, info: BackendInfo) -> IbmBackend {
        IbmBackend::new(self.client.clone(), info)
    }
}

/// Selection policy, split out for testing: operational ∧ ¬simulator,
/// ascending pending jobs, first wins.
fn select_least_busy(backends: Vec<BackendInfo>) -> Option<BackendInfo> {
    let mut candidates: Vec<_> = backends
        .into_iter()
        .filter(|b| b.operational && !b.simulator)
        .collect();
    candidates.sort_by_key(|b| b.pending_jobs);
    candidates.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, operational: bool, simulator: bool, pending: u32) -> BackendInfo {
        BackendInfo {
            name: name.into(),
            num_qubits: 127,
            operational,
            simulator,
            pending_jobs: pending,
        }
    }

    #[test]
    fn test_select_least_busy_prefers_short_queue() {
        let selected = select_least_busy(vec![
            info("ibm_fez", true, false, 12),
            info("ibm_torino", true, false, 3),
            info("ibm_marrakesh", true, false, 7),
        ])
        .unwrap();
        assert_eq!(selected.name, "ibm_torino");
    }

    #[test]
    fn test_select_least_busy_skips_simulators_and_offline() {
        let selected = select_least_busy(vec![
            info("ibmq_qasm_simulator", true, true, 0),
            info("ibm_down", false, false, 0),
            info("ibm_fez", true, false, 30),
        ])
        .unwrap();
        assert_eq!(selected.name, "ibm_fez");
    }

    #[test]
    fn test_select_least_busy_empty() {
        assert!(select_least_busy(vec![]).is_none());
        assert!(select_least_busy(vec![info("sim", true, true, 0)]).is_none());
    }
}
