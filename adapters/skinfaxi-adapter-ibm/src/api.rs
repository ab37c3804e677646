//! IBM Quantum REST API client.
//!
//! Implements the slice of the IBM Quantum API this adapter needs:
//! - Listing backends and their operational status
//! - Submitting sampler jobs as QASM3 source
//! - Polling job status and retrieving counts

use reqwest::{Client, header};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{IbmError, IbmResult};

/// Default IBM Quantum API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.quantum-computing.ibm.com/runtime";

/// User-Agent sent with requests (Cloudflare blocks default reqwest UA).
const USER_AGENT: &str = "skinfaxi/0.4 (quantum-orchestration)";

/// IBM Quantum API client.
pub struct IbmClient {
    /// HTTP client with bearer auth installed.
    client: Client,
    /// API endpoint URL.
    endpoint: String,
}

impl fmt::Debug for IbmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbmClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl IbmClient {
    /// Create a client authenticated with a direct API token.
    pub fn new(token: &str) -> IbmResult<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, token)
    }

    /// Create a client against a custom endpoint (used by tests).
    pub fn with_endpoint(endpoint: impl Into<String>, token: &str) -> IbmResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| IbmError::InvalidToken)?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// List available backends with status information.
    pub async fn list_backends(&self) -> IbmResult<Vec<BackendInfo>> {
        let url = format!("{}/backends", self.endpoint);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: BackendsResponse = response.json().await?;
        Ok(body.backends)
    }

    /// Submit a sampler job running QASM3 source on a named backend.
    pub async fn submit_job(&self, backend: &str, qasm: &str, shots: u32) -> IbmResult<String> {
        let url = format!("{}/jobs", self.endpoint);
        let body = SamplerJobRequest {
            program_id: "sampler",
            backend,
            params: SamplerParams {
                pubs: vec![vec![qasm.to_string()]],
                shots,
            },
        };

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let created: JobCreatedResponse = response.json().await?;
        Ok(created.id)
    }

    /// Get the status of a job.
    pub async fn job_status(&self, job_id: &str) -> IbmResult<JobStatusResponse> {
        let url = format!("{}/jobs/{}", self.endpoint, job_id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Get the results of a completed job.
    pub async fn job_results(&self, job_id: &str) -> IbmResult<JobResultResponse> {
        let url = format!("{}/jobs/{}/results", self.endpoint, job_id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Cancel a running job.
    pub async fn cancel_job(&self, job_id: &str) -> IbmResult<()> {
        let url = format!("{}/jobs/{}/cancel", self.endpoint, job_id);
        let response = self.client.post(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(())
    }
}

async fn api_error(response: reqwest::Response) -> IbmError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "no body".to_string());
    IbmError::Api { status, message }
}

/// One backend as reported by the device listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Device name, e.g. `ibm_torino`.
    pub name: String,
    /// Number of qubits.
    #[serde(default)]
    pub num_qubits: u32,
    /// Whether the device is currently accepting jobs.
    #[serde(default)]
    pub operational: bool,
    /// Whether this device is a hosted simulator.
    #[serde(default)]
    pub simulator: bool,
    /// Jobs currently queued on the device.
    #[serde(default)]
    pub pending_jobs: u32,
}

#[derive(Debug, Deserialize)]
struct BackendsResponse {
    #[serde(default)]
    backends: Vec<BackendInfo>,
}

#[derive(Debug, Serialize)]
struct SamplerJobRequest<'a> {
    program_id: &'a str,
    backend: &'a str,
    params: SamplerParams,
}

#[derive(Debug, Serialize)]
struct SamplerParams {
    pubs: Vec<Vec<String>>,
    shots: u32,
}

#[derive(Debug, Deserialize)]
struct JobCreatedResponse {
    id: String,
}

/// Job status payload.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    /// Job identifier.
    pub id: String,
    /// Raw status string (casing varies across API versions).
    pub status: String,
    /// Error reason, present for failed jobs.
    #[serde(default)]
    pub reason: Option<String>,
}

impl JobStatusResponse {
    fn normalized(&self) -> String {
        self.status.to_lowercase()
    }

    /// Whether the job reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.is_completed() || self.is_failed() || self.is_cancelled()
    }

    /// Whether the job completed successfully.
    pub fn is_completed(&self) -> bool {
        matches!(self.normalized().as_str(), "completed" | "done")
    }

    /// Whether the job failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.normalized().as_str(), "failed" | "error")
    }

    /// Whether the job was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.normalized() == "cancelled"
    }

    /// Whether the job is running (vs queued).
    pub fn is_running(&self) -> bool {
        matches!(self.normalized().as_str(), "running" | "in_progress")
    }
}

/// Result payload of a completed sampler job.
#[derive(Debug, Clone, Deserialize)]
pub struct JobResultResponse {
    /// One entry per submitted circuit.
    #[serde(default)]
    pub results: Vec<SamplerResult>,
}

/// Counts for one circuit.
#[derive(Debug, Clone, Deserialize)]
pub struct SamplerResult {
    /// Outcome → occurrences. Keys are hex (`"0x3"`) or plain binary.
    #[serde(default)]
    pub counts: HashMap<String, u64>,
}

/// Convert a hex or binary outcome key to a fixed-width binary string.
pub fn outcome_to_binary(key: &str, width: usize) -> String {
    if let Some(hex) = key.strip_prefix("0x") {
        if let Ok(value) = u64::from_str_radix(hex, 16) {
            return format!("{value:0width$b}");
        }
    }
    // Already binary: left-pad to width.
    if key.len() < width {
        format!("{}{}", "0".repeat(width - key.len()), key)
    } else {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_to_binary() {
        assert_eq!(outcome_to_binary("0x3", 2), "11");
        assert_eq!(outcome_to_binary("0x0", 2), "00");
        assert_eq!(outcome_to_binary("0x5", 4), "0101");
        assert_eq!(outcome_to_binary("10", 4), "0010");
        assert_eq!(outcome_to_binary("1011", 4), "1011");
    }

    #[test]
    fn test_job_status_normalization() {
        let status = JobStatusResponse {
            id: "j1".into(),
            status: "Completed".into(),
            reason: None,
        };
        assert!(status.is_completed());
        assert!(status.is_terminal());

        let failed = JobStatusResponse {
            id: "j2".into(),
            status: "ERROR".into(),
            reason: Some("calibration".into()),
        };
        assert!(failed.is_failed());
    }

    #[test]
    fn test_backends_response_deserialization() {
        let body = r#"{"backends":[
            {"name":"ibm_torino","num_qubits":133,"operational":true,"simulator":false,"pending_jobs":4},
            {"name":"ibmq_qasm_simulator","num_qubits":32,"operational":true,"simulator":true}
        ]}"#;

        let parsed: BackendsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.backends.len(), 2);
        assert_eq!(parsed.backends[0].name, "ibm_torino");
        assert_eq!(parsed.backends[0].pending_jobs, 4);
        assert!(parsed.backends[1].simulator);
        assert_eq!(parsed.backends[1].pending_jobs, 0);
    }

    #[test]
    fn test_sampler_request_serialization() {
        let request = SamplerJobRequest {
            program_id: "sampler",
            backend: "ibm_torino",
            params: SamplerParams {
                pubs: vec![vec!["OPENQASM 3.0;".to_string()]],
                shots: 1024,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["program_id"], "sampler");
        assert_eq!(json["params"]["shots"], 1024);
    }

    #[test]
    fn test_client_debug_redacts_token() {
        let client = IbmClient::new("super-secret-token").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
