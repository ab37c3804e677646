//! Backend trait and availability types.
//!
//! The [`Backend`] trait defines the lifecycle for interacting with a
//! quantum backend:
//!
//! ```text
//!   capabilities() ──→ submit() ──→ status() ──→ result()
//!    (sync, &ref)       (async)      (async)      (async)
//! ```
//!
//! Design principles:
//!
//! - **Async-native**: all I/O methods are async.
//! - **Thread-safe**: `Send + Sync` bound enables shared ownership.
//! - **Infallible introspection**: `capabilities()` is synchronous and
//!   infallible — a backend that cannot report capabilities without I/O
//!   is not correctly initialized.
//! - **Bounded waits**: `wait()` takes an explicit timeout; no method
//!   blocks indefinitely on a hardware queue.

use std::time::Duration;

use async_trait::async_trait;

use skinfaxi_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::{BackendKind, ExecutionResult};

/// Trait for quantum backends.
///
/// Covers the full job lifecycle: introspection, submission, status
/// polling, result retrieval, and cancellation.
///
/// # Contract
///
/// - `capabilities()` MUST be synchronous and infallible; implementations
///   cache capabilities at construction time.
/// - `submit()` MUST return a `JobId` with initial status `Queued` (or
///   `Completed` for backends that execute inline).
/// - `result()` MUST only be called when status is `Completed`.
/// - `wait()` has a provided implementation (500 ms poll, caller-supplied
///   timeout).
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Where results from this backend come from.
    fn kind(&self) -> BackendKind;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Check backend availability with queue depth information.
    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Submit a circuit for execution.
    ///
    /// Returns a job ID that can be used to check status and retrieve
    /// results.
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Get the result of a completed job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Cancel a running job.
    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Wait for a job to complete and return its result.
    ///
    /// Polls every 500 ms until the job reaches a terminal state or the
    /// timeout elapses.
    async fn wait(&self, job_id: &JobId, timeout: Duration) -> HalResult<ExecutionResult> {
        use tokio::time::sleep;

        let poll_interval = Duration::from_millis(500);
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let status = self.status(job_id).await?;

            match status {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => {
                    if tokio::time::Instant::now() >= deadline {
                        return Err(HalError::Timeout(job_id.0.clone()));
                    }
                    sleep(poll_interval).await;
                }
            }
        }
    }
}

/// Backend availability information.
///
/// Richer than a simple boolean so the dispatcher can weigh queue depth
/// when choosing among hardware devices.
#[derive(Debug, Clone)]
pub struct BackendAvailability {
    /// Whether the backend is currently accepting jobs.
    pub is_available: bool,
    /// Number of jobs currently in queue (if known).
    pub queue_depth: Option<u32>,
    /// Human-readable status message.
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// Availability for a backend that is always available.
    ///
    /// Typical for simulators — zero queue, zero wait.
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            queue_depth: Some(0),
            status_message: None,
        }
    }

    /// Availability for an offline backend.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            queue_depth: None,
            status_message: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_available() {
        let avail = BackendAvailability::always_available();
        assert!(avail.is_available);
        assert_eq!(avail.queue_depth, Some(0));
        assert!(avail.status_message.is_none());
    }

    #[test]
    fn test_unavailable() {
        let avail = BackendAvailability::unavailable("maintenance");
        assert!(!avail.is_available);
        assert_eq!(avail.status_message, Some("maintenance".to_string()));
    }
}
