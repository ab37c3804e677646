//! Skinfaxi Hardware Abstraction Layer
//!
//! This crate provides a unified interface for executing circuits on quantum
//! backends, so the engine can treat remote hardware and the local simulator
//! interchangeably.
//!
//! # Overview
//!
//! - A common [`Backend`] trait for job submission and management
//! - [`Capabilities`] to describe backend size and shot limits
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//! - [`BackendKind`] to tag where a result actually came from
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use skinfaxi_hal::Backend;
//! use skinfaxi_adapter_sim::SimulatorBackend;
//! use skinfaxi_ir::{Circuit, QubitId};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut circuit = Circuit::with_size("bell", 2, 2);
//!     circuit.h(QubitId(0))?;
//!     circuit.cx(QubitId(0), QubitId(1))?;
//!     circuit.measure_all()?;
//!
//!     let backend = SimulatorBackend::new();
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id, Duration::from_secs(30)).await?;
//!
//!     println!("Results: {:?}", result.counts);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability};
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{BackendKind, Counts, ExecutionResult};
