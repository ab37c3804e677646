//! IBM Quantum backend adapter for Skinfaxi.
//!
//! Provides the remote-hardware execution tier: listing devices, picking
//! the least busy operational processor, submitting QASM3 jobs, and
//! normalizing the returned counts.
//!
//! Requires the `IBM_QUANTUM_TOKEN` environment credential; without it
//! the adapter is simply not constructed and the engine falls back to the
//! local simulator.

mod api;
mod backend;
mod error;
mod service;

pub use api::{BackendInfo, IbmClient};
pub use backend::IbmBackend;
pub use error::{IbmError, IbmResult};
pub use service::IbmService;
