//! Skinfaxi engine: the query-to-circuit mapping and execution pipeline.
//!
//! Control flow for one request:
//!
//! ```text
//!   query ──→ classify ──→ build ──→ execute ──→ format ──→ text
//!             (intent)    (builder)  (dispatch)   (report)
//! ```
//!
//! The pipeline is wired through an explicit [`Services`] context holding
//! the optional language-model and IBM Quantum handles plus the local
//! simulator, so nothing in this crate touches process globals or the
//! environment directly. [`ServiceRegistry`] provides the idempotent
//! lazy-init path for long-lived processes.
//!
//! Every user-visible outcome is a renderable string: classification
//! failures fall back to keyword matching, execution-tier failures fall
//! through to the local simulator, and only an exhausted tier list (or an
//! unbuildable request) becomes an `"Error: ..."` response.

pub mod builder;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod llm;
pub mod report;
pub mod services;

pub use builder::build;
pub use dispatch::{ExecutionTier, execute, tier_plan};
pub use error::EngineError;
pub use handlers::{MISSING_QUERY, handle_list_backends, handle_quantum_compute};
pub use intent::{ComputationRequest, InputState, OperationKind, classify, classify_fallback};
pub use llm::LlmClient;
pub use report::{format_report, operation_info};
pub use services::{Config, ServiceRegistry, Services};
