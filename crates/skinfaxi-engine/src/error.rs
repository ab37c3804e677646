//! Error types for the engine crate.

use thiserror::Error;

/// Errors that can escape the engine pipeline.
///
/// Classification failures never appear here (they fall back internally);
/// this type covers unbuildable requests and exhausted execution tiers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Circuit construction failed.
    #[error("Circuit construction failed: {0}")]
    Ir(#[from] skinfaxi_ir::IrError),

    /// A backend operation failed.
    #[error(transparent)]
    Hal(#[from] skinfaxi_hal::HalError),

    /// A request could not be turned into a circuit.
    #[error("Invalid computation request: {0}")]
    Build(String),

    /// An execution tier was attempted without its capability handle.
    #[error("Execution tier not configured: {0}")]
    TierUnavailable(&'static str),

    /// Every execution tier failed, including the local simulator.
    #[error("All execution tiers failed; local simulator unavailable")]
    ExecutionExhausted,
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
