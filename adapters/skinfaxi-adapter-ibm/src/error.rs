//! Error types for the IBM Quantum adapter.

use thiserror::Error;

/// Errors from the IBM Quantum adapter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IbmError {
    /// No API token was provided.
    #[error("IBM Quantum token not set (IBM_QUANTUM_TOKEN)")]
    MissingToken,

    /// The token could not be used in an HTTP header.
    #[error("IBM Quantum token is not a valid header value")]
    InvalidToken,

    /// The API returned a non-success status.
    #[error("IBM API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or error description.
        message: String,
    },

    /// Network failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Malformed response body.
    #[error("Response parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The job finished in a failed state.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// No operational hardware backend is available.
    #[error("No operational hardware backends available")]
    NoBackends,
}

/// Result type for IBM adapter operations.
pub type IbmResult<T> = Result<T, IbmError>;

impl From<IbmError> for skinfaxi_hal::HalError {
    fn from(err: IbmError) -> Self {
        use skinfaxi_hal::HalError;
        match err {
            IbmError::MissingToken | IbmError::InvalidToken => {
                HalError::AuthenticationFailed(err.to_string())
            }
            IbmError::NoBackends => HalError::BackendUnavailable(err.to_string()),
            IbmError::JobFailed(msg) => HalError::JobFailed(msg),
            IbmError::Network(e) => HalError::Network(e),
            IbmError::Json(e) => HalError::Serialization(e),
            api @ IbmError::Api { .. } => HalError::Backend(api.to_string()),
        }
    }
}
