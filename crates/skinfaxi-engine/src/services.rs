//! Service context: configuration, capability handles, lazy registry.
//!
//! Credentials are resolved from the environment exactly once, into a
//! [`Config`] value; the resulting [`Services`] context is passed
//! explicitly into the pipeline functions. Failure to construct the
//! optional handles (language model, IBM Quantum) is non-fatal; the
//! local simulator is always present.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use skinfaxi_adapter_ibm::IbmService;
use skinfaxi_adapter_sim::SimulatorBackend;

use crate::error::EngineResult;
use crate::llm::LlmClient;

/// Default bound on one remote-hardware execution attempt.
const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(120);

/// Resolved configuration.
#[derive(Clone)]
pub struct Config {
    /// Credential for the language-model classifier (`OPENAI_API_KEY`).
    pub openai_api_key: Option<String>,
    /// Credential for IBM Quantum (`IBM_QUANTUM_TOKEN`).
    pub ibm_quantum_token: Option<String>,
    /// Bound on one remote-hardware attempt
    /// (`SKINFAXI_REMOTE_TIMEOUT_SECS`, default 120).
    pub remote_timeout: Duration,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        let remote_timeout = std::env::var("SKINFAXI_REMOTE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map_or(DEFAULT_REMOTE_TIMEOUT, Duration::from_secs);

        Self {
            openai_api_key: non_empty_env("OPENAI_API_KEY"),
            ibm_quantum_token: non_empty_env("IBM_QUANTUM_TOKEN"),
            remote_timeout,
        }
    }

    /// Configuration with no credentials: local simulation only.
    pub fn offline() -> Self {
        Self {
            openai_api_key: None,
            ibm_quantum_token: None,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| if v.is_some() { "[REDACTED]" } else { "<unset>" };
        f.debug_struct("Config")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("ibm_quantum_token", &redact(&self.ibm_quantum_token))
            .field("remote_timeout", &self.remote_timeout)
            .finish()
    }
}

/// Constructed capability handles for one process.
pub struct Services {
    /// Language-model classifier, when a key is configured and usable.
    pub llm: Option<LlmClient>,
    /// IBM Quantum account, when a token is configured and the account
    /// responds.
    pub ibm: Option<IbmService>,
    /// The local simulator: always present, the execution floor.
    pub simulator: SimulatorBackend,
    /// Bound on one remote-hardware attempt.
    pub remote_timeout: Duration,
}

impl Services {
    /// Construct services from configuration.
    ///
    /// The optional handles degrade to `None` on failure (with a
    /// warning); only a simulator construction failure would be fatal.
    pub async fn init(config: &Config) -> EngineResult<Self> {
        let simulator = SimulatorBackend::new();

        let llm = match &config.openai_api_key {
            Some(key) => match LlmClient::new(key) {
                Ok(client) => {
                    info!("language-model classifier enabled");
                    Some(client)
                }
                Err(err) => {
                    warn!("language-model client init failed: {err}");
                    None
                }
            },
            None => None,
        };

        let ibm = match &config.ibm_quantum_token {
            Some(token) => match IbmService::connect(token).await {
                Ok(service) => {
                    info!("IBM Quantum service enabled");
                    Some(service)
                }
                Err(err) => {
                    warn!("IBM Quantum init failed: {err}; hardware tier disabled");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            llm,
            ibm,
            simulator,
            remote_timeout: config.remote_timeout,
        })
    }
}

/// Idempotent lazy initialization of [`Services`].
///
/// Long-lived processes construct one registry up front and call
/// [`ServiceRegistry::get_or_init`] before each request; after the first
/// call every subsequent one returns the same cached handles.
pub struct ServiceRegistry {
    config: Config,
    cell: OnceCell<Arc<Services>>,
}

impl ServiceRegistry {
    /// Create a registry around resolved configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cell: OnceCell::new(),
        }
    }

    /// Get the services, constructing them on first use.
    pub async fn get_or_init(&self) -> EngineResult<Arc<Services>> {
        let services = self
            .cell
            .get_or_try_init(|| async { Services::init(&self.config).await.map(Arc::new) })
            .await?;
        Ok(services.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_init_has_only_simulator() {
        let services = Services::init(&Config::offline()).await.unwrap();
        assert!(services.llm.is_none());
        assert!(services.ibm.is_none());
    }

    #[tokio::test]
    async fn test_registry_init_is_idempotent() {
        let registry = ServiceRegistry::new(Config::offline());

        let first = registry.get_or_init().await.unwrap();
        let second = registry.get_or_init().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_config_debug_redacts_credentials() {
        let config = Config {
            openai_api_key: Some("sk-verysecret".into()),
            ibm_quantum_token: None,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        };

        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-verysecret"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("<unset>"));
    }
}
