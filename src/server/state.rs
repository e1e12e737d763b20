//! Server state and configuration.

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use crate::client::{DEFAULT_TIMEOUT_SECS, OrderClient};
use crate::config::ApiConfig;
use crate::error::{OrderDeskError, Result};
use crate::store::ResultStore;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:3000")
    pub listen_addr: String,
    /// Upstream API settings known at startup; can be replaced at runtime
    pub api_config: Option<ApiConfig>,
    /// Timeout for upstream requests
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            api_config: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// Current upstream API settings, set via `POST /set-config`
    pub api_config: RwLock<Option<ApiConfig>>,
    /// Resources fetched for webhook notifications
    pub results: ResultStore,
    /// Shared HTTP connection pool for upstream calls
    pub http: reqwest::Client,
    /// Unix timestamp of server boot for cache busting.
    pub boot_time: u64,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        Ok(Self {
            api_config: RwLock::new(config.api_config.clone()),
            config,
            results: ResultStore::new(),
            http,
            boot_time,
        })
    }

    /// Replace the upstream API settings.
    pub async fn set_api_config(&self, api_config: ApiConfig) {
        *self.api_config.write().await = Some(api_config);
    }

    /// A client for the current settings, or a config error if none are set.
    pub async fn client(&self) -> Result<OrderClient> {
        let config = self.api_config.read().await.clone();
        config
            .map(|c| OrderClient::with_client(self.http.clone(), c))
            .ok_or_else(|| OrderDeskError::Config("API config not set".to_string()))
    }
}
