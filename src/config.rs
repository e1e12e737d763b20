//! # API Configuration
//!
//! Where the upstream order API lives and how to authenticate against it.
//!
//! ## Tenant URLs
//!
//! Hosted tenants follow a fixed naming scheme, so a base URL can be derived
//! from a tenant name and an environment:
//!
//! | Environment | Base URL |
//! |-------------|----------|
//! | localhost | `http://{tenant}.localhost:{port}` (port defaults to 3786) |
//! | test | `https://{tenant}.test.qbiltrade.com` |
//! | staging | `https://{tenant}.staging.qbiltrade.com` |
//!
//! ```
//! use orderdesk::config::{Environment, tenant_base_url};
//!
//! let url = tenant_base_url("acme", Environment::Staging, None).unwrap();
//! assert_eq!(url, "https://acme.staging.qbiltrade.com");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{OrderDeskError, Result};

/// Port used for local tenants when none is given.
pub const DEFAULT_LOCAL_PORT: u16 = 3786;

/// Domain hosting test and staging tenants.
const HOSTED_DOMAIN: &str = "qbiltrade.com";

/// Base URL and bearer token for the upstream API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Base URL without a trailing slash (e.g., "https://acme.test.qbiltrade.com")
    pub api_url: String,
    /// Bearer token sent with every request
    #[serde(skip_serializing)]
    pub api_token: String,
}

impl ApiConfig {
    /// Build a config, trimming both values and dropping trailing slashes
    /// from the URL. Fails when either value is empty.
    pub fn new(api_url: &str, api_token: &str) -> Result<Self> {
        let api_url = api_url.trim().trim_end_matches('/');
        let api_token = api_token.trim();
        if api_url.is_empty() || api_token.is_empty() {
            return Err(OrderDeskError::InvalidRequest(
                "Missing apiUrl or apiToken".to_string(),
            ));
        }
        Ok(Self {
            api_url: api_url.to_string(),
            api_token: api_token.to_string(),
        })
    }

    /// Config for a hosted or local tenant.
    pub fn for_tenant(
        tenant: &str,
        environment: Environment,
        port: Option<u16>,
        api_token: &str,
    ) -> Result<Self> {
        Self::new(&tenant_base_url(tenant, environment, port)?, api_token)
    }
}

// Keeps the token out of logs and panic messages.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Deployment environment of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Localhost,
    Test,
    Staging,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Localhost => "localhost",
            Environment::Test => "test",
            Environment::Staging => "staging",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive a tenant's API base URL. `port` only applies to localhost.
pub fn tenant_base_url(tenant: &str, environment: Environment, port: Option<u16>) -> Result<String> {
    let tenant = tenant.trim();
    if tenant.is_empty() {
        return Err(OrderDeskError::Config("Tenant name is required".to_string()));
    }

    Ok(match environment {
        Environment::Localhost => format!(
            "http://{}.localhost:{}",
            tenant,
            port.unwrap_or(DEFAULT_LOCAL_PORT)
        ),
        Environment::Test | Environment::Staging => {
            format!("https://{}.{}.{}", tenant, environment, HOSTED_DOMAIN)
        }
    })
}
