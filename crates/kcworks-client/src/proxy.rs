//! Blocking HTTP client for the KCWorks proxy.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{FetchError, Result};
use crate::source::RecordSource;

/// Proxy route serving bibliographic query results.
pub const PROXY_PATH: &str = "/mesh_research_kcworks/v1/kcworks-proxy";

/// Query string parameter carrying the raw user query.
pub const QUERY_PARAM: &str = "kcworksQuery";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent string for proxy requests.
const USER_AGENT_VALUE: &str = concat!("kcworks-bib/", env!("CARGO_PKG_VERSION"));

/// Client for the KCWorks proxy endpoint.
///
/// The proxy owns the payload shape; this client only transports it. The
/// request is a plain GET with the raw query in a single parameter.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: Client,
    endpoint: String,
}

impl ProxyClient {
    /// Create a client for the proxy hosted at `base_url`.
    ///
    /// `base_url` is the site root (e.g. `https://hcommons.org`); the proxy
    /// route is appended automatically.
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT_VALUE)
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{trimmed}{PROXY_PATH}"),
        })
    }

    /// The full proxy endpoint URL this client targets.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RecordSource for ProxyClient {
    fn fetch_records(&self, query: &str) -> Result<Value> {
        debug!(endpoint = %self.endpoint, "fetching records from proxy");
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[(QUERY_PARAM, query)])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        let text = response.text()?;
        serde_json::from_str(&text).map_err(|err| FetchError::MalformedPayload(err.to_string()))
    }
}
