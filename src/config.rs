//! Client configuration.
//!
//! [`ClientConfig::default`] talks to the production backends. Tests and
//! alternative deployments override the base URLs.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::{Client, Proxy};

use crate::error::{Result, YandexError};
use crate::protocol;

/// Path suffix appended to the storage id when fetching a lease.
///
/// The backend has changed this over time, so it is configuration rather
/// than a constant. Pick whichever the target backend expects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeaseSuffix {
    /// `/2`, the current generation.
    #[default]
    Current,
    /// `/2.mp3`, the older generation.
    Mp3,
    /// Any other literal suffix.
    Custom(String),
}

impl LeaseSuffix {
    /// The literal path suffix.
    pub fn as_str(&self) -> &str {
        match self {
            LeaseSuffix::Current => protocol::DEFAULT_LEASE_SUFFIX,
            LeaseSuffix::Mp3 => protocol::MP3_LEASE_SUFFIX,
            LeaseSuffix::Custom(s) => s,
        }
    }
}

impl fmt::Display for LeaseSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaseSuffix {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            protocol::DEFAULT_LEASE_SUFFIX => LeaseSuffix::Current,
            protocol::MP3_LEASE_SUFFIX => LeaseSuffix::Mp3,
            other => LeaseSuffix::Custom(other.to_string()),
        })
    }
}

/// Settings shared by the catalog and storage clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the JSON handlers.
    pub api_base_url: String,
    /// Base URL of the download-info service, ending with `/`.
    pub storage_base_url: String,
    /// Suffix selecting the lease format.
    pub lease_suffix: LeaseSuffix,
    /// User agent for all requests.
    pub user_agent: String,
    /// Total request timeout. `None` leaves the transport default.
    pub timeout: Option<Duration>,
    /// Optional proxy URL (`http://` or `https://`).
    pub proxy: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: protocol::API_BASE_URL.to_string(),
            storage_base_url: protocol::STORAGE_BASE_URL.to_string(),
            lease_suffix: LeaseSuffix::default(),
            user_agent: protocol::USER_AGENT.to_string(),
            timeout: None,
            proxy: None,
        }
    }
}

impl ClientConfig {
    /// Create the default production configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the JSON handler base URL.
    pub fn with_api_base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Override the download-info base URL.
    pub fn with_storage_base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.storage_base_url = url.into();
        self
    }

    /// Set the lease suffix.
    pub fn with_lease_suffix(mut self, suffix: LeaseSuffix) -> Self {
        self.lease_suffix = suffix;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Route all requests through a proxy. An empty string means no proxy.
    pub fn with_proxy<S: Into<String>>(mut self, proxy: S) -> Self {
        let proxy = proxy.into();
        self.proxy = if proxy.is_empty() { None } else { Some(proxy) };
        self
    }

    /// Build the HTTP client described by this configuration.
    pub fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder().user_agent(self.user_agent.as_str());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy) = &self.proxy {
            let proxy = Proxy::all(proxy.as_str())
                .map_err(|e| YandexError::InvalidProxy(format!("{}: {}", proxy, e)))?;
            builder = builder.proxy(proxy);
        }

        Ok(builder.build()?)
    }
}
