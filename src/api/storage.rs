//! Storage metadata client.
//!
//! Fetches download leases from the download-info service. Requests are
//! unauthenticated; each call makes exactly one request and nothing is
//! cached or retried.

use reqwest::Client;
use tracing::{debug, error};

use crate::config::{ClientConfig, LeaseSuffix};
use crate::error::Result;
use crate::models::{DownloadLease, StorageId};

/// Download-info client.
#[derive(Debug, Clone)]
pub struct StorageApi {
    client: Client,
    base_url: String,
    lease_suffix: LeaseSuffix,
}

impl StorageApi {
    /// Create a client for the production storage service.
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a client from a configuration.
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_client(config.http_client()?, config))
    }

    /// Create a client sharing an existing HTTP client.
    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.storage_base_url.clone(),
            lease_suffix: config.lease_suffix.clone(),
        }
    }

    /// URL of the lease document for a storage id.
    pub fn lease_url(&self, storage_id: &StorageId) -> String {
        format!("{}{}{}", self.base_url, storage_id, self.lease_suffix)
    }

    /// Fetch the download lease for a storage id.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails or the service answers
    /// with a non-success status, and `DecodeError` if the body is not a
    /// lease document.
    pub async fn fetch_lease(&self, storage_id: &StorageId) -> Result<DownloadLease> {
        let url = self.lease_url(storage_id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        DownloadLease::from_xml(&body).inspect_err(|e| {
            error!("Failed to decode lease for {}: {}", storage_id, e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::YandexError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LEASE_XML: &str = "<download-info><host>s.example</host><path>/trackpath</path><ts>999</ts><region>-1</region><s>abc</s></download-info>";

    fn api_for(server: &MockServer, suffix: LeaseSuffix) -> StorageApi {
        let config = ClientConfig::new()
            .with_storage_base_url(format!("{}/download-info/", server.uri()))
            .with_lease_suffix(suffix);
        StorageApi::with_config(&config).unwrap()
    }

    #[test]
    fn test_lease_url_production() {
        let api = StorageApi::new().unwrap();
        let id = StorageId::new("12345/abcde67890").unwrap();
        assert_eq!(
            api.lease_url(&id),
            "http://storage.mds.yandex.net/download-info/12345/abcde67890/2"
        );
    }

    #[tokio::test]
    async fn test_fetch_lease() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/download-info/12345/abcde67890/2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LEASE_XML))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server, LeaseSuffix::Current);
        let lease = api
            .fetch_lease(&StorageId::new("12345/abcde67890").unwrap())
            .await
            .unwrap();
        assert_eq!(lease.host, "s.example");
        assert_eq!(lease.path, "/trackpath");
        assert_eq!(lease.timestamp, "999");
        assert_eq!(lease.partial_signature, "abc");
    }

    #[tokio::test]
    async fn test_fetch_lease_mp3_suffix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/download-info/1/a/2.mp3"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LEASE_XML))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server, LeaseSuffix::Mp3);
        let lease = api.fetch_lease(&StorageId::new("1/a").unwrap()).await;
        assert!(lease.is_ok());
    }

    #[tokio::test]
    async fn test_server_error_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = api_for(&server, LeaseSuffix::Current);
        let err = api
            .fetch_lease(&StorageId::new("1/a").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, YandexError::TransportError(_)));
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>oops"))
            .mount(&server)
            .await;

        let api = api_for(&server, LeaseSuffix::Current);
        let err = api
            .fetch_lease(&StorageId::new("1/a").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, YandexError::DecodeError(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let config = ClientConfig::new().with_storage_base_url("http://127.0.0.1:1/download-info/");
        let api = StorageApi::with_config(&config).unwrap();
        let err = api
            .fetch_lease(&StorageId::new("1/a").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, YandexError::TransportError(_)));
    }
}
