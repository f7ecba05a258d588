use std::time::Duration;

use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use toplist_logging::toplist_debug;
use url::Url;

use crate::{ApiError, MetadataResponse, PageRequest, RepositoryRecord};

pub const DEFAULT_API_BASE: &str = "https://top-of-github-api.baraniecki.eu";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub api_base: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Data API as seen by the browser: one catalog, many pages.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    async fn fetch_catalog(&self) -> Result<MetadataResponse, ApiError>;

    async fn fetch_page(&self, page: &PageRequest) -> Result<Vec<RepositoryRecord>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestApiClient {
    pub fn new(settings: FetchSettings) -> Result<Self, ApiError> {
        // Validate the base once so every endpoint below is well-formed.
        Url::parse(&settings.api_base).map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// Joins `path` to the base verbatim; escaped language names stay as delivered.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.settings.api_base.trim_end_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(|err| ApiError::InvalidUrl(err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        toplist_debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::TooLarge {
                    max_bytes,
                    actual: content_len,
                });
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk: bytes::Bytes = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ApiError::TooLarge {
                    max_bytes,
                    actual: next_len,
                });
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl ApiClient for ReqwestApiClient {
    async fn fetch_catalog(&self) -> Result<MetadataResponse, ApiError> {
        let url = self.endpoint("metadata")?;
        self.get_json(url).await
    }

    async fn fetch_page(&self, page: &PageRequest) -> Result<Vec<RepositoryRecord>, ApiError> {
        let url = self.endpoint(&page.path())?;
        self.get_json(url).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout(err.to_string());
    }
    if err.is_decode() {
        return ApiError::Decode(err.to_string());
    }
    ApiError::Network(err.to_string())
}
