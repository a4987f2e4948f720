use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use recommender_logging::{rec_debug, rec_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::{ApiError, Recommendation, RecommendRequest, RecommendResponse};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

const RECOMMEND_PATH: &str = "recommend";
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl ApiSettings {
    /// Validates `base_url` (http or https) and applies the default limits.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim();
        let parsed = Url::parse(trimmed).map_err(|err| ApiError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                url: trimmed.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        Ok(Self {
            base_url: parsed,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
        })
    }

    /// `<base>/recommend`, tolerant of a trailing slash on the base.
    pub fn endpoint(&self) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "url cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .push(RECOMMEND_PATH);
        Ok(url)
    }
}

#[async_trait::async_trait]
pub trait RecommendationApi: Send + Sync {
    /// Issues one recommendation request for an already trimmed query.
    async fn recommend(&self, query: &str) -> Result<Vec<Recommendation>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ApiSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let endpoint = settings.endpoint()?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<BytesMut, ApiError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::TooLarge { max_bytes });
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(ApiError::TooLarge { max_bytes });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl RecommendationApi for ReqwestApi {
    async fn recommend(&self, query: &str) -> Result<Vec<Recommendation>, ApiError> {
        let body = serde_json::to_vec(&RecommendRequest { query })
            .map_err(|err| ApiError::Encode(err.to_string()))?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            rec_warn!("Recommendation API answered {} for {}", status, self.endpoint);
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        let body = self.read_body(response).await?;
        rec_debug!("Recommendation API returned {} bytes", body.len());
        parse_response(&body)
    }
}

/// Decodes a success body into the ordered recommendation list.
pub fn parse_response(body: &[u8]) -> Result<Vec<Recommendation>, ApiError> {
    let payload: RecommendResponse =
        serde_json::from_slice(body).map_err(|err| ApiError::Parse(err.to_string()))?;
    Ok(payload.recommendations.unwrap_or_default())
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(err.to_string())
}
