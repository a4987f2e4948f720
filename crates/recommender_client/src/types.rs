use std::time::Duration;

use serde::{Deserialize, Serialize};

pub type RequestId = u64;

/// Body of `POST <base>/recommend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendRequest<'a> {
    pub query: &'a str,
}

/// Success payload. An absent or `null` list means no recommendations.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub recommendations: Option<Vec<Recommendation>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendation {
    pub assessment_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub relevance_score: f64,
    pub assessment_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("API Error: {0}")]
    HttpStatus(u16),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("response exceeded {max_bytes} bytes")]
    TooLarge { max_bytes: u64 },
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("failed to parse response: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// A request reached a terminal outcome. `elapsed` runs from dispatch to receipt.
    Completed {
        request_id: RequestId,
        elapsed: Duration,
        result: Result<Vec<Recommendation>, ApiError>,
    },
}
