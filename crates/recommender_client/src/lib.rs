//! Recommender client: HTTP access to the recommendation API and background request execution.
mod api;
mod handle;
mod types;

pub use api::{parse_response, ApiSettings, RecommendationApi, ReqwestApi, DEFAULT_API_BASE};
pub use handle::{ChannelResponseSink, ClientHandle, ResponseSink};
pub use types::{
    ApiError, ClientEvent, Recommendation, RecommendRequest, RecommendResponse, RequestId,
};
