use std::fmt;

use crate::view_model::{self, AppViewModel};

pub type RequestId = u64;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a query or job description.";

pub const SAMPLE_QUERIES: [&str; 3] = [
    "I am hiring for Java developers who can also collaborate effectively with my business teams.",
    "Looking to hire mid-level professionals who are proficient in Python, SQL, and JavaScript.",
    "Need assessments for analyst role with cognitive and personality tests.",
];

const NETWORK_FAILURE_MESSAGE: &str =
    "Failed to fetch recommendations. Please check your API connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// One suggested assessment, kept in the order the backend returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub assessment_name: String,
    pub description: Option<String>,
    pub relevance_score: f64,
    pub assessment_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    HttpStatus(u16),
    /// Transport failure, with the underlying error text when there is one.
    Network(Option<String>),
    Timeout,
    MalformedResponse(String),
    TooLarge { max_bytes: u64 },
}

impl FailureKind {
    /// Text shown in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            FailureKind::HttpStatus(code) => format!("API Error: {code}"),
            FailureKind::Network(Some(detail)) if !detail.trim().is_empty() => detail.clone(),
            FailureKind::Network(_) => NETWORK_FAILURE_MESSAGE.to_string(),
            FailureKind::Timeout => "The recommendation API did not respond in time.".to_string(),
            FailureKind::MalformedResponse(detail) => {
                format!("Invalid response from API: {detail}")
            }
            FailureKind::TooLarge { max_bytes } => {
                format!("Response from API exceeded {max_bytes} bytes.")
            }
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Network(_) => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MalformedResponse(detail) => write!(f, "malformed response: {detail}"),
            FailureKind::TooLarge { max_bytes } => write!(f, "response larger than {max_bytes} bytes"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    query: String,
    status: RequestStatus,
    recommendations: Vec<Recommendation>,
    error: Option<String>,
    processing_time_ms: u64,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    closed: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn processing_time_ms(&self) -> u64 {
        self.processing_time_ms
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn set_query(&mut self, query: String) {
        if self.query != query {
            self.query = query;
            self.mark_dirty();
        }
    }

    pub(crate) fn reject_empty_query(&mut self) {
        self.error = Some(EMPTY_QUERY_MESSAGE.to_string());
        self.status = RequestStatus::Idle;
        self.mark_dirty();
    }

    /// Enters `Loading` and returns the id of the request to dispatch.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.error = None;
        self.recommendations.clear();
        self.in_flight = Some(request_id);
        self.status = RequestStatus::Loading;
        self.mark_dirty();
        request_id
    }

    pub(crate) fn apply_success(&mut self, recommendations: Vec<Recommendation>, elapsed_ms: u64) {
        self.recommendations = recommendations;
        self.processing_time_ms = elapsed_ms;
        self.status = RequestStatus::Success;
        self.in_flight = None;
        self.mark_dirty();
    }

    pub(crate) fn apply_failure(&mut self, failure: &FailureKind) {
        self.error = Some(failure.user_message());
        self.recommendations.clear();
        self.status = RequestStatus::Error;
        self.in_flight = None;
        self.mark_dirty();
    }

    /// Marks the view closed and hands back the request that must be cancelled, if any.
    pub(crate) fn close(&mut self) -> Option<RequestId> {
        self.closed = true;
        let dropped = self.in_flight.take();
        if dropped.is_some() {
            self.status = RequestStatus::Idle;
            self.mark_dirty();
        }
        dropped
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
