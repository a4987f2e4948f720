use std::io;
use std::sync::{mpsc, Arc};

use recommender_client::{ApiError, ClientEvent, ClientHandle, RecommendationApi, ResponseSink};
use recommender_core::{Effect, FailureKind, Msg, Recommendation};
use recommender_logging::{rec_debug, rec_info};

use super::app::AppEvent;

pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn RecommendationApi>, event_tx: mpsc::Sender<AppEvent>) -> io::Result<Self> {
        let sink = Arc::new(MsgSink { tx: event_tx });
        let client = ClientHandle::new(api, sink)?;
        Ok(Self { client })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendRequest { request_id, query } => {
                    rec_info!("SendRequest request_id={} query_len={}", request_id, query.len());
                    self.client.submit(request_id, query);
                }
                Effect::CancelRequest { request_id } => {
                    rec_info!("CancelRequest request_id={}", request_id);
                    self.client.cancel(request_id);
                }
            }
        }
    }
}

/// Turns client completions into core messages on the app's event channel.
struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl ResponseSink for MsgSink {
    fn deliver(&self, event: ClientEvent) {
        if self.tx.send(AppEvent::Core(map_event(event))).is_err() {
            rec_debug!("App event channel closed; dropping client event");
        }
    }
}

pub fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::Completed {
            request_id,
            elapsed,
            result,
        } => Msg::ResponseReceived {
            request_id,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            result: result
                .map(|rows| rows.into_iter().map(map_recommendation).collect())
                .map_err(map_failure),
        },
    }
}

fn map_recommendation(rec: recommender_client::Recommendation) -> Recommendation {
    Recommendation {
        assessment_name: rec.assessment_name,
        description: rec.description,
        relevance_score: rec.relevance_score,
        assessment_url: rec.assessment_url,
    }
}

fn map_failure(err: ApiError) -> FailureKind {
    match err {
        ApiError::HttpStatus(code) => FailureKind::HttpStatus(code),
        ApiError::Timeout => FailureKind::Timeout,
        ApiError::TooLarge { max_bytes } => FailureKind::TooLarge { max_bytes },
        ApiError::Parse(detail) => FailureKind::MalformedResponse(detail),
        ApiError::Network(detail) => FailureKind::Network(Some(detail)),
        ApiError::Encode(_) | ApiError::InvalidBaseUrl { .. } => FailureKind::Network(None),
    }
}
