use std::collections::HashMap;
use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use recommender_logging::{rec_debug, rec_info, rec_warn};
use tokio_util::sync::CancellationToken;

use crate::{ClientEvent, RecommendationApi, RequestId};

/// Receives terminal outcomes of requests. Called from runtime worker threads.
pub trait ResponseSink: Send + Sync {
    fn deliver(&self, event: ClientEvent);
}

pub struct ChannelResponseSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelResponseSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl ResponseSink for ChannelResponseSink {
    fn deliver(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

enum ClientCommand {
    Submit { request_id: RequestId, query: String },
    Cancel { request_id: RequestId },
}

/// Runs requests on a background tokio runtime owned by a dedicated thread.
///
/// Dropping the handle cancels every request still in flight; cancelled
/// requests never reach the sink.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    shutdown: CancellationToken,
}

impl ClientHandle {
    pub fn new(api: Arc<dyn RecommendationApi>, sink: Arc<dyn ResponseSink>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("recommender-io")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();
        let root = shutdown.clone();

        thread::Builder::new()
            .name("recommender-client".to_string())
            .spawn(move || {
                let mut pending: HashMap<RequestId, CancellationToken> = HashMap::new();
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        ClientCommand::Submit { request_id, query } => {
                            // Finished requests cancel their own token on exit.
                            pending.retain(|_, token| !token.is_cancelled());
                            let token = root.child_token();
                            pending.insert(request_id, token.clone());
                            runtime.spawn(run_request(
                                api.clone(),
                                sink.clone(),
                                request_id,
                                query,
                                token,
                            ));
                        }
                        ClientCommand::Cancel { request_id } => {
                            if let Some(token) = pending.remove(&request_id) {
                                rec_info!("Cancelling request {}", request_id);
                                token.cancel();
                            }
                        }
                    }
                }
                root.cancel();
                rec_debug!("Client command channel closed; runtime shutting down");
            })?;

        Ok(Self { cmd_tx, shutdown })
    }

    pub fn submit(&self, request_id: RequestId, query: impl Into<String>) {
        let command = ClientCommand::Submit {
            request_id,
            query: query.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            rec_warn!("Client thread gone; request {} dropped", request_id);
        }
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(ClientCommand::Cancel { request_id });
    }
}

impl Drop for ClientHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn run_request(
    api: Arc<dyn RecommendationApi>,
    sink: Arc<dyn ResponseSink>,
    request_id: RequestId,
    query: String,
    token: CancellationToken,
) {
    let _done = token.clone().drop_guard();
    let started = Instant::now();
    rec_info!("Dispatching request {} query_len={}", request_id, query.len());
    rec_debug!("Request {} query={:?}", request_id, query);

    let result = tokio::select! {
        _ = token.cancelled() => {
            rec_info!("Request {} cancelled before completion", request_id);
            return;
        }
        result = api.recommend(&query) => result,
    };
    let elapsed = started.elapsed();

    match &result {
        Ok(recommendations) => rec_info!(
            "Request {} returned {} recommendations in {}ms",
            request_id,
            recommendations.len(),
            elapsed.as_millis()
        ),
        Err(err) => rec_warn!("Request {} failed: {}", request_id, err),
    }

    sink.deliver(ClientEvent::Completed {
        request_id,
        elapsed,
        result,
    });
}
