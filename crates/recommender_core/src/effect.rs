use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Dispatch one POST to the recommendation endpoint. `query` is already trimmed.
    SendRequest { request_id: RequestId, query: String },
    /// Drop an in-flight request; its response must never reach the state.
    CancelRequest { request_id: RequestId },
}
