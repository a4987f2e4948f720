#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the query box.
    QueryChanged(String),
    /// User picked one of the predefined sample queries (index into `SAMPLE_QUERIES`).
    SampleSelected(usize),
    /// User pressed the submit control.
    SubmitClicked,
    /// The client finished a request.
    ResponseReceived {
        request_id: crate::RequestId,
        elapsed_ms: u64,
        result: Result<Vec<crate::Recommendation>, crate::FailureKind>,
    },
    /// The view is being torn down; late responses are discarded.
    ViewClosed,
}
