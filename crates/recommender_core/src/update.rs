use crate::{AppState, Effect, Msg, SAMPLE_QUERIES};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(text) => {
            state.set_query(text);
            Vec::new()
        }
        Msg::SampleSelected(index) => {
            if let Some(sample) = SAMPLE_QUERIES.get(index) {
                state.set_query((*sample).to_string());
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            // One request at a time; the submit control is disabled while loading.
            if state.is_loading() || state.is_closed() {
                return (state, Vec::new());
            }
            let query = state.query().trim().to_string();
            if query.is_empty() {
                state.reject_empty_query();
                return (state, Vec::new());
            }
            let request_id = state.begin_request();
            vec![Effect::SendRequest { request_id, query }]
        }
        Msg::ResponseReceived {
            request_id,
            elapsed_ms,
            result,
        } => {
            if state.in_flight() != Some(request_id) {
                return (state, Vec::new());
            }
            match result {
                Ok(recommendations) => state.apply_success(recommendations, elapsed_ms),
                Err(failure) => state.apply_failure(&failure),
            }
            Vec::new()
        }
        Msg::ViewClosed => match state.close() {
            Some(request_id) => vec![Effect::CancelRequest { request_id }],
            None => Vec::new(),
        },
    };

    (state, effects)
}
