//! Recommender core: pure request lifecycle state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, FailureKind, Recommendation, RequestId, RequestStatus, EMPTY_QUERY_MESSAGE,
    SAMPLE_QUERIES,
};
pub use update::update;
pub use view_model::{
    format_relevance, sample_preview, AppViewModel, Panel, RecommendationRowView,
    SamplePreview, NO_DESCRIPTION, SAMPLE_PREVIEW_CHARS,
};
