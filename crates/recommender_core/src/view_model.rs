use crate::{AppState, RequestStatus, SAMPLE_QUERIES};

/// Number of characters of a sample query shown on its button.
pub const SAMPLE_PREVIEW_CHARS: usize = 50;

pub const NO_DESCRIPTION: &str = "No description";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePreview {
    pub index: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRowView {
    /// 1-based position in the order received.
    pub index: usize,
    pub name: String,
    pub description: String,
    pub score_label: String,
    pub url: String,
}

/// The single content panel below the form. Variants are listed in display priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Error(String),
    Results {
        heading: String,
        processing_label: String,
        rows: Vec<RecommendationRowView>,
    },
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub query: String,
    pub status: RequestStatus,
    pub loading: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub samples: Vec<SamplePreview>,
    /// `None` while a request is loading and nothing else is visible.
    pub panel: Option<Panel>,
}

pub(crate) fn build(state: &AppState) -> AppViewModel {
    let loading = state.is_loading();
    AppViewModel {
        query: state.query().to_string(),
        status: state.status(),
        loading,
        submit_enabled: !loading,
        submit_label: if loading {
            "Analyzing..."
        } else {
            "Get Recommendations"
        },
        samples: SAMPLE_QUERIES
            .iter()
            .enumerate()
            .map(|(index, sample)| SamplePreview {
                index,
                label: sample_preview(sample),
            })
            .collect(),
        panel: select_panel(state, loading),
    }
}

fn select_panel(state: &AppState, loading: bool) -> Option<Panel> {
    if let Some(error) = state.error() {
        return Some(Panel::Error(error.to_string()));
    }
    let recommendations = state.recommendations();
    if !recommendations.is_empty() {
        let rows = recommendations
            .iter()
            .enumerate()
            .map(|(idx, rec)| RecommendationRowView {
                index: idx + 1,
                name: rec.assessment_name.clone(),
                description: rec
                    .description
                    .as_deref()
                    .filter(|text| !text.is_empty())
                    .unwrap_or(NO_DESCRIPTION)
                    .to_string(),
                score_label: format_relevance(rec.relevance_score),
                url: rec.assessment_url.clone(),
            })
            .collect();
        return Some(Panel::Results {
            heading: format!("Recommended Assessments ({})", recommendations.len()),
            processing_label: format!("Processed in {}ms", state.processing_time_ms()),
            rows,
        });
    }
    if loading {
        None
    } else {
        Some(Panel::Placeholder)
    }
}

/// Relevance fraction as a percentage with one decimal place, e.g. `0.873` -> `"87.3%"`.
/// Ties round away from zero, so `0.3125` -> `"31.3%"`.
pub fn format_relevance(score: f64) -> String {
    format!("{:.1}%", (score * 1000.0).round() / 10.0)
}

/// Button label for a sample query: the leading characters followed by an ellipsis.
pub fn sample_preview(sample: &str) -> String {
    let head: String = sample.chars().take(SAMPLE_PREVIEW_CHARS).collect();
    format!("{head}...")
}
