use recommender_core::{AppViewModel, Panel, RecommendationRowView};

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    Heading,
    Muted,
    Error,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub style: LineStyle,
    pub text: String,
}

impl Line {
    pub fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    pub fn blank() -> Self {
        Self::new(LineStyle::Plain, "")
    }
}

pub fn render(view: &AppViewModel) -> Vec<Line> {
    let mut lines = Vec::new();

    let query = if view.query.trim().is_empty() {
        "(empty)".to_string()
    } else {
        view.query.clone()
    };
    lines.push(Line::new(LineStyle::Plain, format!("Query: {query}")));

    lines.push(Line::new(LineStyle::Muted, "Try a sample query:"));
    for sample in &view.samples {
        lines.push(Line::new(
            LineStyle::Muted,
            format!("  [{}] {}", sample.index + 1, sample.label),
        ));
    }

    let submit_style = if view.submit_enabled {
        LineStyle::Heading
    } else {
        LineStyle::Disabled
    };
    lines.push(Line::new(submit_style, format!("[ {} ]", view.submit_label)));
    lines.push(Line::blank());

    match &view.panel {
        Some(Panel::Error(message)) => {
            lines.push(Line::new(LineStyle::Error, "Error"));
            lines.push(Line::new(LineStyle::Error, message.clone()));
        }
        Some(Panel::Results {
            heading,
            processing_label,
            rows,
        }) => {
            lines.push(Line::new(
                LineStyle::Heading,
                format!("{heading}  {processing_label}"),
            ));
            lines.extend(render_table(rows));
        }
        Some(Panel::Placeholder) => {
            lines.push(Line::new(
                LineStyle::Heading,
                "Ready to Find the Perfect Assessments",
            ));
            lines.push(Line::new(
                LineStyle::Muted,
                "Enter a job description or requirements above to get assessment recommendations.",
            ));
        }
        None => {}
    }

    lines
}

fn render_table(rows: &[RecommendationRowView]) -> Vec<Line> {
    let index_width = rows
        .iter()
        .map(|row| row.index.to_string().len())
        .max()
        .unwrap_or(1)
        .max(1);
    let name_width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0)
        .clamp("Assessment Name".len(), NAME_WIDTH);
    let description_width = rows
        .iter()
        .map(|row| row.description.chars().count())
        .max()
        .unwrap_or(0)
        .clamp("Description".len(), DESCRIPTION_WIDTH);
    let score_width = rows
        .iter()
        .map(|row| row.score_label.len())
        .max()
        .unwrap_or(0)
        .max("Score".len());

    let format_row = |index: &str, name: &str, description: &str, score: &str, link: &str| {
        format!(
            "{index:>index_width$}  {name:<name_width$}  {description:<description_width$}  {score:>score_width$}  {link}",
            name = truncate(name, name_width),
            description = truncate(description, description_width),
        )
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(Line::new(
        LineStyle::Heading,
        format_row("#", "Assessment Name", "Description", "Score", "Link"),
    ));
    lines.push(Line::new(
        LineStyle::Muted,
        "-".repeat(index_width + name_width + description_width + score_width + 12),
    ));
    for row in rows {
        lines.push(Line::new(
            LineStyle::Plain,
            format_row(
                &row.index.to_string(),
                &row.name,
                &row.description,
                &row.score_label,
                &row.url,
            ),
        ));
    }
    lines
}

/// Shortens `text` to at most `max` characters, ending in "..." when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let head: String = text.chars().take(keep).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use recommender_core::{update, AppState, Msg, Recommendation};

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn initial_view_renders_placeholder() {
        let lines = render(&AppState::new().view());
        let texts = texts(&lines);

        assert_eq!(texts[0], "Query: (empty)");
        assert!(texts.contains(&"[ Get Recommendations ]"));
        assert!(texts.contains(&"Ready to Find the Perfect Assessments"));
    }

    #[test]
    fn loading_view_shows_disabled_submit_only() {
        let (state, _) = update(AppState::new(), Msg::QueryChanged("java".to_string()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let lines = render(&state.view());

        let submit = lines
            .iter()
            .find(|line| line.text == "[ Analyzing... ]")
            .expect("submit line");
        assert_eq!(submit.style, LineStyle::Disabled);
        assert_eq!(lines.last(), Some(&Line::blank()));
    }

    #[test]
    fn results_render_one_row_per_recommendation() {
        let (state, _) = update(AppState::new(), Msg::QueryChanged("java".to_string()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::ResponseReceived {
                request_id: 1,
                elapsed_ms: 12,
                result: Ok(vec![
                    Recommendation {
                        assessment_name: "Java 8".to_string(),
                        description: None,
                        relevance_score: 0.873,
                        assessment_url: "https://catalog.example.com/java".to_string(),
                    },
                    Recommendation {
                        assessment_name: "Interpersonal Communications".to_string(),
                        description: Some("x".repeat(80)),
                        relevance_score: 1.0,
                        assessment_url: "https://catalog.example.com/comm".to_string(),
                    },
                ]),
            },
        );

        let lines = render(&state.view());
        let texts = texts(&lines);
        let heading = texts
            .iter()
            .position(|text| text.starts_with("Recommended Assessments (2)"))
            .expect("heading");
        assert!(texts[heading].ends_with("Processed in 12ms"));

        let rows = &texts[heading + 3..];
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("1  Java 8"));
        assert!(rows[0].contains("No description"));
        assert!(rows[0].contains("87.3%"));
        assert!(rows[0].ends_with("https://catalog.example.com/java"));
        assert!(rows[1].contains("100.0%"));
        assert!(rows[1].contains(&format!("{}...", "x".repeat(DESCRIPTION_WIDTH - 3))));
    }

    #[test]
    fn error_panel_renders_message() {
        let (state, _) = update(AppState::new(), Msg::SubmitClicked);
        let lines = render(&state.view());

        let error_lines: Vec<_> = lines
            .iter()
            .filter(|line| line.style == LineStyle::Error)
            .map(|line| line.text.as_str())
            .collect();
        assert_eq!(
            error_lines,
            vec!["Error", "Please enter a query or job description."]
        );
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("éééééééééé", 6), "ééé...");
    }
}
