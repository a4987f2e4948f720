use recommender_core::SAMPLE_QUERIES;

use super::constants::*;
use super::render::{Line, LineStyle};

pub const TITLE: &str = "SHL Assessment Recommender";
pub const SUBTITLE: &str = "Assessment recommendations for hiring needs";

/// Lines printed once when the interactive session starts.
pub fn banner() -> Vec<Line> {
    vec![
        Line::new(LineStyle::Heading, TITLE),
        Line::new(LineStyle::Muted, SUBTITLE),
        Line::blank(),
    ]
}

pub fn help() -> Vec<Line> {
    vec![
        Line::new(LineStyle::Plain, "Type a job description or query and press Enter to set it."),
        Line::new(
            LineStyle::Plain,
            format!(
                "  {CMD_SAMPLE} <1-{}>  use a sample query",
                SAMPLE_QUERIES.len()
            ),
        ),
        Line::new(LineStyle::Plain, format!("  {CMD_SUBMIT}        get recommendations")),
        Line::new(LineStyle::Plain, format!("  {CMD_SHOW}          redraw the current view")),
        Line::new(LineStyle::Plain, format!("  {CMD_HELP}          show this help")),
        Line::new(LineStyle::Plain, format!("  {CMD_QUIT}          exit")),
        Line::blank(),
    ]
}
