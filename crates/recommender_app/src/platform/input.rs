use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use recommender_core::{Msg, SAMPLE_QUERIES};
use recommender_logging::rec_debug;

use super::app::AppEvent;
use super::ui::constants::*;

/// Reads stdin line by line on its own thread. End of input is reported as `Quit`.
pub fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) -> std::io::Result<()> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let event = parse_line(&line);
                let quit = matches!(event, AppEvent::Quit);
                if event_tx.send(event).is_err() || quit {
                    return;
                }
            }
            rec_debug!("stdin closed");
            let _ = event_tx.send(AppEvent::Quit);
        })?;
    Ok(())
}

pub fn parse_line(line: &str) -> AppEvent {
    let trimmed = line.trim();
    if !trimmed.starts_with(':') {
        return AppEvent::Core(Msg::QueryChanged(line.to_string()));
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let argument = parts.next();
    match command {
        CMD_SUBMIT | ":s" => AppEvent::Core(Msg::SubmitClicked),
        CMD_SAMPLE => match argument.and_then(|arg| arg.parse::<usize>().ok()) {
            Some(number) if (1..=SAMPLE_QUERIES.len()).contains(&number) => {
                AppEvent::Core(Msg::SampleSelected(number - 1))
            }
            _ => AppEvent::Invalid(format!(
                "{CMD_SAMPLE} expects a number between 1 and {}",
                SAMPLE_QUERIES.len()
            )),
        },
        CMD_SHOW => AppEvent::Show,
        CMD_HELP | ":h" => AppEvent::Help,
        CMD_QUIT | ":q" => AppEvent::Quit,
        other => AppEvent::Invalid(format!("Unknown command {other}; try {CMD_HELP}")),
    }
}
