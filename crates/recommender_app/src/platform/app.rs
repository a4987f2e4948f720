use std::process::ExitCode;
use std::sync::{mpsc, Arc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use recommender_client::{RecommendationApi, ReqwestApi};
use recommender_core::{update, AppState, AppViewModel, Msg};
use recommender_logging::{rec_info, rec_warn};

use super::config::Cli;
use super::effects::EffectRunner;
use super::input;
use super::ui::{self, render::Line, render::LineStyle};

/// Everything the dispatcher thread reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A message for the core state machine.
    Core(Msg),
    Show,
    Help,
    Quit,
    Invalid(String),
}

pub fn run_app() -> Result<ExitCode> {
    let cli = Cli::parse();
    if let Some(destination) = cli.log.destination() {
        recommender_logging::initialize(destination, cli.log_level);
    }

    let settings = cli.api_settings()?;
    let initial = cli.one_shot()?;
    let endpoint = settings.endpoint()?;
    rec_info!("Using recommendation endpoint {}", endpoint);
    let api = ReqwestApi::new(settings).context("failed to build HTTP client")?;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let mut app = App::new(Arc::new(api), event_tx.clone())?;

    match initial {
        Some(msg) => {
            drop(event_tx);
            app.run_one_shot(msg, &event_rx)
        }
        None => {
            input::spawn_stdin_reader(event_tx).context("failed to start input reader")?;
            app.run_interactive(&event_rx);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Owns the state and applies every event on one thread, in arrival order.
pub struct App {
    state: AppState,
    effects: EffectRunner,
}

impl App {
    pub fn new(api: Arc<dyn RecommendationApi>, event_tx: mpsc::Sender<AppEvent>) -> Result<Self> {
        let effects =
            EffectRunner::new(api, event_tx).context("failed to start request runtime")?;
        Ok(Self {
            state: AppState::new(),
            effects,
        })
    }

    /// Applies `msg`, runs resulting effects, and returns a fresh view if anything changed.
    pub fn dispatch(&mut self, msg: Msg) -> Option<AppViewModel> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = was_dirty.then(|| state.view());
        self.state = state;
        self.effects.enqueue(effects);
        view
    }

    fn run_interactive(&mut self, events: &mpsc::Receiver<AppEvent>) {
        print_lines(&ui::layout::banner());
        print_lines(&ui::layout::help());
        print_lines(&ui::render::render(&self.state.view()));

        while let Ok(event) = events.recv() {
            match event {
                AppEvent::Core(msg) => {
                    if let Some(view) = self.dispatch(msg) {
                        print_lines(&ui::render::render(&view));
                    }
                }
                AppEvent::Show => print_lines(&ui::render::render(&self.state.view())),
                AppEvent::Help => print_lines(&ui::layout::help()),
                AppEvent::Invalid(message) => {
                    print_lines(&[Line::new(LineStyle::Error, message)]);
                }
                AppEvent::Quit => break,
            }
        }
        self.dispatch(Msg::ViewClosed);
        rec_info!("Interactive session closed");
    }

    fn run_one_shot(&mut self, initial: Msg, events: &mpsc::Receiver<AppEvent>) -> Result<ExitCode> {
        self.dispatch(initial);
        self.dispatch(Msg::SubmitClicked);

        while self.state.is_loading() {
            match events.recv() {
                Ok(AppEvent::Core(msg)) => {
                    self.dispatch(msg);
                }
                Ok(_) => {}
                Err(_) => bail!("request runtime stopped before the request finished"),
            }
        }

        print_lines(&ui::render::render(&self.state.view()));
        if let Some(error) = self.state.error() {
            rec_warn!("One-shot request failed: {}", error);
            return Ok(ExitCode::FAILURE);
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn print_lines(lines: &[Line]) {
    for line in lines {
        let text = line.text.as_str();
        match line.style {
            LineStyle::Plain => println!("{text}"),
            LineStyle::Heading => println!("{}", text.bold()),
            LineStyle::Muted => println!("{}", text.dimmed()),
            LineStyle::Error => println!("{}", text.red()),
            LineStyle::Disabled => println!("{}", text.dimmed().italic()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use recommender_client::{ApiError, Recommendation};
    use recommender_core::{Panel, RequestStatus};

    use super::*;

    struct StaticApi(Result<Vec<Recommendation>, ApiError>);

    #[async_trait::async_trait]
    impl RecommendationApi for StaticApi {
        async fn recommend(&self, _query: &str) -> Result<Vec<Recommendation>, ApiError> {
            self.0.clone()
        }
    }

    fn next_core_msg(events: &mpsc::Receiver<AppEvent>) -> Msg {
        match events.recv_timeout(Duration::from_secs(5)) {
            Ok(AppEvent::Core(msg)) => msg,
            other => panic!("expected core message, got {other:?}"),
        }
    }

    #[test]
    fn submit_round_trip_reaches_success() {
        let (tx, rx) = mpsc::channel();
        let api = StaticApi(Ok(vec![Recommendation {
            assessment_name: "Python (New)".to_string(),
            description: None,
            relevance_score: 0.75,
            assessment_url: "https://catalog.example.com/python".to_string(),
        }]));
        let mut app = App::new(Arc::new(api), tx).unwrap();

        app.dispatch(Msg::QueryChanged("python".to_string()));
        let view = app.dispatch(Msg::SubmitClicked).expect("loading view");
        assert!(view.loading);
        // A second click while loading changes nothing.
        assert!(app.dispatch(Msg::SubmitClicked).is_none());

        let msg = next_core_msg(&rx);
        let view = app.dispatch(msg).expect("result view");
        assert_eq!(view.status, RequestStatus::Success);
        assert!(!view.loading);
        assert!(matches!(view.panel, Some(Panel::Results { ref rows, .. }) if rows.len() == 1));
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn failed_request_shows_error_banner() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(Arc::new(StaticApi(Err(ApiError::HttpStatus(500)))), tx).unwrap();

        app.dispatch(Msg::SampleSelected(0));
        app.dispatch(Msg::SubmitClicked);
        let view = app.dispatch(next_core_msg(&rx)).expect("error view");

        assert_eq!(view.panel, Some(Panel::Error("API Error: 500".to_string())));
        assert!(view.submit_enabled);
    }
}
