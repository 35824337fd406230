//! Main TUI application state machine.
//!
//! Handles:
//! - Tab navigation
//! - Input event handling
//! - The idle/processing cycle around each Predict action

use std::any::Any;
use std::io;
use std::sync::mpsc::TryRecvError;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{LinearModelAdapter, StandardScalerAdapter};
use crate::application::PredictionService;
use crate::config::AppConfig;
use crate::domain::{PredictionError, PredictionFailure, PredictionOutcome};
use crate::ports::{Classifier, Preprocessor};

use super::ui::{
    explanation::render_explanation,
    prediction::{render_prediction, PredictionFormState, ResultView},
    render_disclaimer, render_tabs,
};
use super::worker::{PredictionWorker, PredictionWorkerHandle};

/// Currently visible tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Prediction,
    FeatureExplanation,
}

impl Tab {
    fn index(self) -> usize {
        match self {
            Self::Prediction => 0,
            Self::FeatureExplanation => 1,
        }
    }
}

/// Form lifecycle: waiting for a Predict action, or running one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Processing,
}

/// Main application state
pub struct App<P = StandardScalerAdapter, C = LinearModelAdapter>
where
    P: Preprocessor + 'static,
    C: Classifier + 'static,
{
    tab: Tab,

    should_quit: bool,

    /// Form handler over the loaded artifacts
    service: Arc<PredictionService<P, C>>,

    form_state: PredictionFormState,

    phase: FormPhase,

    /// Outcome of the last completed Predict action
    last_outcome: Option<PredictionOutcome>,

    pending_worker: Option<PredictionWorkerHandle>,

    /// Frame counter driving the spinner
    tick: usize,
}

impl App {
    /// Create the application, loading both artifacts from the configured paths.
    ///
    /// # Errors
    /// Returns error if either artifact cannot be loaded.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let service = PredictionService::from_config(config)
            .context("Failed to load model artifacts")?;
        Ok(Self::with_dependencies(Arc::new(service)))
    }
}

impl<P, C> App<P, C>
where
    P: Preprocessor + 'static,
    C: Classifier + 'static,
{
    /// Create application with an injected prediction service (Composition Root pattern).
    pub fn with_dependencies(service: Arc<PredictionService<P, C>>) -> Self {
        Self {
            tab: Tab::Prediction,
            should_quit: false,
            service,
            form_state: PredictionFormState::default(),
            phase: FormPhase::Idle,
            last_outcome: None,
            pending_worker: None,
            tick: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<&PredictionOutcome> {
        self.last_outcome.as_ref()
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let previous_hook = std::panic::take_hook();
        install_panic_logging();

        let result = self.main_loop(&mut terminal);

        std::panic::set_hook(previous_hook);
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();
            self.tick = self.tick.wrapping_add(1);

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(0),
                        Constraint::Length(2),
                    ])
                    .split(f.area());

                render_tabs(f, chunks[0], self.tab.index());

                match self.tab {
                    Tab::Prediction => {
                        let view = ResultView {
                            processing: self.phase == FormPhase::Processing,
                            outcome: self.last_outcome.as_ref(),
                            tick: self.tick / 4,
                        };
                        render_prediction(f, chunks[1], &self.form_state, &view);
                    }
                    Tab::FeatureExplanation => render_explanation(f, chunks[1]),
                }

                render_disclaimer(f, chunks[2]);
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Poll the background worker; on completion render its outcome and go idle.
    fn poll_worker(&mut self) {
        let received = match self.pending_worker.as_ref() {
            Some(worker) => worker.try_recv(),
            None => return,
        };

        match received {
            Ok(outcome) => self.finish(outcome),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.finish(PredictionOutcome::Failure(PredictionFailure::Prediction(
                    PredictionError::Failed("prediction worker stopped unexpectedly".into()),
                )));
            }
        }
    }

    fn finish(&mut self, outcome: PredictionOutcome) {
        tracing::debug!(success = outcome.is_success(), "Prediction finished");
        self.last_outcome = Some(outcome);
        self.pending_worker = None;
        self.phase = FormPhase::Idle;
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::F(1) => {
                self.tab = Tab::Prediction;
                return;
            }
            KeyCode::F(2) => {
                self.tab = Tab::FeatureExplanation;
                return;
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        if self.tab == Tab::Prediction {
            self.handle_form_key(key);
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::BackTab => self.form_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_state.next_field(),
            KeyCode::Left => self.form_state.step(-1.0),
            KeyCode::Right => self.form_state.step(1.0),
            KeyCode::Char('r') | KeyCode::Char('R') => self.form_state.reset(),
            KeyCode::Char(c) => self.form_state.input_char(c),
            KeyCode::Backspace => self.form_state.delete_char(),
            KeyCode::Delete => self.form_state.clear_field(),
            KeyCode::Enter => self.submit_prediction(),
            _ => {}
        }
    }

    /// Start a Predict action unless one is already running.
    fn submit_prediction(&mut self) {
        if self.phase == FormPhase::Processing {
            return;
        }

        let inputs = self.form_state.inputs();
        tracing::debug!("Predict requested");

        self.phase = FormPhase::Processing;
        self.pending_worker = Some(PredictionWorker::spawn(self.service.clone(), inputs));
    }
}

/// Send panic reports to the log instead of stderr, which would draw over
/// the alternate screen. A panic on the main thread restores the terminal
/// before printing.
fn install_panic_logging() {
    std::panic::set_hook(Box::new(|info| {
        let on_main = std::thread::current().name() == Some("main");
        let message = panic_message(info.payload());
        match info.location() {
            Some(location) => tracing::error!(%location, on_main, "Panic: {message}"),
            None => tracing::error!(on_main, "Panic: {message}"),
        }

        if on_main {
            let _ = disable_raw_mode();
            let mut stdout = io::stdout();
            let _ = execute!(stdout, LeaveAlternateScreen);
            eprintln!("{info}");
        }
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
