//! TUI module: Terminal User Interface using Ratatui.
//!
//! Two pages:
//! - Prediction form with result panel
//! - Feature explanation

mod app;
mod styles;
mod ui;
mod worker;

pub use app::{App, FormPhase, Tab};
pub use styles::MedicalTheme;
pub use worker::{PredictionWorker, PredictionWorkerHandle};
