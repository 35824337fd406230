//! Background worker for the Predict action.
//!
//! Runs build-and-predict off the UI thread so the main loop keeps drawing
//! the processing indicator. The form allows one worker at a time.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::PredictionService;
use crate::domain::{FormInputs, PredictionOutcome};
use crate::ports::{Classifier, Preprocessor};

/// Handle to a running prediction worker.
pub struct PredictionWorkerHandle {
    outcome_rx: Receiver<PredictionOutcome>,
    _handle: JoinHandle<()>,
}

impl PredictionWorkerHandle {
    /// Try to receive the finished outcome (non-blocking).
    ///
    /// # Errors
    /// `TryRecvError::Empty` while the request is still running,
    /// `TryRecvError::Disconnected` when the worker exited without reporting.
    pub fn try_recv(&self) -> Result<PredictionOutcome, TryRecvError> {
        self.outcome_rx.try_recv()
    }
}

/// Spawns prediction work on a background thread.
pub struct PredictionWorker;

impl PredictionWorker {
    /// Spawn a background build-and-predict for `inputs`.
    pub fn spawn<P, C>(
        service: Arc<PredictionService<P, C>>,
        inputs: FormInputs,
    ) -> PredictionWorkerHandle
    where
        P: Preprocessor + 'static,
        C: Classifier + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run_and_report(&service, &inputs, &tx);
        });

        PredictionWorkerHandle {
            outcome_rx: rx,
            _handle: handle,
        }
    }

    fn run_and_report<P, C>(
        service: &PredictionService<P, C>,
        inputs: &FormInputs,
        tx: &Sender<PredictionOutcome>,
    ) where
        P: Preprocessor,
        C: Classifier,
    {
        let outcome = service.build_and_predict(inputs);
        let _ = tx.send(outcome);
    }
}
