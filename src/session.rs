use std::sync::mpsc;
use std::thread;

use tracing::debug;

use crate::entry::ScanResult;
use crate::error::ScanError;
use crate::scanner::{self, ScanOptions};

pub type ScanOutcome = Result<ScanResult, ScanError>;

/// Runs scans on a background thread and hands back only the newest one.
///
/// Each [`start`](ScanSession::start) opens a fresh channel and drops the
/// previous receiver, so a superseded scan keeps running but its result
/// has nowhere to go.
#[derive(Default)]
pub struct ScanSession {
    receiver: Option<mpsc::Receiver<ScanOutcome>>,
    generation: u64,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin scanning `root_input`. Returns the scan's generation number.
    pub fn start(&mut self, root_input: String, options: ScanOptions) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        if self.receiver.is_some() {
            debug!(generation, "superseding scan still in flight");
        }

        let (tx, rx) = mpsc::channel::<ScanOutcome>();
        self.receiver = Some(rx);

        thread::spawn(move || {
            let outcome = scanner::scan_with(&root_input, &options);
            if tx.send(outcome).is_err() {
                debug!(generation, "discarding result of superseded scan");
            }
        });
        generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while the newest scan has not reported back.
    pub fn is_scanning(&self) -> bool {
        self.receiver.is_some()
    }

    /// Non-blocking check for the newest scan's result.
    pub fn poll(&mut self) -> Option<ScanOutcome> {
        let rx = self.receiver.as_ref()?;
        match rx.try_recv() {
            Ok(outcome) => {
                self.receiver = None;
                Some(outcome)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                // worker died without sending
                self.receiver = None;
                None
            }
        }
    }

    /// Block until the newest scan finishes. `None` if nothing is running
    /// or the worker died.
    pub fn wait(&mut self) -> Option<ScanOutcome> {
        let rx = self.receiver.take()?;
        rx.recv().ok()
    }
}
