//! Background quote fetching.
//!
//! Fetching may block (file reads, or a slow provider behind a snapshot file), so it
//! runs on its own thread. The UI thread sends `FetchRequest`s over a
//! `crossbeam_channel` and polls for `FetchOutcome`s between key presses; the screen
//! therefore stays responsive while a refresh is in flight.
//!
//! Requests that pile up while a fetch is running are coalesced: only the most recent
//! watchlist is fetched.
use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use log::{debug, error, info, warn};
use std::thread::{self, JoinHandle};

use stockgrid_common::instrument::Instrument;
use stockgrid_common::snapshot::Snapshot;
use stockgrid_common::{Result, ViewerError};

use crate::source::QuoteSource;

/// Message sent to the fetch thread.
pub enum FetchRequest {
    /// Fetch quotes for these instruments.
    Refresh(Vec<Instrument>),
    /// Stop the thread.
    Shutdown,
}

/// Result of one fetch.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Fetched data; empty when the fetch failed.
    pub snapshot: Snapshot,
    /// Failure description, if the source reported one.
    pub error: Option<String>,
    /// Local time the fetch completed.
    pub fetched_at: DateTime<Local>,
}

/// Handle to the fetch thread.
pub struct Fetcher {
    request_tx: Sender<FetchRequest>,
    outcome_rx: Receiver<FetchOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl Fetcher {
    /// Spawns the fetch thread around `source`.
    pub fn spawn(source: Box<dyn QuoteSource>) -> Self {
        let (request_tx, request_rx) = unbounded::<FetchRequest>();
        let (outcome_tx, outcome_rx) = unbounded::<FetchOutcome>();
        info!("Fetching from {}", source.name());

        let handle = thread::spawn(move || run_fetch_loop(source, request_rx, outcome_tx));

        Fetcher {
            request_tx,
            outcome_rx,
            handle: Some(handle),
        }
    }

    /// Queues a refresh for `instruments`.
    pub fn request(&self, instruments: &[Instrument]) -> Result<()> {
        self.request_tx
            .send(FetchRequest::Refresh(instruments.to_vec()))
            .map_err(|e| ViewerError::ChannelSend(e.to_string()))
    }

    /// Returns a finished fetch, if one is ready.
    pub fn try_outcome(&self) -> Result<Option<FetchOutcome>> {
        match self.outcome_rx.try_recv() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ViewerError::ChannelRecv(String::from(
                "fetch thread stopped",
            ))),
        }
    }

    /// Blocks until the next fetch finishes.
    pub fn wait_outcome(&self) -> Result<FetchOutcome> {
        self.outcome_rx
            .recv()
            .map_err(|e| ViewerError::ChannelRecv(e.to_string()))
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        let _ = self.request_tx.send(FetchRequest::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Fetch thread panicked");
            }
        }
    }
}

fn run_fetch_loop(
    mut source: Box<dyn QuoteSource>,
    request_rx: Receiver<FetchRequest>,
    outcome_tx: Sender<FetchOutcome>,
) {
    while let Ok(request) = request_rx.recv() {
        let mut latest = match request {
            FetchRequest::Refresh(instruments) => instruments,
            FetchRequest::Shutdown => break,
        };
        let mut shutdown = false;
        for pending in request_rx.try_iter() {
            match pending {
                FetchRequest::Refresh(instruments) => latest = instruments,
                FetchRequest::Shutdown => shutdown = true,
            }
        }
        if shutdown {
            break;
        }

        debug!("Fetching {} instruments", latest.len());
        let outcome = match source.fetch(&latest) {
            Ok(snapshot) => FetchOutcome {
                snapshot,
                error: None,
                fetched_at: Local::now(),
            },
            Err(e) => {
                warn!("Fetch from {} failed: {}", source.name(), e);
                FetchOutcome {
                    snapshot: Snapshot::new(),
                    error: Some(e.to_string()),
                    fetched_at: Local::now(),
                }
            }
        };
        if outcome_tx.send(outcome).is_err() {
            break;
        }
    }
    debug!("Fetch thread stopping...");
}
