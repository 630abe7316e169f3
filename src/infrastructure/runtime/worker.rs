//! Async worker - runs in Tokio runtime and performs API requests
//!
//! Each request is spawned as an independent task. Requests are never
//! serialized or cancelled, so when two requests target the same panel the
//! one that resolves last is the one the TUI ends up showing.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::domain::backoffice::{FetchOutcome, FetchRequest, Ticket};
use crate::infrastructure::backoffice::BackofficeApi;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

const COMMAND_POLL: Duration = Duration::from_millis(10);

/// Run the async worker loop until shutdown or until the TUI side hangs up
pub async fn run_async_worker(
    api: Arc<dyn BackofficeApi>,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    info!("worker started");

    loop {
        loop {
            match cmd_rx.try_recv() {
                Ok(RuntimeCommand::Shutdown) => {
                    info!("worker shutting down");
                    return Ok(());
                }
                Ok(RuntimeCommand::Fetch { ticket, request }) => {
                    spawn_fetch(Arc::clone(&api), ticket, request, evt_tx.clone());
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("command channel closed, worker stopping");
                    return Ok(());
                }
            }
        }

        tokio::time::sleep(COMMAND_POLL).await;
    }
}

fn spawn_fetch(
    api: Arc<dyn BackofficeApi>,
    ticket: Ticket,
    request: FetchRequest,
    evt_tx: Sender<RuntimeEvent>,
) {
    tokio::spawn(async move {
        let label = request.label();
        let started = Instant::now();
        let outcome = perform(api.as_ref(), request).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if outcome.is_ok() {
            debug!(ticket, request = label, elapsed_ms, "fetch finished");
        } else {
            warn!(ticket, request = label, elapsed_ms, "fetch failed");
        }

        if evt_tx
            .send(RuntimeEvent::Fetched { ticket, outcome })
            .is_err()
        {
            debug!(ticket, "event channel closed, dropping outcome");
        }
    });
}

/// Execute one request against the API
pub async fn perform(api: &dyn BackofficeApi, request: FetchRequest) -> FetchOutcome {
    match request {
        FetchRequest::Summary => FetchOutcome::Summary(api.daily_summary().await),
        FetchRequest::Lead(lead_id) => {
            let result = api.lead_detail(&lead_id).await;
            FetchOutcome::Lead { lead_id, result }
        }
        FetchRequest::FlaggedEvents => FetchOutcome::FlaggedEvents(api.spam_activities().await),
        FetchRequest::FlaggedSubjects => {
            FetchOutcome::FlaggedSubjects(api.spam_users().await)
        }
    }
}
