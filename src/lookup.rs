//! Runs lookups off the caller's task and delivers the outcome over a channel.
//!
//! Every submission gets its own tokio task. Submitting while a lookup is
//! still running supersedes it: the old task is aborted, and if it already
//! managed to send its outcome, [`LookupWorker::accept`] drops that event.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::translation::{LookupError, TranslationClient, TranslationResult, extract};

/// Sends `text` to the model and extracts the result.
pub async fn lookup(
    client: &TranslationClient,
    text: &str,
) -> Result<TranslationResult, LookupError> {
    let raw = client.translate(text).await?;
    Ok(extract(&raw)?)
}

/// Outcome of one submitted lookup.
#[derive(Debug)]
pub struct LookupEvent {
    pub id: u64,
    pub text: String,
    pub outcome: Result<TranslationResult, LookupError>,
}

pub struct LookupWorker {
    client: Arc<TranslationClient>,
    events: mpsc::UnboundedSender<LookupEvent>,
    in_flight: Option<(u64, AbortHandle)>,
    next_id: u64,
}

impl LookupWorker {
    pub fn new(client: TranslationClient) -> (Self, mpsc::UnboundedReceiver<LookupEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let worker = Self {
            client: Arc::new(client),
            events,
            in_flight: None,
            next_id: 1,
        };
        (worker, receiver)
    }

    pub fn client(&self) -> &TranslationClient {
        &self.client
    }

    /// Replaces the client after a config change. A running lookup still
    /// uses the old settings, so it is cancelled.
    pub fn set_client(&mut self, client: TranslationClient) {
        self.cancel();
        self.client = Arc::new(client);
    }

    /// Starts a lookup for `text` and returns its id.
    pub fn submit(&mut self, text: String) -> u64 {
        if self.cancel() {
            tracing::debug!("superseding in-flight lookup");
        }

        let id = self.next_id;
        self.next_id += 1;

        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            let outcome = lookup(&client, &text).await;
            // The receiver is gone when the host shut down; nothing to report to.
            let _ = events.send(LookupEvent { id, text, outcome });
        });

        tracing::debug!(id, "lookup started");
        self.in_flight = Some((id, handle.abort_handle()));
        id
    }

    /// Aborts the running lookup, if any. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        self.in_flight.take().is_some_and(|(id, handle)| {
            handle.abort();
            tracing::debug!(id, "lookup cancelled");
            true
        })
    }

    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_current(&self, id: u64) -> bool {
        self.in_flight.as_ref().is_some_and(|(current, _)| *current == id)
    }

    /// Filters events: returns the event only if it belongs to the lookup
    /// that is currently in flight, and marks the worker idle.
    pub fn accept(&mut self, event: LookupEvent) -> Option<LookupEvent> {
        if self.is_current(event.id) {
            self.in_flight = None;
            Some(event)
        } else {
            tracing::debug!(id = event.id, "dropping stale lookup result");
            None
        }
    }
}
