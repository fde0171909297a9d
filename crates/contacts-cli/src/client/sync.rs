//! Keeping the list in step with the service
//!
//! Controllers publish a `MutationEvent` after every successful create,
//! update or delete. The `SyncLoop` fetches the full list once at start and
//! again after each event, and publishes the result as a snapshot on a
//! watch channel. A failed fetch is logged and the previous snapshot kept.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use contacts_core::{Contact, ContactApi};

const BUS_CAPACITY: usize = 64;

/// A change the service has accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationEvent {
    Created(Contact),
    Updated(Contact),
    Deleted(Uuid),
}

/// Fan-out of mutation events to any number of listeners
#[derive(Debug, Clone)]
pub struct MutationBus {
    tx: broadcast::Sender<MutationEvent>,
}

impl Default for MutationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    pub fn publish(&self, event: MutationEvent) {
        if self.tx.send(event).is_err() {
            debug!("Mutation published with no listeners");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MutationEvent> {
        self.tx.subscribe()
    }
}

/// Refetches the contact list whenever a mutation is published
pub struct SyncLoop {
    api: Arc<dyn ContactApi>,
    mutations: broadcast::Receiver<MutationEvent>,
    snapshot: watch::Sender<Vec<Contact>>,
}

impl SyncLoop {
    /// Create a loop listening on `bus`, plus the receiver for its snapshots
    pub fn new(
        api: Arc<dyn ContactApi>,
        bus: &MutationBus,
    ) -> (Self, watch::Receiver<Vec<Contact>>) {
        let (snapshot, snapshot_rx) = watch::channel(Vec::new());
        let sync = Self {
            api,
            mutations: bus.subscribe(),
            snapshot,
        };
        (sync, snapshot_rx)
    }

    /// Fetch once and publish the result
    ///
    /// Returns false when the fetch failed and the snapshot was left as is.
    pub async fn refresh(&self) -> bool {
        match self.api.list().await {
            Ok(contacts) => {
                debug!("Fetched {} contacts", contacts.len());
                self.snapshot.send_replace(contacts);
                true
            }
            Err(e) => {
                warn!("Failed to fetch contacts: {}", e);
                false
            }
        }
    }

    /// Run until every bus handle or every snapshot receiver is gone
    pub async fn run(mut self) {
        self.refresh().await;

        loop {
            match self.mutations.recv().await {
                Ok(event) => debug!("Refreshing after {:?}", event),
                Err(RecvError::Lagged(missed)) => {
                    debug!("Refreshing after {} coalesced mutations", missed)
                }
                Err(RecvError::Closed) => break,
            }
            if self.snapshot.is_closed() {
                break;
            }
            self.refresh().await;
        }

        info!("Sync loop stopped");
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
