//! Shared live document with mutation broadcast.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use url::Url;

use crate::{Document, MutationRecord};

const OBSERVER_CAPACITY: usize = 256;

/// A document shared between the orchestrator, widgets and watchers.
///
/// Access goes through short closures so no lock is ever held across an
/// `.await`. Records produced inside [`LiveDocument::mutate`] are broadcast
/// as one batch once the closure returns.
#[derive(Clone)]
pub struct LiveDocument {
    inner: Arc<LiveInner>,
}

struct LiveInner {
    doc: RwLock<Document>,
    tx: broadcast::Sender<Arc<[MutationRecord]>>,
}

impl LiveDocument {
    pub fn new(doc: Document) -> Self {
        let (tx, _) = broadcast::channel(OBSERVER_CAPACITY);
        Self {
            inner: Arc::new(LiveInner {
                doc: RwLock::new(doc),
                tx,
            }),
        }
    }

    /// Run `f` with shared access.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.inner.doc.read())
    }

    /// Run `f` with exclusive access, then notify observers.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let (result, records) = {
            let mut doc = self.inner.doc.write();
            let result = f(&mut doc);
            (result, doc.take_records())
        };

        if !records.is_empty() {
            debug!(count = records.len(), "Broadcasting mutation records");
            if self.inner.tx.send(records.into()).is_err() {
                debug!("No mutation observers subscribed");
            }
        }
        result
    }

    /// Client-side navigation (pushState / hash change). The tree is untouched.
    pub fn navigate(&self, location: Url) {
        self.inner.doc.write().set_location(location);
    }

    /// Subscribe to mutation batches made after this call.
    pub fn observe(&self) -> MutationObserver {
        MutationObserver {
            rx: self.inner.tx.subscribe(),
        }
    }

    /// Clone the current document state.
    pub fn snapshot(&self) -> Document {
        self.inner.doc.read().clone()
    }
}

/// Receives mutation batches from a [`LiveDocument`].
pub struct MutationObserver {
    rx: broadcast::Receiver<Arc<[MutationRecord]>>,
}

impl MutationObserver {
    /// Wait for the next batch. `None` once every document handle is gone.
    pub async fn next_batch(&mut self) -> Option<Arc<[MutationRecord]>> {
        loop {
            match self.rx.recv().await {
                Ok(batch) => return Some(batch),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Mutation observer lagged, batches dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
