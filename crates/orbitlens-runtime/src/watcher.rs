//! Landmark watcher for sites that re-render without a navigation event.

use std::sync::Arc;
use std::time::Duration;

use orbitlens_dom::{MutationObserver, MutationRecord, NodeId, Selector};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::content_script::ContentScript;
use crate::error::WatchError;

/// Waits for a landmark element, then re-runs orchestration whenever the
/// landmark's subtree changes.
pub struct LandmarkWatcher {
    script: Arc<ContentScript>,
    selector: Selector,
    timeout: Duration,
}

impl LandmarkWatcher {
    pub fn new(
        script: Arc<ContentScript>,
        selector: &str,
        timeout: Duration,
    ) -> Result<Self, WatchError> {
        Ok(Self {
            script,
            selector: Selector::parse(selector)?,
            timeout,
        })
    }

    /// Spawn the watch on the current tokio runtime.
    pub fn start(self) -> WatchHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn({
            let cancel = cancel.clone();
            async move { self.run(cancel).await }
        });
        WatchHandle { cancel, task }
    }

    /// Watch until cancelled. A landmark that never appears ends the watch
    /// with [`WatchError::LandmarkTimeout`] and leaves the page untouched.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), WatchError> {
        let mut observer = self.script.document().observe();

        let found = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            found = self.wait_for_landmark(&mut observer) => found,
        };
        let mut landmark = match found {
            Ok(landmark) => landmark,
            Err(e) => {
                warn!(error = %e, "Landmark watcher inactive");
                return Err(e);
            }
        };

        info!(selector = %self.selector, "Landmark found");
        self.script.run_pass();

        loop {
            let batch = tokio::select! {
                _ = cancel.cancelled() => break,
                batch = observer.next_batch() => batch,
            };
            let Some(batch) = batch else {
                return Err(WatchError::ObserverClosed);
            };

            if let Some(current) = self.landmark_changed(landmark, &batch) {
                landmark = current;
                debug!(landmark = %landmark, records = batch.len(), "Landmark changed");
                self.script.run_pass();
            }
        }

        debug!(selector = %self.selector, "Landmark watcher stopped");
        Ok(())
    }

    /// Resolve the landmark, waiting at most the configured timeout.
    pub async fn wait_for_landmark(
        &self,
        observer: &mut MutationObserver,
    ) -> Result<NodeId, WatchError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(landmark) = self.find_landmark() {
                return Ok(landmark);
            }
            match tokio::time::timeout_at(deadline, observer.next_batch()).await {
                Ok(Some(_)) => continue,
                Ok(None) => return Err(WatchError::ObserverClosed),
                Err(_) => {
                    return Err(WatchError::LandmarkTimeout {
                        selector: self.selector.to_string(),
                        timeout_ms: self.timeout.as_millis() as u64,
                    });
                }
            }
        }
    }

    fn find_landmark(&self) -> Option<NodeId> {
        self.script
            .document()
            .read(|doc| doc.select_first(doc.document_element(), &self.selector))
    }

    /// The landmark to track from now on if `batch` changed it: either a
    /// record inside its subtree, or the landmark itself was swapped out.
    fn landmark_changed(&self, landmark: NodeId, batch: &[MutationRecord]) -> Option<NodeId> {
        self.script.document().read(|doc| {
            if doc.is_connected(landmark) {
                batch
                    .iter()
                    .any(|record| doc.contains(landmark, record.target))
                    .then_some(landmark)
            } else {
                doc.select_first(doc.document_element(), &self.selector)
            }
        })
    }
}

/// Handle to a spawned [`LandmarkWatcher`].
pub struct WatchHandle {
    cancel: CancellationToken,
    task: JoinHandle<Result<(), WatchError>>,
}

impl WatchHandle {
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the watch to end. A panicked or aborted task counts as a
    /// closed observer.
    pub async fn join(self) -> Result<(), WatchError> {
        self.task.await.unwrap_or(Err(WatchError::ObserverClosed))
    }

    /// Stop and wait.
    pub async fn shutdown(self) -> Result<(), WatchError> {
        self.stop();
        self.join().await
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
