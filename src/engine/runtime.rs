// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;

use super::reconciler::Reconciler;
use super::RuntimeEvent;

/// Watch-mode event loop.
///
/// Consumes [`RuntimeEvent`]s from the watcher (and the Ctrl-C handler) and
/// runs one single-candidate reconciliation pass per change notification.
/// Passes run on a blocking thread, one at a time, so the event loop is
/// never blocked and passes never overlap.
pub struct Runtime {
    reconciler: Arc<Reconciler>,
    event_rx: mpsc::Receiver<RuntimeEvent>,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime").finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(reconciler: Arc<Reconciler>, event_rx: mpsc::Receiver<RuntimeEvent>) -> Self {
        Self {
            reconciler,
            event_rx,
        }
    }

    /// Main event loop.
    ///
    /// Suspends between events indefinitely; returns when shutdown is
    /// requested or every event sender is gone.
    pub async fn run(mut self) -> Result<()> {
        info!("hashstamp watch runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(event) => event,
                None => {
                    info!("event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            match event {
                RuntimeEvent::FileChanged { name } => {
                    let reconciler = Arc::clone(&self.reconciler);
                    match tokio::task::spawn_blocking(move || reconciler.run_for_change(&name))
                        .await
                    {
                        Ok(stats) => debug!(?stats, "pass finished"),
                        Err(err) => warn!(error = %err, "reconciliation pass panicked"),
                    }
                }
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested; stopping runtime");
                    break;
                }
            }
        }

        info!("runtime exiting");
        Ok(())
    }
}
