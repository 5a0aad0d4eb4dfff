// src/watch/watcher.rs

use std::path::PathBuf;

use anyhow::Result;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::RuntimeEvent;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive
/// for as long as needed. Dropping this handle removes the OS watch and
/// ends the forwarding task.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher on the input directory (non-recursive) and
/// forward create/modify events as [`RuntimeEvent::FileChanged`], one per
/// affected path, carrying the base filename.
///
/// Events are forwarded in the order the OS reports them. Bursts of rapid
/// changes to the same file may coalesce or duplicate depending on the
/// platform backend; the reconciliation engine treats both as no-ops.
pub fn spawn_watcher(
    input_dir: impl Into<PathBuf>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let dir = input_dir.into();
    // Canonicalize once so we watch a stable path.
    let dir = dir.canonicalize().unwrap_or_else(|_| dir.clone());

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    // Closure called synchronously by notify whenever an event arrives.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // We can't log via tracing here easily, so fallback to stderr.
                    eprintln!("hashstamp: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("hashstamp: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;

    info!("file watcher started on {:?}", dir);

    // Async task that consumes notify events and forwards change
    // notifications to the runtime.
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                continue;
            }
            debug!(?event, "received notify event");
            for path in event.paths {
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                let changed = RuntimeEvent::FileChanged {
                    name: name.to_string(),
                };
                if runtime_tx.send(changed).await.is_err() {
                    // Runtime is gone; no point keeping the loop alive.
                    return;
                }
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}
