// src/watch/mod.rs

//! Filesystem change notifications for the watched input directory.
//!
//! Turns OS-level create/modify events into [`RuntimeEvent::FileChanged`]
//! notifications carrying the changed base filename. Decoding of native
//! watcher records stays entirely inside `notify`; the engine only ever
//! sees the channel of filenames.
//!
//! [`RuntimeEvent::FileChanged`]: crate::engine::RuntimeEvent::FileChanged

pub mod watcher;

pub use watcher::{spawn_watcher, WatcherHandle};
