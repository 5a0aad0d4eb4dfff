// src/engine/reconciler.rs

//! Per-pass reconciliation of candidate files against the manifest.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::engine::CandidateFilter;
use crate::errors::{HashstampError, Result};
use crate::fingerprint::{compute_file_hash, fingerprinted_name};
use crate::fs::FileSystem;
use crate::manifest::{Manifest, ManifestStore};

/// A file under consideration in the current pass.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Base filename, no directory component.
    pub name: String,
    /// Path used for I/O.
    pub path: PathBuf,
}

/// Counts of what one pass did, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Files hashed, copied, and recorded in the manifest.
    pub copied: usize,
    /// Files whose manifest entry already matched their content.
    pub skipped: usize,
    /// Files that failed to hash or copy, left for a later pass.
    pub failed: usize,
}

/// Decides, per pass, which files need rehashing, recopying and manifest
/// updates.
///
/// The manifest is freshly loaded at the start of every pass (never cached
/// across passes, so external edits to the manifest file are picked up) and
/// persisted exactly once at the end, unconditionally. Re-running a pass
/// over an unchanged tree is a no-op apart from that re-save.
///
/// Manifest entries are only ever added or overwritten: a source file that
/// disappears keeps its stale entry, and superseded fingerprinted copies in
/// the output directory are not deleted.
#[derive(Debug)]
pub struct Reconciler {
    input_dir: PathBuf,
    output_dir: PathBuf,
    store: ManifestStore,
    filter: CandidateFilter,
    fs: Arc<dyn FileSystem>,
}

impl Reconciler {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        store: ManifestStore,
        filter: CandidateFilter,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            store,
            filter,
            fs,
        }
    }

    /// Run one pass over every file currently in the input directory.
    ///
    /// Failing to list the input directory at all is fatal. Per-file hash
    /// and copy failures are logged and skipped, so one bad file never
    /// blocks the rest of the pass.
    pub fn run_batch(&self) -> Result<PassStats> {
        let entries =
            self.fs
                .read_dir(&self.input_dir)
                .map_err(|cause| HashstampError::Enumeration {
                    path: self.input_dir.clone(),
                    cause,
                })?;
        info!(count = entries.len(), dir = ?self.input_dir, "enumerated input directory");

        let mut candidates = Vec::new();
        for path in entries {
            if !self.fs.is_file(&path) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                warn!(?path, "skipping entry with non-UTF-8 name");
                continue;
            };
            if !self.eligible(&path, name) {
                continue;
            }
            candidates.push(Candidate {
                name: name.to_string(),
                path: path.clone(),
            });
        }

        Ok(self.run_pass(&candidates))
    }

    /// Run one pass for a single change notification.
    ///
    /// The changed entry is re-statted first; notifications for entries
    /// that vanished in the meantime, or that are directories, are
    /// discarded. Duplicate or coalesced notifications are harmless: an
    /// unchanged file hits the skip rule and nothing is copied.
    pub fn run_for_change(&self, name: &str) -> PassStats {
        let path = self.input_dir.join(name);
        if !self.fs.is_file(&path) {
            debug!(name, "changed entry is gone or not a file; ignoring");
            return PassStats::default();
        }
        if !self.eligible(&path, name) {
            return PassStats::default();
        }
        let candidate = Candidate {
            name: name.to_string(),
            path,
        };
        self.run_pass(std::slice::from_ref(&candidate))
    }

    fn eligible(&self, path: &Path, name: &str) -> bool {
        // A manifest kept inside the input directory is pipeline state,
        // not an asset.
        if path == self.store.path() {
            return false;
        }
        if !self.filter.matches(name) {
            debug!(name, "filtered out by include/exclude patterns");
            return false;
        }
        true
    }

    /// Reconcile the given candidates against a freshly loaded manifest,
    /// then persist the full manifest exactly once.
    fn run_pass(&self, candidates: &[Candidate]) -> PassStats {
        let mut manifest = self.store.load();
        let mut stats = PassStats::default();

        for candidate in candidates {
            self.process(candidate, &mut manifest, &mut stats);
        }

        if let Err(err) = self.store.save(&manifest) {
            // Next pass re-derives from whatever is on disk.
            warn!(error = %err, "failed to persist manifest");
        }

        stats
    }

    fn process(&self, candidate: &Candidate, manifest: &mut Manifest, stats: &mut PassStats) {
        let digest = match compute_file_hash(self.fs.as_ref(), &candidate.path) {
            Ok(digest) => digest,
            Err(err) => {
                warn!(file = %candidate.name, error = %err, "failed to hash; skipping");
                stats.failed += 1;
                return;
            }
        };

        let stamped = fingerprinted_name(&candidate.name, &digest);

        if manifest.get(&candidate.name) == Some(&stamped) {
            debug!(file = %candidate.name, "content unchanged; nothing to do");
            stats.skipped += 1;
            return;
        }

        // Copy first, record second: the manifest never points at a
        // fingerprinted file the copy did not produce.
        let destination = self.output_dir.join(&stamped);
        if let Err(err) = self.fs.copy_durable(&candidate.path, &destination) {
            warn!(file = %candidate.name, error = %err, "failed to copy; manifest left unchanged");
            stats.failed += 1;
            return;
        }

        manifest.insert(candidate.name.clone(), stamped.clone());
        info!(file = %candidate.name, stamped = %stamped, "copied");
        stats.copied += 1;
    }
}
