// src/manifest.rs

//! The persisted original-name -> fingerprinted-name mapping.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::fs::FileSystem;

/// Mapping from original filename to fingerprinted filename.
///
/// A `BTreeMap` keeps the persisted JSON in stable key order, so manifests
/// diff cleanly between runs.
pub type Manifest = BTreeMap<String, String>;

/// Loads and persists the manifest as a flat JSON object.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl ManifestStore {
    pub fn new(path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the manifest from disk.
    ///
    /// An absent, empty, or unparseable file yields an empty manifest;
    /// corrupt state is treated as "no prior state", never as an error.
    pub fn load(&self) -> Manifest {
        let contents = match self.fs.read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                debug!(path = ?self.path, error = %err, "no readable manifest; starting empty");
                return Manifest::new();
            }
        };

        if contents.trim().is_empty() {
            return Manifest::new();
        }

        match serde_json::from_str(&contents) {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!(path = ?self.path, error = %err, "malformed manifest; starting empty");
                Manifest::new()
            }
        }
    }

    /// Write the manifest as indented JSON.
    ///
    /// Writes a `.tmp` sibling first and renames it over the target, so a
    /// concurrent reader never observes a half-written file.
    pub fn save(&self, manifest: &Manifest) -> Result<()> {
        let json = serde_json::to_string_pretty(manifest).context("serializing manifest")?;
        let tmp = tmp_path(&self.path);
        self.fs
            .write(&tmp, json.as_bytes())
            .with_context(|| format!("writing manifest temp file {:?}", tmp))?;
        self.fs
            .rename(&tmp, &self.path)
            .with_context(|| format!("replacing manifest at {:?}", self.path))?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
