#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use hashstamp::engine::{CandidateFilter, Reconciler};
use hashstamp::fs::{FileSystem, RealFileSystem};
use hashstamp::manifest::ManifestStore;

/// Builder for an on-disk pipeline fixture: an input directory, an output
/// directory and a manifest path inside one temporary root.
pub struct AssetDirBuilder {
    files: Vec<(String, Vec<u8>)>,
    subdirs: Vec<String>,
    manifest_json: Option<String>,
}

impl AssetDirBuilder {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            subdirs: Vec::new(),
            manifest_json: None,
        }
    }

    /// Seed a file in the input directory.
    pub fn with_file(mut self, name: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.push((name.to_string(), content.into()));
        self
    }

    /// Seed a subdirectory in the input directory.
    pub fn with_subdir(mut self, name: &str) -> Self {
        self.subdirs.push(name.to_string());
        self
    }

    /// Seed the manifest file with raw (possibly invalid) JSON.
    pub fn with_manifest_json(mut self, raw: &str) -> Self {
        self.manifest_json = Some(raw.to_string());
        self
    }

    pub fn build(self) -> AssetDir {
        let root = tempfile::tempdir().expect("creating temp dir");
        let input_dir = root.path().join("input");
        let output_dir = root.path().join("output");
        let manifest_path = root.path().join("manifest.json");

        fs::create_dir_all(&input_dir).expect("creating input dir");
        fs::create_dir_all(&output_dir).expect("creating output dir");
        for name in &self.subdirs {
            fs::create_dir_all(input_dir.join(name)).expect("creating subdir");
        }
        for (name, content) in &self.files {
            fs::write(input_dir.join(name), content).expect("seeding input file");
        }
        if let Some(raw) = &self.manifest_json {
            fs::write(&manifest_path, raw).expect("seeding manifest");
        }

        AssetDir {
            _root: root,
            input_dir,
            output_dir,
            manifest_path,
        }
    }
}

impl Default for AssetDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk pipeline fixture. Dropping it removes the temporary root.
pub struct AssetDir {
    _root: TempDir,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub manifest_path: PathBuf,
}

impl AssetDir {
    /// Write (or overwrite) a file in the input directory.
    pub fn write_input(&self, name: &str, content: impl AsRef<[u8]>) {
        fs::write(self.input_dir.join(name), content).expect("writing input file");
    }

    /// Delete a file from the input directory.
    pub fn remove_input(&self, name: &str) {
        fs::remove_file(self.input_dir.join(name)).expect("removing input file");
    }

    /// Sorted base names of the files currently in the output directory.
    pub fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.output_dir)
            .expect("reading output dir")
            .filter_map(|entry| {
                let entry = entry.expect("reading output entry");
                entry
                    .file_type()
                    .ok()
                    .filter(|t| t.is_file())
                    .and_then(|_| entry.file_name().into_string().ok())
            })
            .collect();
        names.sort();
        names
    }

    /// Parse the manifest file; an absent manifest reads as `{}`.
    pub fn manifest(&self) -> serde_json::Value {
        match fs::read_to_string(&self.manifest_path) {
            Ok(raw) => serde_json::from_str(&raw).expect("parsing manifest JSON"),
            Err(_) => serde_json::json!({}),
        }
    }

    /// Raw manifest file contents.
    pub fn manifest_text(&self) -> String {
        fs::read_to_string(&self.manifest_path).expect("reading manifest file")
    }

    /// A reconciler over this fixture with the real filesystem and no
    /// filename filters.
    pub fn reconciler(&self) -> Reconciler {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let store = ManifestStore::new(self.manifest_path.clone(), Arc::clone(&fs));
        Reconciler::new(
            self.input_dir.clone(),
            self.output_dir.clone(),
            store,
            CandidateFilter::default(),
            fs,
        )
    }
}
