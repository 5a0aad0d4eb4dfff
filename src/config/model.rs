// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::cli::CliArgs;
use crate::config::loader;
use crate::errors::{HashstampError, Result};

/// Raw parameters as they appear in an optional TOML config file.
///
/// ```toml
/// input_dir = "assets"
/// output_dir = "dist"
/// manifest = "dist/manifest.json"
/// watch = true
/// include = ["*.css", "*.js"]
/// exclude = ["*.map"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub watch: Option<bool>,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Fully resolved pipeline parameters.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub manifest: PathBuf,
    pub watch: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Merge CLI flags over the (optional) config file and check that every
/// required parameter ended up present.
///
/// - Paths given as flags win over the config file.
/// - `--watch` can only turn watch mode on; `watch = true` in the file can
///   be left in place for setups that always watch.
/// - A non-empty `--include`/`--exclude` list replaces the file's list.
pub fn resolve(args: &CliArgs) -> Result<PipelineConfig> {
    let file = match &args.config {
        Some(path) => loader::load_from_path(path)?,
        None => RawConfigFile::default(),
    };

    let input_dir = args
        .input_dir
        .clone()
        .or(file.input_dir)
        .ok_or_else(|| missing("--input-dir"))?;
    let output_dir = args
        .output_dir
        .clone()
        .or(file.output_dir)
        .ok_or_else(|| missing("--output-dir"))?;
    let manifest = args
        .manifest
        .clone()
        .or(file.manifest)
        .ok_or_else(|| missing("--manifest"))?;

    let watch = args.watch || file.watch.unwrap_or(false);

    let include = if args.include.is_empty() {
        file.include
    } else {
        args.include.clone()
    };
    let exclude = if args.exclude.is_empty() {
        file.exclude
    } else {
        args.exclude.clone()
    };

    Ok(PipelineConfig {
        input_dir,
        output_dir,
        manifest,
        watch,
        include,
        exclude,
    })
}

fn missing(flag: &str) -> HashstampError {
    HashstampError::Config(format!(
        "missing required parameter {flag} (pass the flag or set it in the config file)"
    ))
}
