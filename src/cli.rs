// src/cli.rs

//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Content-fingerprinting asset pipeline.
///
/// Scans an input directory, copies every file into an output directory
/// under a name with the content hash embedded, and records the original
/// name -> fingerprinted name mapping in a JSON manifest. With `--watch`,
/// keeps running and reprocesses files as they are created or modified.
#[derive(Debug, Clone, Parser)]
#[command(name = "hashstamp", version, about)]
pub struct CliArgs {
    /// Directory containing the source assets.
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Path of the JSON manifest to read and write.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Directory to write fingerprinted copies into.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Keep running and reprocess files as they change.
    #[arg(long)]
    pub watch: bool,

    /// Only process filenames matching at least one of these globs.
    #[arg(long, value_name = "GLOB")]
    pub include: Vec<String>,

    /// Skip filenames matching any of these globs.
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Optional TOML config file; CLI flags take precedence over it.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the resolved configuration and exit without touching any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Log verbosity (overrides the HASHSTAMP_LOG environment variable).
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
