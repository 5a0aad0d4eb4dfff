// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fingerprint;
pub mod fs;
pub mod logging;
pub mod manifest;
pub mod watch;

use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::{resolve, PipelineConfig};
use crate::engine::{CandidateFilter, Reconciler, Runtime, RuntimeEvent};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::manifest::ManifestStore;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - parameter resolution (CLI flags + optional config file)
/// - the manifest store and reconciliation engine
/// - (in watch mode) the file watcher, runtime loop and Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve(&args)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let store = ManifestStore::new(cfg.manifest.clone(), Arc::clone(&fs));
    let filter = CandidateFilter::new(&cfg.include, &cfg.exclude)?;
    let reconciler = Arc::new(Reconciler::new(
        cfg.input_dir.clone(),
        cfg.output_dir.clone(),
        store,
        filter,
        fs,
    ));

    if !cfg.watch {
        let batch = Arc::clone(&reconciler);
        let stats = tokio::task::spawn_blocking(move || batch.run_batch())
            .await
            .map_err(|err| anyhow!("batch pass panicked: {err}"))??;
        info!(
            copied = stats.copied,
            skipped = stats.skipped,
            failed = stats.failed,
            "batch pass complete"
        );
        return Ok(());
    }

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    // Watch mode waits for the first notification; there is no initial
    // batch pass.
    let _watcher_handle = watch::spawn_watcher(cfg.input_dir.clone(), rt_tx.clone())?;

    // Ctrl-C -> graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    Runtime::new(reconciler, rt_rx).run().await
}

/// Simple dry-run output: print the resolved parameters.
fn print_dry_run(cfg: &PipelineConfig) {
    println!("hashstamp dry-run");
    println!("  input_dir  = {:?}", cfg.input_dir);
    println!("  output_dir = {:?}", cfg.output_dir);
    println!("  manifest   = {:?}", cfg.manifest);
    println!("  watch      = {}", cfg.watch);
    if !cfg.include.is_empty() {
        println!("  include    = {:?}", cfg.include);
    }
    if !cfg.exclude.is_empty() {
        println!("  exclude    = {:?}", cfg.exclude);
    }
}
