use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;

use hashstamp::engine::{Runtime, RuntimeEvent};
use hashstamp::watch::spawn_watcher;
use hashstamp_test_utils::builders::AssetDirBuilder;
use hashstamp_test_utils::init_tracing;

/// End-to-end watch mode with a real OS watcher: create, rewrite with
/// identical content, then change the content.
#[tokio::test]
async fn watch_copies_created_and_modified_files() {
    init_tracing();

    let assets = AssetDirBuilder::new().build();
    let reconciler = Arc::new(assets.reconciler());

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(32);
    let _watcher = spawn_watcher(assets.input_dir.clone(), tx.clone()).unwrap();
    let runtime = tokio::spawn(Runtime::new(reconciler, rx).run());

    // Give the OS watcher a brief moment to start.
    sleep(Duration::from_millis(200)).await;

    // A created file gets copied and recorded.
    assets.write_input("logo.svg", "<svg/>");
    sleep(Duration::from_millis(500)).await;

    let outputs = assets.output_files();
    assert_eq!(outputs.len(), 1);
    let first = outputs[0].clone();
    assert!(first.starts_with("logo."));
    assert!(first.ends_with(".svg"));
    assert_eq!(assets.manifest()["logo.svg"].as_str().unwrap(), first);

    // Identical rewrite: digest unchanged, no new output.
    assets.write_input("logo.svg", "<svg/>");
    sleep(Duration::from_millis(500)).await;
    assert_eq!(assets.output_files(), vec![first.clone()]);

    // Content change: a second fingerprinted file appears, the old one
    // is left in place, the manifest entry moves to the new name.
    assets.write_input("logo.svg", "<svg></svg>");
    sleep(Duration::from_millis(500)).await;
    let outputs = assets.output_files();
    assert_eq!(outputs.len(), 2);
    let current = assets.manifest()["logo.svg"].as_str().unwrap().to_string();
    assert_ne!(current, first);
    assert!(outputs.contains(&current));
    assert!(outputs.contains(&first));

    tx.send(RuntimeEvent::ShutdownRequested).await.unwrap();
    runtime.await.unwrap().unwrap();
}

/// Change notifications are injected straight into the runtime channel, so
/// this exercises the engine's watch behaviour without any OS watcher.
#[tokio::test]
async fn change_pass_processes_only_the_notified_file() {
    init_tracing();

    let assets = AssetDirBuilder::new()
        .with_file("a.txt", "alpha")
        .with_file("b.txt", "beta")
        .build();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(8);
    let runtime = tokio::spawn(Runtime::new(Arc::new(assets.reconciler()), rx).run());

    tx.send(RuntimeEvent::FileChanged {
        name: "a.txt".to_string(),
    })
    .await
    .unwrap();
    // Closing the channel ends the runtime once the event is drained.
    drop(tx);
    runtime.await.unwrap().unwrap();

    let outputs = assets.output_files();
    assert_eq!(outputs.len(), 1);
    assert!(outputs[0].starts_with("a."));
    assert!(assets.manifest().get("b.txt").is_none());
}

#[tokio::test]
async fn events_for_missing_files_and_directories_are_discarded() {
    init_tracing();

    let assets = AssetDirBuilder::new().with_subdir("nested").build();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(8);
    let runtime = tokio::spawn(Runtime::new(Arc::new(assets.reconciler()), rx).run());

    tx.send(RuntimeEvent::FileChanged {
        name: "ghost.txt".to_string(),
    })
    .await
    .unwrap();
    tx.send(RuntimeEvent::FileChanged {
        name: "nested".to_string(),
    })
    .await
    .unwrap();
    drop(tx);
    runtime.await.unwrap().unwrap();

    assert!(assets.output_files().is_empty());
}

/// Duplicate notifications for the same unchanged file are no-ops beyond
/// the first.
#[tokio::test]
async fn duplicate_events_are_idempotent() {
    init_tracing();

    let assets = AssetDirBuilder::new().with_file("a.txt", "alpha").build();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(8);
    let runtime = tokio::spawn(Runtime::new(Arc::new(assets.reconciler()), rx).run());

    for _ in 0..3 {
        tx.send(RuntimeEvent::FileChanged {
            name: "a.txt".to_string(),
        })
        .await
        .unwrap();
    }
    drop(tx);
    runtime.await.unwrap().unwrap();

    assert_eq!(assets.output_files().len(), 1);
}
