use std::error::Error;

use hashstamp_test_utils::builders::{AssetDir, AssetDirBuilder};
use hashstamp_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn run_and_snapshot(assets: &AssetDir) -> Result<serde_json::Value, Box<dyn Error>> {
    assets.reconciler().run_batch()?;
    Ok(assets.manifest())
}

/// Missing, empty and syntactically invalid manifests all behave like `{}`.
#[test]
fn missing_empty_and_malformed_manifests_are_equivalent() -> TestResult {
    init_tracing();

    let missing = AssetDirBuilder::new().with_file("a.txt", "hello").build();
    let empty = AssetDirBuilder::new()
        .with_file("a.txt", "hello")
        .with_manifest_json("")
        .build();
    let malformed = AssetDirBuilder::new()
        .with_file("a.txt", "hello")
        .with_manifest_json("not valid json {{{")
        .build();

    let from_missing = run_and_snapshot(&missing)?;
    let from_empty = run_and_snapshot(&empty)?;
    let from_malformed = run_and_snapshot(&malformed)?;

    assert_eq!(from_missing, from_empty);
    assert_eq!(from_missing, from_malformed);
    assert!(from_missing.get("a.txt").is_some());

    Ok(())
}

/// A valid pre-existing manifest entry for unchanged content suppresses the
/// copy entirely.
#[test]
fn valid_prior_manifest_entry_is_honoured() -> TestResult {
    init_tracing();

    let digest = blake3::hash(b"hello").to_hex().to_string();
    let prior = format!("{{\"a.txt\": \"a.{digest}.txt\"}}");
    let assets = AssetDirBuilder::new()
        .with_file("a.txt", "hello")
        .with_manifest_json(&prior)
        .build();

    let stats = assets.reconciler().run_batch()?;
    assert_eq!(stats.copied, 0);
    assert_eq!(stats.skipped, 1);
    assert!(assets.output_files().is_empty());

    Ok(())
}

/// Entries the pipeline did not create are carried through untouched.
#[test]
fn unrelated_manifest_entries_survive_a_pass() -> TestResult {
    init_tracing();

    let assets = AssetDirBuilder::new()
        .with_file("a.txt", "hello")
        .with_manifest_json("{\"legacy.png\": \"legacy.cafe.png\"}")
        .build();

    assets.reconciler().run_batch()?;

    let manifest = assets.manifest();
    assert_eq!(manifest["legacy.png"].as_str().unwrap(), "legacy.cafe.png");
    assert!(manifest.get("a.txt").is_some());

    Ok(())
}

/// The persisted manifest is indented JSON with keys in sorted order, and
/// the temporary file used for the atomic swap is gone afterwards.
#[test]
fn persisted_manifest_is_human_diffable() -> TestResult {
    init_tracing();

    let assets = AssetDirBuilder::new()
        .with_file("zebra.txt", "z")
        .with_file("apple.txt", "a")
        .with_file("mango.txt", "m")
        .build();

    assets.reconciler().run_batch()?;

    let raw = assets.manifest_text();
    assert!(raw.contains("\n  \""));
    let apple = raw.find("apple.txt").unwrap();
    let mango = raw.find("mango.txt").unwrap();
    let zebra = raw.find("zebra.txt").unwrap();
    assert!(apple < mango && mango < zebra);

    let tmp = assets.manifest_path.with_file_name("manifest.json.tmp");
    assert!(!tmp.exists());

    Ok(())
}
