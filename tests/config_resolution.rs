use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tempfile::tempdir;

use hashstamp::cli::CliArgs;
use hashstamp::config::resolve;
use hashstamp::errors::HashstampError;
use hashstamp_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::parse_from(std::iter::once("hashstamp").chain(args.iter().copied()))
}

#[test]
fn missing_required_parameters_is_a_config_error() {
    init_tracing();

    let err = resolve(&parse(&[])).unwrap_err();
    assert!(matches!(err, HashstampError::Config(_)));
    assert!(err.to_string().contains("--input-dir"));

    let err = resolve(&parse(&["--input-dir", "assets"])).unwrap_err();
    assert!(err.to_string().contains("--output-dir"));
}

#[test]
fn flags_alone_resolve() -> TestResult {
    init_tracing();

    let cfg = resolve(&parse(&[
        "--input-dir",
        "assets",
        "--output-dir",
        "dist",
        "--manifest",
        "dist/manifest.json",
    ]))?;

    assert_eq!(cfg.input_dir, PathBuf::from("assets"));
    assert_eq!(cfg.output_dir, PathBuf::from("dist"));
    assert_eq!(cfg.manifest, PathBuf::from("dist/manifest.json"));
    assert!(!cfg.watch);
    assert!(cfg.include.is_empty());

    Ok(())
}

#[test]
fn config_file_supplies_missing_parameters() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let config_path = dir.path().join("Hashstamp.toml");
    fs::write(
        &config_path,
        r#"
input_dir = "assets"
output_dir = "dist"
manifest = "dist/manifest.json"
watch = true
exclude = ["*.map"]
"#,
    )?;

    let cfg = resolve(&parse(&["--config", config_path.to_str().unwrap()]))?;

    assert_eq!(cfg.input_dir, PathBuf::from("assets"));
    assert!(cfg.watch);
    assert_eq!(cfg.exclude, vec!["*.map".to_string()]);

    Ok(())
}

#[test]
fn cli_flags_override_the_config_file() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let config_path = dir.path().join("Hashstamp.toml");
    fs::write(
        &config_path,
        r#"
input_dir = "from-file"
output_dir = "dist"
manifest = "dist/manifest.json"
include = ["*.css"]
"#,
    )?;

    let cfg = resolve(&parse(&[
        "--config",
        config_path.to_str().unwrap(),
        "--input-dir",
        "from-flag",
        "--include",
        "*.js",
    ]))?;

    assert_eq!(cfg.input_dir, PathBuf::from("from-flag"));
    // A non-empty CLI list replaces the file's list.
    assert_eq!(cfg.include, vec!["*.js".to_string()]);

    Ok(())
}

#[test]
fn unreadable_config_file_is_an_error() {
    init_tracing();

    let args = parse(&["--config", "/definitely/not/here.toml"]);
    assert!(resolve(&args).is_err());
}

#[test]
fn invalid_toml_is_an_error() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let config_path = dir.path().join("Hashstamp.toml");
    fs::write(&config_path, "input_dir = [not toml")?;

    let err = resolve(&parse(&["--config", config_path.to_str().unwrap()])).unwrap_err();
    assert!(matches!(err, HashstampError::Toml(_)));

    Ok(())
}
