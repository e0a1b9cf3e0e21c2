//! Unit tests for CLI commands

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::cli::{run, Cli, Commands};
use clap::Parser;
use std::fs;

const PETSTORE: &str = r##"{
  "swagger": "2.0",
  "info": { "title": "Petstore", "version": "1.0.0" },
  "basePath": "/v1",
  "paths": {
    "/pets": {
      "get": { "operationId": "listPets", "responses": { "200": { "description": "ok" } } }
    }
  },
  "definitions": {
    "Pet": {
      "required": ["id"],
      "properties": { "id": { "type": "integer" } }
    }
  }
}"##;

#[test]
fn test_generate_command_defaults() {
    let cli = Cli::try_parse_from(["brrtscaffold-gen", "generate", "--spec", "api.json"]).unwrap();

    match cli.command {
        Commands::Generate {
            spec,
            output,
            framework,
            force,
            dry_run,
            ..
        } => {
            assert_eq!(spec.unwrap().to_string_lossy(), "api.json");
            assert_eq!(output.to_string_lossy(), ".");
            assert!(framework.is_none());
            assert!(!force);
            assert!(!dry_run);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_command_with_flags() {
    let cli = Cli::try_parse_from([
        "brrtscaffold-gen",
        "generate",
        "--spec",
        "api.yaml",
        "--output",
        "out",
        "--appname",
        "pets",
        "--creator-name",
        "Jane",
        "--github-user",
        "jane",
        "--email",
        "jane@example.com",
        "--framework",
        "hapi",
        "--force",
        "--dry-run",
        "--verbose",
    ])
    .unwrap();

    assert!(cli.verbose());
    match cli.command {
        Commands::Generate {
            appname,
            creator_name,
            github_user,
            email,
            framework,
            force,
            dry_run,
            ..
        } => {
            assert_eq!(appname.as_deref(), Some("pets"));
            assert_eq!(creator_name.as_deref(), Some("Jane"));
            assert_eq!(github_user.as_deref(), Some("jane"));
            assert_eq!(email.as_deref(), Some("jane@example.com"));
            assert_eq!(framework.as_deref(), Some("hapi"));
            assert!(force);
            assert!(dry_run);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_inspect_requires_spec() {
    assert!(Cli::try_parse_from(["brrtscaffold-gen", "inspect"]).is_err());
    let cli = Cli::try_parse_from(["brrtscaffold-gen", "inspect", "-s", "api.json"]).unwrap();
    assert!(!cli.verbose());
}

#[test]
fn test_run_generate_writes_project() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("petstore.json");
    fs::write(&spec, PETSTORE).unwrap();
    let out = dir.path().join("out");

    let cli = Cli::try_parse_from([
        "brrtscaffold-gen",
        "generate",
        "--spec",
        spec.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ])
    .unwrap();
    run(cli).unwrap();

    let root = out.join("petstore");
    assert!(root.join("config/petstore.json").exists());
    assert!(root.join("index.js").exists());
    assert!(root.join(".gitignore").exists());
    assert!(root.join("handlers/pets.js").exists());
    assert!(root.join("models/pet.js").exists());
    assert!(root.join("tests/test_pets.js").exists());
}

#[test]
fn test_run_generate_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("petstore.json");
    fs::write(&spec, PETSTORE).unwrap();
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(
        out.join("brrtscaffold.toml"),
        format!(
            "appname = \"from_toml\"\nframework = \"hapi\"\napi_path = {:?}\n",
            spec.to_str().unwrap()
        ),
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "brrtscaffold-gen",
        "generate",
        "--output",
        out.to_str().unwrap(),
    ])
    .unwrap();
    run(cli).unwrap();

    let test_stub = fs::read_to_string(out.join("from_toml/tests/test_pets.js")).unwrap();
    assert!(test_stub.contains("server.inject"));
}

#[test]
fn test_run_generate_rejects_unknown_framework() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("petstore.json");
    fs::write(&spec, PETSTORE).unwrap();
    let out = dir.path().join("out");

    let cli = Cli::try_parse_from([
        "brrtscaffold-gen",
        "generate",
        "--spec",
        spec.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--framework",
        "koa",
    ])
    .unwrap();
    let err = run(cli).unwrap_err();
    assert!(err.to_string().contains("koa"));
    assert!(!out.exists());
}

#[test]
fn test_run_generate_rejects_path_like_appname() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("petstore.json");
    fs::write(&spec, PETSTORE).unwrap();
    let out = dir.path().join("out");

    let cli = Cli::try_parse_from([
        "brrtscaffold-gen",
        "generate",
        "--spec",
        spec.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--appname",
        "../escaped",
    ])
    .unwrap();
    let err = run(cli).unwrap_err();
    assert!(err.to_string().contains("../escaped"));
    assert!(!dir.path().join("escaped").exists());
}

#[test]
fn test_run_generate_missing_explicit_config() {
    let dir = tempfile::tempdir().unwrap();
    let cli = Cli::try_parse_from([
        "brrtscaffold-gen",
        "generate",
        "--config",
        dir.path().join("missing.toml").to_str().unwrap(),
    ])
    .unwrap();
    assert!(run(cli).is_err());
}

#[test]
fn test_run_inspect() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("petstore.json");
    fs::write(&spec, PETSTORE).unwrap();
    let cli = Cli::try_parse_from(["brrtscaffold-gen", "inspect", "--spec", spec.to_str().unwrap()])
        .unwrap();
    run(cli).unwrap();
}
