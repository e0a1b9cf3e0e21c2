#![allow(clippy::unwrap_used, clippy::expect_used)]

use brrtscaffold::config::{Framework, ProjectConfig, ProjectConfigFile};
use brrtscaffold::generator::{generate_project, GenerateOptions, WriteOptions};
use brrtscaffold::ScaffoldError;
use std::fs;
use std::path::Path;

const PETSTORE_YAML: &str = r##"swagger: "2.0"
info:
  title: Petstore
  version: "1.0.0"
basePath: /v1
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        "200": { description: ok }
    post:
      operationId: addPet
      parameters:
        - in: body
          name: pet
          schema: { $ref: "#/definitions/Pet" }
      responses:
        "201": { description: created }
  /pets/{petId}:
    get:
      operationId: getPet
      parameters:
        - { in: path, name: petId, type: integer, required: true }
definitions:
  Pet:
    required: [id, name]
    properties:
      id: { type: integer }
      name: { type: string }
      tag: { type: string }
"##;

fn options(spec: &Path, out: &Path, framework: Option<&str>, write: WriteOptions) -> GenerateOptions {
    let config = ProjectConfig::resolve(ProjectConfigFile {
        api_path: Some(spec.to_path_buf()),
        framework: framework.map(str::to_string),
        ..Default::default()
    })
    .unwrap();
    GenerateOptions {
        config,
        output_root: out.to_path_buf(),
        write,
    }
}

fn write_spec(dir: &Path) -> std::path::PathBuf {
    let spec = dir.join("petstore.yaml");
    fs::write(&spec, PETSTORE_YAML).unwrap();
    spec
}

#[test]
fn test_generate_express_project() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path());
    let out = dir.path().join("out");

    let report = generate_project(&options(&spec, &out, None, WriteOptions::default())).unwrap();
    let root = out.join("petstore");
    assert_eq!(report.root, root);
    assert_eq!(report.written.len(), 11);
    assert!(report.skipped.is_empty());

    for file in [
        "README.md",
        "index.js",
        ".jshintrc",
        ".gitignore",
        ".npmignore",
        "config/petstore.json",
        "handlers/pets.js",
        "handlers/pets/{petId}.js",
        "models/pet.js",
        "tests/test_pets.js",
        "tests/test_pets_{petId}.js",
    ] {
        assert!(root.join(file).is_file(), "missing {file}");
    }

    let copy: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("config/petstore.json")).unwrap())
            .unwrap();
    assert_eq!(copy["info"]["title"], "Petstore");

    let test_stub = fs::read_to_string(root.join("tests/test_pets_{petId}.js")).unwrap();
    assert!(test_stub.contains(r#"request(app).get("/v1/pets/1")"#));
    assert!(test_stub.contains(r#""name": "helloworld""#));

    let entry = fs::read_to_string(root.join("index.js")).unwrap();
    assert!(entry.contains("require('swaggerize-express')"));
    assert!(entry.contains(r#"api: require("./config/petstore.json"),"#));
}

#[test]
fn test_generate_hapi_project() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path());
    let out = dir.path().join("out");

    let opts = options(&spec, &out, Some("hapi"), WriteOptions::default());
    assert_eq!(opts.config.framework, Framework::Hapi);
    generate_project(&opts).unwrap();

    let handler = fs::read_to_string(out.join("petstore/handlers/pets.js")).unwrap();
    assert!(handler.contains("post: function addPet(req, reply) {"));

    let entry = fs::read_to_string(out.join("petstore/index.js")).unwrap();
    assert!(entry.contains("register: require('swaggerize-hapi'),"));
}

#[test]
fn test_existing_files_are_kept_unless_forced() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path());
    let out = dir.path().join("out");
    let handler = out.join("petstore/handlers/pets.js");

    generate_project(&options(&spec, &out, None, WriteOptions::default())).unwrap();
    fs::write(&handler, "// edited by hand\n").unwrap();

    let report = generate_project(&options(&spec, &out, None, WriteOptions::default())).unwrap();
    assert!(report.written.is_empty());
    assert_eq!(report.skipped.len(), 11);
    assert_eq!(fs::read_to_string(&handler).unwrap(), "// edited by hand\n");

    let forced = WriteOptions {
        force: true,
        dry_run: false,
    };
    let report = generate_project(&options(&spec, &out, None, forced)).unwrap();
    assert_eq!(report.written.len(), 11);
    assert!(fs::read_to_string(&handler).unwrap().contains("listPets"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path());
    let out = dir.path().join("out");

    let dry = WriteOptions {
        force: false,
        dry_run: true,
    };
    let report = generate_project(&options(&spec, &out, None, dry)).unwrap();
    assert!(report.dry_run);
    assert_eq!(report.written.len(), 11);
    assert!(!out.exists());
}

#[test]
fn test_invalid_document_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("broken.json");
    fs::write(&spec, r#"{ "swagger": "2.0", "definitions": { "Pet": {} } }"#).unwrap();
    let out = dir.path().join("out");

    let err = generate_project(&options(&spec, &out, None, WriteOptions::default())).unwrap_err();
    match err {
        ScaffoldError::InvalidDocumentStructure(issues) => assert_eq!(issues.len(), 2),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!out.exists());
}

#[test]
fn test_unsupported_framework_rejected_before_loading() {
    let err = ProjectConfig::resolve(ProjectConfigFile {
        api_path: Some("does-not-exist.yaml".into()),
        framework: Some("koa".to_string()),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ScaffoldError>(),
        Some(ScaffoldError::UnsupportedFrameworkSelection(name)) if name == "koa"
    ));
}

#[test]
fn test_dot_segment_paths_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("escape.json");
    fs::write(&spec, r#"{ "paths": { "/../../../escaped": { "get": {} } } }"#).unwrap();
    let out = dir.path().join("out");

    let err = generate_project(&options(&spec, &out, None, WriteOptions::default())).unwrap_err();
    match err {
        ScaffoldError::InvalidDocumentStructure(issues) => {
            assert!(issues.iter().any(|i| i.kind == "UnsafePathSegment"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!out.exists());
    assert!(!dir.path().join("escaped.js").exists());
}

#[test]
fn test_path_like_appname_rejected() {
    for appname in ["../outside", "a/b", "a\\b", "..", "."] {
        let err = ProjectConfig::resolve(ProjectConfigFile {
            api_path: Some("petstore.yaml".into()),
            appname: Some(appname.to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("appname"), "{appname}: {err}");
    }
}
