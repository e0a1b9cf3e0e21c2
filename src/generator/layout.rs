//! Artifact naming for a generated project.
//!
//! Every generated file name is derived here, from path segments and model
//! names, so the rest of the generator never builds paths by hand.

use crate::spec::Route;
use std::path::{Component, Path, PathBuf};

/// Character that replaces `/` when a raw path becomes a test file name.
pub const TEST_NAME_SEPARATOR: char = '_';

/// Directory names inside a generated project, relative to its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub config_dir: PathBuf,
    pub handlers_dir: PathBuf,
    pub models_dir: PathBuf,
    pub tests_dir: PathBuf,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        ProjectLayout {
            config_dir: PathBuf::from("config"),
            handlers_dir: PathBuf::from("handlers"),
            models_dir: PathBuf::from("models"),
            tests_dir: PathBuf::from("tests"),
        }
    }
}

impl ProjectLayout {
    /// `handlers/<segment>/.../<last>.js`; the root route becomes `handlers/index.js`.
    pub fn handler_artifact(&self, route: &Route) -> PathBuf {
        let Some((last, parents)) = route.segments.split_last() else {
            return self.handlers_dir.join("index.js");
        };
        let mut path = self.handlers_dir.clone();
        path.extend(parents);
        path.push(format!("{last}.js"));
        path
    }

    /// `models/<lower-cased name>.js`
    pub fn model_artifact(&self, model_name: &str) -> PathBuf {
        self.models_dir
            .join(format!("{}.js", model_name.to_lowercase()))
    }

    /// `tests/<test name>.js`
    pub fn test_artifact(&self, raw_path: &str) -> PathBuf {
        self.tests_dir.join(format!("{}.js", test_name(raw_path)))
    }

    /// Where the API document is copied: `config/<file name>`.
    pub fn api_document_artifact(&self, file_name: &str) -> PathBuf {
        self.config_dir.join(file_name)
    }

    /// Server entry point at the project root.
    pub fn entry_artifact(&self) -> PathBuf {
        PathBuf::from("index.js")
    }

    /// `./`-prefixed import path of `to` from the project root.
    pub fn root_import_path(&self, to: &Path) -> String {
        format!("./{}", relative_path(Path::new(""), to))
    }

    /// Import path of the API document as seen from the tests directory.
    pub fn api_import_path(&self, file_name: &str) -> String {
        relative_path(&self.tests_dir, &self.api_document_artifact(file_name))
    }

    /// Import path of the handlers directory as seen from the tests directory.
    pub fn handlers_import_path(&self) -> String {
        relative_path(&self.tests_dir, &self.handlers_dir)
    }

    /// Import path of one route's handler module (no extension) from the tests directory.
    pub fn handler_import_path(&self, route: &Route) -> String {
        relative_path(&self.tests_dir, &self.handler_artifact(route).with_extension(""))
    }
}

/// `test` followed by the raw path with every `/` replaced.
///
/// Driven by the raw string, so `/pets` and `/pets/` get different names.
pub fn test_name(raw_path: &str) -> String {
    format!("test{}", raw_path.replace('/', &TEST_NAME_SEPARATOR.to_string()))
}

/// Relative `/`-separated path from directory `from_dir` to `to`.
///
/// Both inputs are project-relative; no filesystem access happens.
pub fn relative_path(from_dir: &Path, to: &Path) -> String {
    let from: Vec<Component<'_>> = from_dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let target: Vec<Component<'_>> = to
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let common = from
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let parts: Vec<String> = std::iter::repeat("..".to_string())
        .take(from.len() - common)
        .chain(
            target[common..]
                .iter()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        )
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
