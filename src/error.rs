//! Error type for scaffold runs.
//!
//! The derivation engine itself never fails: every error below is raised at
//! the boundary (loading the document, resolving configuration, rendering or
//! writing artifacts) and aborts the whole run.

use crate::validator::ValidationIssue;
use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Errors surfaced to the caller of a scaffold run.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// `paths`, a path item, an operation or a definition's `properties` is
    /// missing or has the wrong shape.
    #[error("invalid API document structure: {}", summarize(.0))]
    InvalidDocumentStructure(Vec<ValidationIssue>),

    /// The requested target framework is not one of the supported set.
    #[error("unsupported framework '{0}': expected one of express, hapi")]
    UnsupportedFrameworkSelection(String),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or YAML.
    #[error("failed to parse {}: {message}", .path.display())]
    Parse {
        /// Document path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A template failed to render.
    #[error("failed to render {artifact}: {source}")]
    Render {
        /// Artifact being rendered
        artifact: String,
        /// Underlying template error
        #[source]
        source: askama::Error,
    },

    /// A planned artifact would land outside the project directory.
    #[error("refusing to write {} outside the project directory", .0.display())]
    UnsafeArtifactPath(PathBuf),
}

impl ScaffoldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScaffoldError::Io {
            path: path.into(),
            source,
        }
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    let listed = issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!("{} issue(s): {listed}", issues.len())
}
