//! Structural issues found while reading an API document.
//!
//! Issues are collected for the whole document first so a single run reports
//! every problem, then [`fail_if_issues`] turns a non-empty list into
//! [`ScaffoldError::InvalidDocumentStructure`].

use crate::error::{Result, ScaffoldError};
use std::fmt;
use tracing::error;

/// One structural problem in the input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Where the issue was found (e.g. `paths./pets.get`, `definitions.Pet`)
    pub location: String,
    /// Short machine-friendly kind (e.g. `MissingPaths`)
    pub kind: String,
    /// Human-readable description
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidationIssue {
            location: location.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.location, self.message)
    }
}

pub fn print_issues(issues: &[ValidationIssue]) {
    error!(
        count = issues.len(),
        "API document validation failed, fix the document before generating"
    );
    for issue in issues {
        error!(kind = %issue.kind, location = %issue.location, "{}", issue.message);
    }
}

/// Log and return every collected issue as a single error.
pub fn fail_if_issues(issues: Vec<ValidationIssue>) -> Result<()> {
    if issues.is_empty() {
        return Ok(());
    }
    print_issues(&issues);
    Err(ScaffoldError::InvalidDocumentStructure(issues))
}
