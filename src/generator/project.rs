use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::layout::ProjectLayout;
use super::scaffold::{scaffold, ScaffoldContext};
use super::templates::{Renderer, TemplateRenderer, DOTFILES};
use crate::config::ProjectConfig;
use crate::error::{Result, ScaffoldError};
use crate::spec::{document_from_value, load_document_value, ApiDocument};

/// One file of a generated project, rendered but not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedArtifact {
    /// Path relative to the project root
    pub relative_path: PathBuf,
    pub contents: String,
}

/// Every artifact of a project, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPlan {
    pub artifacts: Vec<PlannedArtifact>,
}

impl ProjectPlan {
    pub fn get(&self, relative_path: impl AsRef<Path>) -> Option<&PlannedArtifact> {
        let wanted = relative_path.as_ref();
        self.artifacts.iter().find(|a| a.relative_path == wanted)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.artifacts.iter().map(|a| a.relative_path.as_path())
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Add an artifact unless one with the same path is already planned.
    fn push(&mut self, seen: &mut HashSet<PathBuf>, relative_path: PathBuf, contents: String) {
        if !seen.insert(relative_path.clone()) {
            warn!(artifact = %relative_path.display(), "Duplicate artifact path, keeping the first");
            return;
        }
        self.artifacts.push(PlannedArtifact {
            relative_path,
            contents,
        });
    }
}

/// Render every artifact of a project without touching the filesystem.
///
/// Order: API document copy, README, entry point, dotfiles, handlers in
/// route order, models in definition order, tests in raw path order.
pub fn plan_project(
    config: &ProjectConfig,
    document_value: &Value,
    document: &ApiDocument,
    layout: &ProjectLayout,
    renderer: &dyn Renderer,
) -> Result<ProjectPlan> {
    let api_file_name = config.api_file_name();
    let context = ScaffoldContext::new(layout.clone(), api_file_name.clone());
    let derived = scaffold(document, &context);

    let mut plan = ProjectPlan::default();
    let mut seen = HashSet::new();

    let mut api_copy =
        serde_json::to_string_pretty(document_value).map_err(|e| ScaffoldError::Parse {
            path: config.api_path.clone(),
            message: e.to_string(),
        })?;
    api_copy.push('\n');
    plan.push(&mut seen, layout.api_document_artifact(&api_file_name), api_copy);
    plan.push(
        &mut seen,
        PathBuf::from("README.md"),
        renderer.render_readme(config, &document.title)?,
    );
    plan.push(
        &mut seen,
        layout.entry_artifact(),
        renderer.render_entry(config, layout)?,
    );
    for (name, contents) in DOTFILES {
        plan.push(&mut seen, PathBuf::from(name), contents.to_string());
    }

    for route in &derived.routes {
        plan.push(
            &mut seen,
            layout.handler_artifact(route),
            renderer.render_handler(route)?,
        );
    }
    for model in &document.definitions {
        plan.push(
            &mut seen,
            layout.model_artifact(&model.name),
            renderer.render_model(model)?,
        );
    }
    for descriptor in &derived.tests {
        plan.push(
            &mut seen,
            layout.test_artifact(&descriptor.raw_path),
            renderer.render_test(descriptor)?,
        );
    }

    debug!(artifacts = plan.len(), "Planned project");
    Ok(plan)
}

/// How [`write_project`] treats the filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Overwrite files that already exist
    pub force: bool,
    /// Report what would be written without writing
    pub dry_run: bool,
}

/// Outcome of writing a plan, with paths under the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub root: PathBuf,
    /// Written, or in a dry run, would be written
    pub written: Vec<PathBuf>,
    /// Left alone because they already exist
    pub skipped: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Write a plan under `root`.
///
/// Existing files are kept unless `force` is set. A failed write aborts the
/// run; files written before it stay on disk. Nothing is written when any
/// artifact path would leave `root`.
pub fn write_project(plan: &ProjectPlan, root: &Path, options: WriteOptions) -> Result<WriteReport> {
    if let Some(unsafe_path) = plan
        .paths()
        .find(|path| !stays_under_root(path))
    {
        return Err(ScaffoldError::UnsafeArtifactPath(unsafe_path.to_path_buf()));
    }

    let mut report = WriteReport {
        root: root.to_path_buf(),
        dry_run: options.dry_run,
        ..WriteReport::default()
    };

    for artifact in &plan.artifacts {
        let target = root.join(&artifact.relative_path);
        if target.exists() && !options.force {
            info!(
                artifact = %target.display(),
                "Already present (use --force to overwrite)"
            );
            report.skipped.push(target);
            continue;
        }
        if options.dry_run {
            info!(artifact = %target.display(), "Would write");
            report.written.push(target);
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
        }
        fs::write(&target, &artifact.contents).map_err(|e| ScaffoldError::io(&target, e))?;
        debug!(artifact = %target.display(), bytes = artifact.contents.len(), "Wrote");
        report.written.push(target);
    }

    info!(
        root = %root.display(),
        written = report.written.len(),
        skipped = report.skipped.len(),
        dry_run = options.dry_run,
        "Project generation finished"
    );
    Ok(report)
}

/// Relative, non-empty and made of plain names only.
fn stays_under_root(relative_path: &Path) -> bool {
    relative_path.components().next().is_some()
        && relative_path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Inputs for a full generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub config: ProjectConfig,
    /// Directory the project directory (named after `appname`) is created in
    pub output_root: PathBuf,
    pub write: WriteOptions,
}

/// Load the API document, render every artifact and write the project.
///
/// Nothing is written when the document is malformed.
pub fn generate_project(options: &GenerateOptions) -> Result<WriteReport> {
    let config = &options.config;
    let value = load_document_value(&config.api_path)?;
    let document = document_from_value(&value)?;
    info!(
        document = %config.api_path.display(),
        framework = %config.framework,
        appname = %config.appname,
        "Generating project"
    );

    let renderer = TemplateRenderer::new(config.framework);
    let plan = plan_project(config, &value, &document, &ProjectLayout::default(), &renderer)?;
    if !stays_under_root(Path::new(&config.appname)) {
        return Err(ScaffoldError::UnsafeArtifactPath(PathBuf::from(&config.appname)));
    }
    let root = options.output_root.join(&config.appname);
    write_project(&plan, &root, options.write)
}
