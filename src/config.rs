//! Project configuration.
//!
//! Replaces interactive prompting: project metadata comes from an optional
//! TOML file and command-line overrides, resolved once before generation.
//!
//! ```toml
//! appname = "petstore-service"
//! creator_name = "Jane Doe"
//! github_user = "janedoe"
//! email = "jane@example.com"
//! framework = "hapi"
//! ```

use crate::error::{Result, ScaffoldError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File looked up in the output directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "brrtscaffold.toml";

/// Target web framework for generated handlers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    Express,
    Hapi,
}

impl Framework {
    pub const fn as_str(self) -> &'static str {
        match self {
            Framework::Express => "express",
            Framework::Hapi => "hapi",
        }
    }
}

impl FromStr for Framework {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "express" => Ok(Framework::Express),
            "hapi" => Ok(Framework::Hapi),
            _ => Err(ScaffoldError::UnsupportedFrameworkSelection(s.to_string())),
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values read from a project TOML file; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfigFile {
    pub appname: Option<String>,
    pub creator_name: Option<String>,
    pub github_user: Option<String>,
    pub email: Option<String>,
    pub api_path: Option<PathBuf>,
    /// Kept as text so an unsupported value surfaces as
    /// [`ScaffoldError::UnsupportedFrameworkSelection`].
    pub framework: Option<String>,
}

impl ProjectConfigFile {
    /// Field-wise overlay: values in `over` win.
    #[must_use]
    pub fn merged_with(self, over: ProjectConfigFile) -> ProjectConfigFile {
        ProjectConfigFile {
            appname: over.appname.or(self.appname),
            creator_name: over.creator_name.or(self.creator_name),
            github_user: over.github_user.or(self.github_user),
            email: over.email.or(self.email),
            api_path: over.api_path.or(self.api_path),
            framework: over.framework.or(self.framework),
        }
    }
}

/// Fully resolved project metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    pub appname: String,
    pub creator_name: String,
    pub github_user: String,
    pub email: String,
    pub api_path: PathBuf,
    pub framework: Framework,
}

impl ProjectConfig {
    /// Resolve a merged config file into a project config.
    ///
    /// The framework is validated here, before any document is read.
    /// `appname` defaults to a slug of the API document's file stem.
    pub fn resolve(file: ProjectConfigFile) -> anyhow::Result<ProjectConfig> {
        let api_path = file
            .api_path
            .context("no API document given (use --spec or `api_path` in the config file)")?;
        let framework = match file.framework.as_deref() {
            Some(name) => name.parse::<Framework>()?,
            None => Framework::default(),
        };
        let appname = file
            .appname
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| {
                api_path
                    .file_stem()
                    .map(|stem| slugify(&stem.to_string_lossy()))
                    .unwrap_or_default()
            });
        if appname.is_empty() {
            anyhow::bail!(
                "cannot derive a project name from {}; pass --appname",
                api_path.display()
            );
        }
        if is_path_like(&appname) {
            anyhow::bail!("appname `{appname}` must be a plain directory name");
        }
        Ok(ProjectConfig {
            appname,
            creator_name: file.creator_name.unwrap_or_default(),
            github_user: file.github_user.unwrap_or_default(),
            email: file.email.unwrap_or_default(),
            api_path,
            framework,
        })
    }

    /// File name of the API document's copy under `config/`.
    ///
    /// The copy is always written as JSON, so a YAML source `petstore.yaml`
    /// becomes `petstore.json`.
    pub fn api_file_name(&self) -> String {
        api_copy_file_name(&self.api_path)
    }
}

/// Separators or `.`/`..` would place the project outside the output directory.
fn is_path_like(appname: &str) -> bool {
    appname == "." || appname == ".." || appname.contains(['/', '\\'])
}

/// Load a project config file.
///
/// Returns `Ok(None)` when the file does not exist, `Err` when it exists but
/// cannot be read or parsed.
pub fn load_project_config(config_path: &Path) -> anyhow::Result<Option<ProjectConfigFile>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path).with_context(|| {
        format!("Failed to read project config: {}", config_path.display())
    })?;
    let config: ProjectConfigFile = toml::from_str(&contents).with_context(|| {
        format!("Failed to parse project config: {}", config_path.display())
    })?;
    Ok(Some(config))
}

/// `<stem>.json` for an API document path, `api.json` when it has no stem.
pub fn api_copy_file_name(api_path: &Path) -> String {
    api_path
        .file_stem()
        .map(|stem| format!("{}.json", stem.to_string_lossy()))
        .unwrap_or_else(|| "api.json".to_string())
}

/// Lower-case, non-alphanumerics to `_`, trimmed of leading/trailing `_`.
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .replace(|c: char| !c.is_ascii_alphanumeric(), "_")
        .trim_matches('_')
        .to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_framework_parse() {
        assert_eq!("express".parse::<Framework>().unwrap(), Framework::Express);
        assert_eq!(" Hapi ".parse::<Framework>().unwrap(), Framework::Hapi);
        match "koa".parse::<Framework>() {
            Err(ScaffoldError::UnsupportedFrameworkSelection(name)) => assert_eq!(name, "koa"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let config = ProjectConfig::resolve(ProjectConfigFile {
            api_path: Some(PathBuf::from("specs/Pet Store.json")),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.appname, "pet_store");
        assert_eq!(config.framework, Framework::Express);
        assert_eq!(config.api_file_name(), "Pet Store.json");
    }

    #[test]
    fn test_yaml_document_copied_as_json() {
        let config = ProjectConfig::resolve(ProjectConfigFile {
            api_path: Some(PathBuf::from("petstore.yaml")),
            appname: Some("pets".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.api_file_name(), "petstore.json");
        assert_eq!(config.appname, "pets");
    }

    #[test]
    fn test_resolve_rejects_unknown_framework() {
        let err = ProjectConfig::resolve(ProjectConfigFile {
            api_path: Some(PathBuf::from("api.json")),
            framework: Some("rails".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::UnsupportedFrameworkSelection(_))
        ));
    }

    #[test]
    fn test_resolve_requires_api_path() {
        assert!(ProjectConfig::resolve(ProjectConfigFile::default()).is_err());
    }

    #[test]
    fn test_resolve_rejects_path_like_appname() {
        let with_appname = |appname: &str| ProjectConfigFile {
            appname: Some(appname.to_string()),
            api_path: Some(PathBuf::from("petstore.yaml")),
            ..Default::default()
        };
        let err = ProjectConfig::resolve(with_appname("../x")).unwrap_err();
        assert!(err.to_string().contains("plain directory name"));
        assert!(ProjectConfig::resolve(with_appname("..")).is_err());
        assert!(ProjectConfig::resolve(with_appname("pets\\store")).is_err());
        let ok = ProjectConfig::resolve(with_appname("pet-store.v2")).unwrap();
        assert_eq!(ok.appname, "pet-store.v2");
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = ProjectConfigFile {
            appname: Some("from_file".to_string()),
            email: Some("file@example.com".to_string()),
            ..Default::default()
        };
        let over = ProjectConfigFile {
            appname: Some("from_cli".to_string()),
            ..Default::default()
        };
        let merged = base.merged_with(over);
        assert_eq!(merged.appname.as_deref(), Some("from_cli"));
        assert_eq!(merged.email.as_deref(), Some("file@example.com"));
    }

    #[test]
    fn test_load_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_project_config(&dir.path().join("nope.toml"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "appname = \"svc\"\nframework = \"hapi\"\n").unwrap();
        let loaded = load_project_config(&path).unwrap().unwrap();
        assert_eq!(loaded.appname.as_deref(), Some("svc"));
        assert_eq!(loaded.framework.as_deref(), Some("hapi"));
    }
}
