//! # Generator Module
//!
//! Turns a loaded [`ApiDocument`](crate::spec::ApiDocument) into the files of
//! an Express or Hapi service.
//!
//! ## Pipeline
//!
//! ```text
//! ApiDocument ─┬─ build_routes ─────────┐
//!              ├─ synthesize_all ───────┼─ assemble ─ Scaffold ─ Renderer ─ ProjectPlan ─ write_project
//!              └─ paths (raw, ordered) ─┘
//! ```
//!
//! 1. **Routes** - operations grouped by canonical path ([`crate::spec::build_routes`])
//! 2. **Models** - minimal instances built from required properties ([`synthesize_all`])
//! 3. **Tests** - one descriptor per raw path ([`assemble`])
//! 4. **Rendering** - Askama templates under `templates/` ([`TemplateRenderer`])
//! 5. **Writing** - existing files kept unless forced ([`write_project`])
//!
//! Steps 1 to 3 are pure and never fail; errors only come from loading,
//! rendering and writing.
//!
//! ## Generated Structure
//!
//! ```text
//! <appname>/
//! ├── README.md
//! ├── index.js                # Server entry point
//! ├── .jshintrc, .gitignore, .npmignore
//! ├── config/
//! │   └── <document>.json     # Copy of the API document
//! ├── handlers/
//! │   └── pets/{id}.js        # One module per canonical path
//! ├── models/
//! │   └── pet.js              # One constructor per definition
//! └── tests/
//!     └── test_pets_{id}.js   # One stub per raw path
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use brrtscaffold::config::{ProjectConfig, ProjectConfigFile};
//! use brrtscaffold::generator::{generate_project, GenerateOptions, WriteOptions};
//!
//! let config = ProjectConfig::resolve(ProjectConfigFile {
//!     api_path: Some("petstore.yaml".into()),
//!     ..Default::default()
//! })?;
//! let report = generate_project(&GenerateOptions {
//!     config,
//!     output_root: "out".into(),
//!     write: WriteOptions::default(),
//! })?;
//! ```

mod layout;
mod models;
mod project;
mod scaffold;
mod templates;

pub use layout::*;
pub use models::*;
pub use project::*;
pub use scaffold::*;
pub use templates::*;
