//! # brrtscaffold
//!
//! **brrtscaffold** generates the skeleton of an Express or Hapi service from a
//! [Swagger 2.0](https://swagger.io/specification/v2/) document: one handler
//! module per route, one constructor per model definition, and one test stub
//! per declared path, each test preloaded with minimal valid model instances.
//!
//! ## Architecture
//!
//! - **[`spec`]** - Document loading, path normalization and route aggregation
//! - **[`generator`]** - Model synthesis, test scaffolding, rendering and writing
//! - **[`config`]** - Project metadata from TOML and command-line flags
//! - **[`validator`]** - Structural issues found in the input document
//! - **[`error`]** - [`ScaffoldError`] and the crate [`Result`]
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `brrtscaffold-gen` command line
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(brrtscaffold-gen)
//!     participant Config as config::ProjectConfig
//!     participant Spec as spec::load_document
//!     participant Derive as generator::scaffold
//!     participant Render as generator::TemplateRenderer
//!     participant FS as File System
//!
//!     User->>CLI: generate --spec petstore.yaml
//!     CLI->>Config: resolve(file + flags)
//!     Config-->>CLI: ProjectConfig (framework checked)
//!     CLI->>Spec: load + validate structure
//!     Spec-->>Derive: ApiDocument
//!     Derive->>Derive: build_routes, synthesize_all, assemble
//!     Derive-->>Render: RouteTable, ModelInstances, TestDescriptors
//!     Render-->>CLI: ProjectPlan
//!     CLI->>FS: write_project (skip existing unless --force)
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! brrtscaffold-gen generate --spec petstore.yaml --output out
//! brrtscaffold-gen inspect --spec petstore.yaml
//! ```
//!
//! ```rust,ignore
//! use brrtscaffold::generator::{scaffold, ProjectLayout, ScaffoldContext};
//! use brrtscaffold::spec::load_document;
//!
//! let document = load_document("petstore.yaml".as_ref())?;
//! let derived = scaffold(&document, &ScaffoldContext::new(ProjectLayout::default(), "petstore.json"));
//! for route in &derived.routes {
//!     println!("/{} -> {} operations", route.canonical_path, route.operations.len());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod spec;
pub mod validator;

pub use config::{Framework, ProjectConfig};
pub use error::{Result, ScaffoldError};
pub use generator::{generate_project, scaffold, GenerateOptions, Scaffold};
pub use spec::{build_routes, load_document, normalize, ApiDocument, RouteTable};
