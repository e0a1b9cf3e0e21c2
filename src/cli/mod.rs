//! # CLI Module
//!
//! Command-line front end for the scaffolder.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! brrtscaffold-gen generate --spec petstore.yaml --output out --framework hapi
//! ```
//!
//! Writes `out/<appname>/` with `config/`, `handlers/`, `models/`, `tests/`
//! and a README. Project metadata can also come from `brrtscaffold.toml` in the
//! output directory, or any file passed with `--config`; flags win over the
//! file. Existing files are kept unless `--force` is given.
//!
//! ### `inspect`
//!
//! ```bash
//! brrtscaffold-gen inspect --spec petstore.yaml
//! ```
//!
//! Prints the route table, synthesized model instances and test descriptors
//! as JSON without writing anything.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run, run_cli, Cli, Commands};
