use crate::config::{
    api_copy_file_name, load_project_config, ProjectConfig, ProjectConfigFile,
    DEFAULT_CONFIG_FILE,
};
use crate::generator::{
    generate_project, scaffold, GenerateOptions, ProjectLayout, ScaffoldContext, WriteOptions,
};
use crate::logging::{init_logging, LogConfig};
use crate::spec::load_document;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for brrtscaffold
#[derive(Parser)]
#[command(name = "brrtscaffold-gen")]
#[command(about = "Scaffold Express or Hapi services from a Swagger 2.0 document", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate handlers, models and test stubs into <output>/<appname>
    Generate {
        /// Path to the Swagger 2.0 document (JSON or YAML).
        /// May instead be given as `api_path` in the config file
        #[arg(short, long)]
        spec: Option<PathBuf>,

        /// Directory the project directory is created in
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Project name (default: derived from the document file name)
        #[arg(long)]
        appname: Option<String>,

        #[arg(long)]
        creator_name: Option<String>,

        #[arg(long)]
        github_user: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Target framework: express or hapi (default: express)
        #[arg(long)]
        framework: Option<String>,

        /// Project config file (default: <output>/brrtscaffold.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Show what would be written without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        #[arg(short, long, default_value_t = false)]
        verbose: bool,
    },
    /// Print routes, synthesized models and test descriptors as JSON
    Inspect {
        /// Path to the Swagger 2.0 document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        #[arg(short, long, default_value_t = false)]
        verbose: bool,
    },
}

impl Cli {
    pub fn verbose(&self) -> bool {
        match &self.command {
            Commands::Generate { verbose, .. } | Commands::Inspect { verbose, .. } => *verbose,
        }
    }
}

/// Parse arguments, install logging and run the command.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut log_config = LogConfig::from_env();
    if cli.verbose() {
        log_config = log_config.verbose();
    }
    init_logging(&log_config)?;
    run(cli)
}

/// Run a parsed command. Logging is left to the caller.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            spec,
            output,
            appname,
            creator_name,
            github_user,
            email,
            framework,
            config,
            force,
            dry_run,
            verbose: _,
        } => {
            let from_file = match &config {
                Some(path) => Some(
                    load_project_config(path)?
                        .with_context(|| format!("Config file not found: {}", path.display()))?,
                ),
                None => load_project_config(&output.join(DEFAULT_CONFIG_FILE))?,
            };
            let overrides = ProjectConfigFile {
                appname,
                creator_name,
                github_user,
                email,
                api_path: spec,
                framework,
            };
            let project = ProjectConfig::resolve(from_file.unwrap_or_default().merged_with(overrides))?;

            let report = generate_project(&GenerateOptions {
                config: project,
                output_root: output,
                write: WriteOptions { force, dry_run },
            })?;

            if report.dry_run {
                println!("Dry run: nothing written under {}", report.root.display());
                for path in &report.written {
                    println!("  would write {}", path.display());
                }
            } else {
                println!(
                    "Generated {} ({} written, {} skipped)",
                    report.root.display(),
                    report.written.len(),
                    report.skipped.len()
                );
            }
            if !report.skipped.is_empty() {
                println!("Existing files kept (use --force to overwrite):");
                for path in &report.skipped {
                    println!("  {}", path.display());
                }
            }
            Ok(())
        }
        Commands::Inspect { spec, verbose: _ } => {
            let document = load_document(&spec)?;
            let context = ScaffoldContext::new(ProjectLayout::default(), api_copy_file_name(&spec));
            let derived = scaffold(&document, &context);
            let json = serde_json::to_string_pretty(&derived)
                .context("Failed to serialize scaffold")?;
            println!("{json}");
            Ok(())
        }
    }
}
