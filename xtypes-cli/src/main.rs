//! `xtypes-gen` command-line front end.
//!
//! Compiles a schema file or directory into C++ and Python binding sources.
//! Logs go to stderr; stdout only carries the semicolon separated list of
//! external namespaces the project depends on.

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xtypes_codegen::{
    CodegenError, DEFAULT_OUTPUT_DIR, GeneratorConfig, generate_from_path, parse_languages,
};

#[derive(Parser, Debug)]
#[command(name = "xtypes-gen")]
#[command(about = "Generate C++ classes and Python bindings from xtypes YAML schemas")]
#[command(version)]
struct Cli {
    /// Project name, used as C++ namespace and Python module name
    #[arg(long = "project_name")]
    project_name: String,

    /// Schema file or directory of schema files
    #[arg(short, long)]
    input: PathBuf,

    /// Target languages: CPP, PYTHON or ALL
    #[arg(short, long, num_args = 1.., default_value = "ALL")]
    language: Vec<String>,

    /// Output directory for regenerated files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Directory receiving the user-editable class skeletons
    #[arg(short, long = "skeleton_dir")]
    skeleton_dir: Option<PathBuf>,

    /// Overwrite existing skeletons
    #[arg(short = 'f', long = "overwrite_skeletons")]
    overwrite_skeletons: bool,

    /// Do not generate the project registry
    #[arg(short = 'p', long = "do_not_create_project_registry")]
    do_not_create_project_registry: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Result<GeneratorConfig, CodegenError> {
        Ok(GeneratorConfig::new(&self.project_name)
            .output_dir(&self.output)
            .skeleton_dir(self.skeleton_dir.clone())
            .overwrite_skeletons(self.overwrite_skeletons)
            .languages(parse_languages(&self.language)?)
            .create_project_registry(!self.do_not_create_project_registry))
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = cli.config()?;
    tracing::debug!(
        project = config.project_name(),
        languages = ?config.target_languages(),
        "configuration loaded"
    );
    let summary = generate_from_path(&config, &cli.input)
        .with_context(|| format!("failed to compile '{}'", cli.input.display()))?;
    Ok(summary.order.dependency_line())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let dependencies = run(&cli)?;
    let mut stdout = std::io::stdout();
    write!(stdout, "{dependencies}")?;
    stdout.flush()?;
    Ok(())
}
