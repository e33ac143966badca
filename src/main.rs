//! declsynth CLI - Command-line interface
//!
//! Commands:
//!   generate - Render companion declarations for a schema or Rust file
//!   check    - Report diagnostics without rendering
//!   init     - Write a default declsynth.yaml

mod cli;

use clap::{Args, Parser, Subcommand};
use declsynth::Target;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Synthesize key mappings and builders for annotated record declarations
#[derive(Parser)]
#[command(name = "declsynth", version, about, arg_required_else_help(true))]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render companion declarations
    Generate(GenerateArgs),
    /// Report diagnostics without rendering
    Check(CheckArgs),
    /// Write a default declsynth.yaml in the current directory
    Init,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Schema (.yaml, .yml, .json) or Rust source (.rs)
    pub input: PathBuf,

    /// Target language (default: from config)
    #[arg(short, long, value_enum)]
    pub target: Option<Target>,

    /// Output file (default: stdout, or one file per target when several are configured)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (default: declsynth.yaml discovered from the working directory)
    #[arg(short, long, env = "DECLSYNTH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory overriding the embedded templates
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Schema (.yaml, .yml, .json) or Rust source (.rs)
    pub input: PathBuf,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Generate(args) => cli::cmd_generate(args),
        Commands::Check(args) => cli::cmd_check(args),
        Commands::Init => cli::cmd_init(),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "declsynth=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
