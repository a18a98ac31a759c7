use std::path::PathBuf;

use clap::{Parser, Subcommand};
use soc_categories::pipeline::{self, PipelineConfig};
use soc_categories::{Result, SocError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Collapse(args) => execute_collapse(args),
    }
}

fn execute_collapse(args: CollapseArgs) -> Result<()> {
    if !args.data_dir.exists() {
        return Err(SocError::MissingInput(args.data_dir));
    }

    println!("Phase 1: SOC → Categories → Jobs");

    let preview = args.preview;
    let config = PipelineConfig::from(args);
    let outcome = pipeline::run(&config)?;

    println!(
        "Phase 1 complete. Output saved to {}",
        outcome.output.display()
    );
    if preview > 0 {
        print!("{}", outcome.summary.preview(preview));
    }
    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|error| SocError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Collapse O*NET work-context workbooks into categorized SOC scores."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge the recognized workbooks and write one median row per occupation.
    Collapse(CollapseArgs),
}

#[derive(clap::Args)]
struct CollapseArgs {
    /// Directory holding the source workbooks.
    #[arg(long)]
    data_dir: PathBuf,

    /// Output workbook path. Defaults to SOC_Categories_Phase1.xlsx in the data directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Number of output rows to print once the run completes.
    #[arg(long, default_value_t = 10)]
    preview: usize,

    /// Optional path for a JSON summary of the run.
    #[arg(long)]
    report: Option<PathBuf>,
}

impl From<CollapseArgs> for PipelineConfig {
    fn from(args: CollapseArgs) -> Self {
        Self {
            data_dir: args.data_dir,
            output: args.output,
            report: args.report,
        }
    }
}
