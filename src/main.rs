use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use aideon_contacts::chunk::ChunkConfig;
use aideon_contacts::export;
use aideon_contacts::ingest;
use aideon_contacts::model::ContactGroup;
use aideon_contacts::{ContactError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing(cli.verbose).and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ContactError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Summary(args) => execute_summary(args),
        Command::Split(args) => execute_split(args),
        Command::Export(args) => execute_export(args),
    }
}

fn execute_summary(args: SummaryArgs) -> Result<()> {
    let ingestion = ingest::ingest_path(&args.input, &args.chunking.config())?;
    let json = serde_json::to_string_pretty(&ingestion.summary())?;
    println!("{json}");
    Ok(())
}

fn execute_split(args: SplitArgs) -> Result<()> {
    let ingestion = ingest::ingest_path(&args.input, &args.chunking.config())?;
    fs::create_dir_all(&args.output)?;
    for group in &ingestion.groups {
        let path = write_group(group, args.format, &args.output)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn execute_export(args: ExportArgs) -> Result<()> {
    let ingestion = ingest::ingest_path(&args.input, &args.chunking.config())?;
    let group = ingestion
        .group(args.group)
        .ok_or(ContactError::GroupNotFound {
            ordinal: args.group,
            available: ingestion.groups.len(),
        })?;
    fs::create_dir_all(&args.output)?;
    let path = write_group(group, args.format, &args.output)?;
    println!("{}", path.display());
    Ok(())
}

fn write_group(group: &ContactGroup, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
    match format {
        ExportFormat::Csv => export::export_group(group)?.write_to(dir),
        ExportFormat::Xlsx => export::export_group_xlsx(group)?.write_to(dir),
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Split contact lists into fixed-size groups for batch sending."
)]
struct Cli {
    /// Log pipeline details to stderr. `RUST_LOG` takes precedence.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print contact totals and group ranges as JSON.
    Summary(SummaryArgs),
    /// Write every group to its own file.
    Split(SplitArgs),
    /// Write a single group to a file.
    Export(ExportArgs),
}

#[derive(clap::Args)]
struct ChunkingArgs {
    /// Maximum number of contacts per group.
    #[arg(long, default_value_t = ChunkConfig::default().chunk_size)]
    chunk_size: NonZeroUsize,
}

impl ChunkingArgs {
    fn config(&self) -> ChunkConfig {
        ChunkConfig::default().with_chunk_size(self.chunk_size)
    }
}

#[derive(clap::Args)]
struct SummaryArgs {
    /// Contact list (.csv, .xlsx, or .xls).
    #[arg(long)]
    input: PathBuf,

    #[command(flatten)]
    chunking: ChunkingArgs,
}

#[derive(clap::Args)]
struct SplitArgs {
    /// Contact list (.csv, .xlsx, or .xls).
    #[arg(long)]
    input: PathBuf,

    /// Directory receiving one file per group.
    #[arg(long)]
    output: PathBuf,

    /// File format of the written groups.
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,

    #[command(flatten)]
    chunking: ChunkingArgs,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Contact list (.csv, .xlsx, or .xls).
    #[arg(long)]
    input: PathBuf,

    /// 1-based ordinal of the group to write.
    #[arg(long)]
    group: usize,

    /// Directory receiving the group file.
    #[arg(long)]
    output: PathBuf,

    /// File format of the written group.
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,

    #[command(flatten)]
    chunking: ChunkingArgs,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ExportFormat {
    Csv,
    Xlsx,
}
