use clap::{Parser, Subcommand, ValueEnum};
use reconcile_core::ExportFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "reconcile",
    version,
    about = "Compare two sets of cluster results and export the differences"
)]
pub struct Cli {
    /// Make messages verbose
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two sets of results, each set stored in its own directory
    Compare(CompareArgs),
    /// List clusters with results stored in a directory
    List(ListArgs),
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl From<OutputFormat> for ExportFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Csv => ExportFormat::Csv,
            OutputFormat::Json => ExportFormat::Json,
        }
    }
}

#[derive(Parser, Clone, Debug)]
pub struct CompareArgs {
    /// First directory containing set of results
    #[arg(short = '1', long, alias = "directory1")]
    pub left: PathBuf,

    /// Second directory containing set of results
    #[arg(short = '2', long, alias = "directory2")]
    pub right: PathBuf,

    /// Name of the file with exported comparison results [default: report.csv]
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Export format [default: csv]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// JSON file with info about data pipeline components to add to the report
    #[arg(short = 'i', long)]
    pub env_info: Option<PathBuf>,

    /// Number of clusters compared concurrently [default: 4]
    #[arg(long, env = "RECONCILE_PARALLEL")]
    pub parallel: Option<usize>,

    /// File name suffix of result documents [default: .json]
    #[arg(long)]
    pub suffix: Option<String>,

    /// YAML config file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exit with code 1 when results differ, fail, or are present on one side only
    #[arg(long)]
    pub fail_on_diff: bool,
}

#[derive(Parser, Clone, Debug)]
pub struct ListArgs {
    /// Directory containing set of results
    #[arg(short, long)]
    pub dir: PathBuf,

    /// File name suffix of result documents
    #[arg(long, default_value = ".json")]
    pub suffix: String,
}
