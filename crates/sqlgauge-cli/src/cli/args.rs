use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sqlgauge",
    version,
    about = "Execution-grounded evaluation harness for text-to-SQL generators"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Run(RunArgs),
    Init(InitArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(long, default_value = "sqlgauge.yaml")]
    pub config: PathBuf,

    /// Provisioned reference database (overrides the config)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Corpus of {question, sql} pairs (overrides the config)
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Where the JSON report lands
    #[arg(long, default_value = "report.json")]
    pub out: PathBuf,

    /// Generator provider: openai|replay
    #[arg(long, default_value = "openai")]
    pub generator: String,

    /// Recorded {question -> sql} predictions for --generator replay
    #[arg(long)]
    pub predictions: Option<PathBuf>,

    /// Test subset size (overrides the config)
    #[arg(long)]
    pub count: Option<usize>,

    /// Selection seed (overrides the config)
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, env = "SQLGAUGE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OpenAI-compatible endpoint base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Similarity scorer: matching_blocks|levenshtein
    #[arg(long)]
    pub scorer: Option<String>,

    /// Keep reference-corpus defects in the execution-accuracy denominator
    #[arg(long)]
    pub count_reference_defects: bool,

    /// CI gate: exit non-zero when execution accuracy falls below this
    #[arg(long)]
    pub min_execution_accuracy: Option<f64>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(long, default_value = "sqlgauge.yaml")]
    pub config: PathBuf,
}
