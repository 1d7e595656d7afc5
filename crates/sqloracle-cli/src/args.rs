use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sqloracle_core::config::CliOverrides;

#[derive(Parser, Debug)]
#[command(
    name = "sqloracle",
    version,
    about = "Predict statement validity by running oracles over the corpus"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub predict: PredictArgs,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Predict every unpredicted statement (the default)
    Predict,
    /// Print the available oracles and their versions
    ListOracles,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PredictArgs {
    /// Config file (default: ./sqloracle.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the corpus database
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Oracles to run, comma separated (see `list-oracles`)
    #[arg(long, value_delimiter = ',', global = true)]
    pub oracles: Option<Vec<String>>,

    /// Language of the statements to predict
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Postgres versions to run against, comma separated
    #[arg(long, value_delimiter = ',', global = true)]
    pub versions: Option<Vec<String>>,

    /// Print what would run without running it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Render progress (default: when stdout is a terminal)
    #[arg(long, overrides_with = "no_progress", global = true)]
    pub progress: bool,

    /// Never render progress
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Number of workers
    #[arg(long, global = true)]
    pub parallelism: Option<usize>,

    /// Predictions per insert
    #[arg(long, global = true)]
    pub batch_size: Option<usize>,
}

impl PredictArgs {
    pub fn overrides(&self) -> CliOverrides {
        let progress = match (self.progress, self.no_progress) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        };
        CliOverrides {
            corpus: self.corpus.clone(),
            oracles: self.oracles.clone(),
            language: self.language.clone(),
            versions: self.versions.clone(),
            parallelism: self.parallelism,
            batch_size: self.batch_size,
            progress,
            dry_run: self.dry_run.then_some(true),
        }
    }
}
