use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stampede", version, about = "Benchmark task document toolkit")]
pub struct Cli {
    /// Emit machine-readable JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse and validate task documents.
    Validate {
        /// Task documents to validate (.json, .yaml or .yml).
        #[arg(required = true)]
        tasks: Vec<PathBuf>,
    },
    /// List catalog scenarios, or the runs a document declares.
    List {
        /// Show the runs of this document instead of the catalog.
        #[arg(long)]
        task: Option<PathBuf>,
    },
    /// Evaluate a document's SLAs against an engine results file.
    Check {
        task: PathBuf,
        /// Results file mapping scenario names to iteration records.
        #[arg(long)]
        results: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
