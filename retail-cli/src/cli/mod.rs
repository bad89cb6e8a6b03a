//! Command-line surface: argument parsing and the interactive session

pub mod export;
pub mod input;
pub mod menu;
pub mod view;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "retail-cli",
    version,
    about = "Manage retail records stored in an Excel workbook"
)]
pub struct Cli {
    /// Path to the data workbook (.xlsx)
    #[arg(long, short = 'w')]
    pub workbook: PathBuf,

    /// Path to the append-only action log
    #[arg(long, default_value = "retail.log")]
    pub log: PathBuf,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dump one table to stdout or a file
    Export {
        /// Table number: 1 movements, 2 products, 3 categories, 4 stores
        #[arg(long)]
        table: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Export serialization format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}
