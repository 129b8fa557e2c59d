//! CLI argument definitions for bananas.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "bananas")]
#[command(about = "BananasEdu grade report exporter", version)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the local store file (overrides config)
    #[arg(long, value_name = "FILE", env = "BANANAS_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the stored grade set with averages
    Show {
        /// Learner name for the report heading
        #[arg(short, long)]
        learner: Option<String>,
    },
    /// Export the stored grade set
    Export {
        /// Learner name used in the report and filename
        #[arg(short, long)]
        learner: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Directory for generated files (overrides config)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Don't open the printable report after writing it
        #[arg(long)]
        no_open: bool,
    },
    /// Answer a dashboard data request
    Dispatch {
        /// JSON snapshot of accounts, students and grades
        #[arg(short, long, value_name = "FILE")]
        directory: PathBuf,
        /// Request JSON, e.g. '{"action":"fetch-student","student_id":"S001"}'
        request: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Spreadsheet-friendly CSV file
    Csv,
    /// Printable HTML report
    Html,
    /// JSON report on stdout
    Json,
}
