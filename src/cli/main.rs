use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser)]
#[clap(
    version,
    about = "Folders, notes, checklists, and bookmarks from the command line"
)]
pub struct Cli {
    /// Directory holding the data files (defaults to the platform data directory)
    #[clap(short, long, value_parser)]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to run; prints an overview when omitted
    #[clap(subcommand)]
    pub command: Option<Commands>,
}
