use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser, Debug)]
#[clap(
    name = "bizplanner",
    version,
    about = "Business planning reminders and onboarding"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Directory holding reminders and settings
    #[clap(long, value_parser)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the bizplanner application
    #[clap(subcommand)]
    pub command: Commands,
}
