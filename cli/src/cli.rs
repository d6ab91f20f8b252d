use std::path::PathBuf;

use clap::Parser;

use crate::config::SearchStrategy;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Finds the best flight route between two cities and ranks every alternative.",
    long_about = None
)]
pub struct Cli {
    /// TOML config file. Without one, the built-in six-city network is used.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Departure city, overriding the config.
    #[arg(long)]
    pub origin: Option<String>,

    /// Arrival city, overriding the config.
    #[arg(long)]
    pub destination: Option<String>,

    /// Search pruning strategy, overriding the config.
    #[arg(long, value_enum)]
    pub search: Option<SearchStrategy>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,
}
