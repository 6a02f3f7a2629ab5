use crate::client::DEFAULT_ANALYZE_URL;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "adorescore-dashboard")]
#[command(
    author,
    version,
    about = "Explore precomputed Adorescore results and analyze new reviews"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard JSON server
    Start {
        /// Listen port
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        /// Results CSV produced by batch analysis
        #[arg(short, long, env = "ADORESCORE_DATASET", default_value = "merged_results.csv")]
        dataset: PathBuf,

        /// Analysis API endpoint used for ad-hoc text
        #[arg(long, env = "ADORESCORE_API_URL", default_value = DEFAULT_ANALYZE_URL)]
        api_url: String,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print a filtered summary of the dataset
    Summary {
        /// Results CSV produced by batch analysis
        #[arg(short, long, env = "ADORESCORE_DATASET", default_value = "merged_results.csv")]
        dataset: PathBuf,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Sentiments to include (comma-separated)
        #[arg(long)]
        sentiments: Option<String>,

        /// Emotions to include (comma-separated)
        #[arg(long)]
        emotions: Option<String>,

        /// Lowest adorescore to include
        #[arg(long, allow_hyphen_values = true)]
        min: Option<f64>,

        /// Highest adorescore to include
        #[arg(long, allow_hyphen_values = true)]
        max: Option<f64>,

        /// Case-insensitive theme search
        #[arg(short, long)]
        search: Option<String>,

        /// Themes to include (comma-separated)
        #[arg(long)]
        themes: Option<String>,

        /// Subtopics to include (comma-separated)
        #[arg(long)]
        subtopics: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
