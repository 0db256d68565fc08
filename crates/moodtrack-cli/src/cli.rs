use clap::{Parser, Subcommand};
use moodtrack_classifiers::CorpusSource;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moodtrack")]
#[command(
    author,
    version,
    about = "Mood journal with sentiment classification"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "MOODTRACK_CONFIG", default_value = "moodtrack.yaml")]
    pub config: PathBuf,

    /// Corpus file, optionally weighted (replaces the configured corpus)
    #[arg(long = "corpus", value_name = "FILE[:WEIGHT]")]
    pub corpus: Vec<CorpusSource>,

    /// Journal file path
    #[arg(short, long)]
    pub journal: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe your day; the entry is classified and saved
    Entry {
        /// Entry text (read from stdin when omitted)
        text: Option<String>,
    },

    /// List saved entries
    History,

    /// Print the sentiment score of each entry in order
    Trend,

    /// Delete all saved entries
    Delete,

    /// Train the classifier and show what it learned
    Inspect {
        /// Number of informative features to list
        #[arg(short, long, default_value = "10")]
        top: usize,
    },
}
