//! MoodTrack
//!
//! Mood journal for the command line. Each entry is classified as positive,
//! neutral or negative by a Naive Bayes model trained on labeled tweets at
//! startup, saved to a JSON journal, and answered with a short supportive
//! message when one applies.

use anyhow::{Context, Result};
use clap::Parser;
use moodtrack_classifiers::{Classifier, PipelineBuilder, SentimentPipeline};
use moodtrack_core::Error;
use moodtrack_journal::Journal;
use std::io::{self, BufRead, Write};
use tracing::info;

mod cli;
mod config;

use cli::{Cli, Commands};
use config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config = AppConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded, journal at {:?}", config.journal_path);

    match cli.command {
        Commands::Entry { text } => run_entry(&config, text),
        Commands::History => run_history(&config),
        Commands::Trend => run_trend(&config),
        Commands::Delete => run_delete(&config),
        Commands::Inspect { top } => run_inspect(&config, top),
    }
}

/// Train the classifier from the configured corpus
fn init_pipeline(config: &AppConfig) -> Result<SentimentPipeline> {
    eprintln!("Please wait while the sentiment classifier initializes.");
    PipelineBuilder::from_config(&config.pipeline)
        .build()
        .context("Failed to initialize the sentiment classifier")
}

fn run_entry(config: &AppConfig, text: Option<String>) -> Result<()> {
    let text = match text {
        Some(text) => text,
        None => prompt_entry()?,
    };

    let pipeline = init_pipeline(config)?;
    let result = pipeline.classify(&text)?;

    println!("\nYour entry was overall {}.", result.label);
    if let Some(response) = result.response() {
        println!("{}", response);
    }

    let mut journal = Journal::open(&config.journal_path)?;
    journal.record(text, result.label)?;
    info!("Recorded entry {} in {:?}", journal.len(), journal.path());

    Ok(())
}

fn prompt_entry() -> Result<String> {
    println!("Please describe your day and how you feel about it.");
    println!("Stick to one general tone in your entry; sarcasm is not understood.");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim().to_string();
    if line.is_empty() {
        anyhow::bail!("no entry text given");
    }
    Ok(line)
}

fn run_history(config: &AppConfig) -> Result<()> {
    let journal = Journal::open(&config.journal_path)?;
    if journal.is_empty() {
        println!("No entries yet.");
        return Ok(());
    }

    for (i, entry) in journal.entries().iter().enumerate() {
        println!(
            "{:>3}. [{}] {:<8} {}",
            i + 1,
            entry.recorded_at.format("%Y-%m-%d %H:%M"),
            entry.sentiment,
            entry.text
        );
    }

    let summary: Vec<String> = journal
        .counts()
        .iter()
        .map(|(sentiment, count)| format!("{} {}", count, sentiment))
        .collect();
    println!("\n{} entries: {}", journal.len(), summary.join(", "));

    Ok(())
}

fn run_trend(config: &AppConfig) -> Result<()> {
    let journal = Journal::open(&config.journal_path)?;

    match journal.trend() {
        Ok(points) => {
            println!("entry\tscore\tsentiment");
            for point in points {
                println!("{}\t{:+}\t{}", point.entry, point.score, point.sentiment);
            }
            Ok(())
        }
        Err(Error::Journal(reason)) => {
            println!("Sorry, there is not enough data for a trend yet. Make a new entry first.");
            info!("{}", reason);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn run_delete(config: &AppConfig) -> Result<()> {
    let mut journal = Journal::open(&config.journal_path)?;
    journal.clear()?;
    println!("You have deleted all of your entries.");
    Ok(())
}

fn run_inspect(config: &AppConfig, top: usize) -> Result<()> {
    let pipeline = init_pipeline(config)?;
    let model = pipeline.model();
    let vocabulary = pipeline.vocabulary();

    println!("Vocabulary: {} words ({})", vocabulary.len(), vocabulary.fingerprint());
    println!("Smoothing:  {}", model.smoothing());
    for label in model.labels() {
        println!("P({:<8}) = {:.4}", label, model.prior(label).unwrap_or_default());
    }

    let features = model.most_informative_features(vocabulary, top)?;
    if !features.is_empty() {
        println!("\nMost informative features:");
        for feature in features {
            let name = format!(
                "{} = {}",
                moodtrack_classifiers::feature_name(&feature.word),
                if feature.present { "True" } else { "False" }
            );
            println!(
                "{:>32} {:>8} : {:<8} = {:>8.1} : 1.0",
                name,
                feature.most_likely,
                feature.least_likely,
                feature.ratio
            );
        }
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("moodtrack=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moodtrack=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
