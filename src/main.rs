use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sentiment_eval::{
    cache_path, evaluate_transcript, format_stats, load_transcript_file, plot_confusion_matrices,
    resolve_cache, write_cache, ConsolePrompter, LanguageClient, LanguageConfig, Prompter,
    SentimentStatistics, SvgHeatmap,
};

#[derive(Parser)]
#[command(name = "sentiment-eval")]
#[command(author, version, about = "Measure sentiment API accuracy against human judgment", long_about = None)]
struct Cli {
    /// The filename of the transcript you'd like to analyze
    transcript: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();
    run(&cli.transcript).await
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn run(transcript: &Path) -> Result<()> {
    info!("Loading transcript from {:?}", transcript);
    let paragraphs =
        load_transcript_file(transcript).context("Failed to load input transcript")?;
    let speakers: HashSet<u32> = paragraphs.iter().map(|p| p.speaker).collect();
    info!(
        "Loaded {} paragraphs, {} speakers",
        paragraphs.len(),
        speakers.len()
    );

    let mut prompter = ConsolePrompter::console();

    if let Some(stats) = resolve_cache(&mut prompter, transcript)? {
        report(&stats, transcript)?;
        return Ok(());
    }

    prompter.say("Analyzing accuracy of Google Cloud Natural Language API....")?;

    let client = LanguageClient::new(LanguageConfig::from_env()?);
    let stats = evaluate_transcript(&client, &mut prompter, &paragraphs).await?;

    prompter.say("Done!")?;

    report(&stats, transcript)?;

    let cache = cache_path(transcript);
    prompter.say(&format!("Saving data to {}....", cache.display()))?;
    write_cache(&stats, &cache)?;
    prompter.say("Done!")?;

    Ok(())
}

/// Print the accuracy statistics and write one heat-map per speaker
fn report(stats: &SentimentStatistics, transcript: &Path) -> Result<()> {
    print!("{}", format_stats(stats)?);
    let plots = plot_confusion_matrices(&SvgHeatmap, stats, transcript)?;
    info!("Wrote {} confusion matrix plots", plots.len());
    Ok(())
}
