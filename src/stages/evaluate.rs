use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::models::{Paragraph, Sentiment, SentimentStatistics};
use crate::service::{Prompter, SentimentAnalyzer};

pub const LABEL_PROMPT: &str = "Enter 0 for positive, 1 for negative, 2 for neutral: ";

/// Run the human-in-the-loop evaluation
///
/// For each paragraph in order:
/// 1. Register the speaker with an empty matrix on first sight
/// 2. Submit the paragraph text to the sentiment service
/// 3. For each returned sentence, show it, read the operator's label,
///    report the service's category and tally the pair
///
/// Any service or input failure aborts the run; nothing is salvaged.
pub async fn evaluate_transcript<A, P>(
    analyzer: &A,
    prompter: &mut P,
    paragraphs: &[Paragraph],
) -> Result<SentimentStatistics>
where
    A: SentimentAnalyzer + ?Sized,
    P: Prompter + ?Sized,
{
    let mut stats = SentimentStatistics::new();

    for (index, paragraph) in paragraphs.iter().enumerate() {
        stats.ensure_speaker(paragraph.speaker);

        let sentences = analyzer
            .analyze_sentiment(&paragraph.transcript)
            .await
            .with_context(|| format!("Sentiment analysis failed for paragraph {}", index))?;

        debug!(
            "Paragraph {} (speaker {}): {} sentences",
            index,
            paragraph.speaker,
            sentences.len()
        );

        for sentence in sentences {
            let service = Sentiment::from_score(sentence.score);

            prompter.say(&format!("--> {}", sentence.text))?;
            let answer = prompter.ask(LABEL_PROMPT)?;
            let human = Sentiment::parse_label(&answer).context("Invalid label")?;
            prompter.say(&format!("Google thought it was {}.", service.word()))?;

            stats.record(paragraph.speaker, human, service);
        }
    }

    info!(
        "Evaluated {} sentences from {} speakers",
        stats.total(),
        stats.speaker_count()
    );

    Ok(stats)
}
