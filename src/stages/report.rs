use thiserror::Error;

use crate::models::{ConfusionMatrix, Sentiment, SentimentStatistics};

/// Errors raised while computing accuracy statistics
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("cannot compute {what}: no sentences were evaluated")]
    ZeroDenominator { what: &'static str },
}

/// `part` as a percentage of `whole`
pub fn percentage(part: u64, whole: u64, what: &'static str) -> Result<f64, StatsError> {
    if whole == 0 {
        return Err(StatsError::ZeroDenominator { what });
    }
    Ok(100.0 * part as f64 / whole as f64)
}

/// Render the accuracy report: overall accuracy, then a breakdown per speaker
pub fn format_stats(stats: &SentimentStatistics) -> Result<String, StatsError> {
    let mut output = String::new();

    let overall = percentage(stats.agreements(), stats.total(), "overall accuracy")?;
    output.push_str(&format!("Overall accuracy: {:.1}%\n", overall));

    for (speaker, matrix) in stats.speakers() {
        output.push_str(&format!("Speaker {}:\n", speaker));
        output.push_str(&format_speaker(speaker, matrix)?);
    }

    Ok(output)
}

/// Breakdown for one speaker's matrix
pub fn format_speaker(speaker: u32, matrix: &ConfusionMatrix) -> Result<String, StatsError> {
    let speaker_total = matrix.total();
    if speaker_total == 0 {
        return Ok(format!("No statements recorded for speaker {}\n", speaker));
    }

    let mut output = String::new();

    let accuracy = percentage(matrix.agreements(), speaker_total, "speaker accuracy")?;
    output.push_str(&format!("Overall speaker accuracy: {:.1}%\n", accuracy));

    output.push_str(&accurate_stats(matrix, speaker_total)?);
    output.push_str(&inaccurate_stats(matrix, speaker_total)?);
    output.push_str(&correct_of_service_labels(matrix)?);

    Ok(output)
}

/// Share of each human-labeled category the service matched
fn accurate_stats(matrix: &ConfusionMatrix, speaker_total: u64) -> Result<String, StatsError> {
    let mut output = String::new();

    for category in Sentiment::ALL {
        let row = matrix.row_sum(category);
        if row == 0 {
            output.push_str(&format!("No {} statements found!\n", category.short_name()));
            continue;
        }

        let accurate = matrix.get(category, category);
        output.push_str(&format!(
            "Accurate ID of {:.1}% of {} stmts, {:.1}% of speaker total\n",
            percentage(accurate, row, "category accuracy")?,
            category.short_name(),
            percentage(accurate, speaker_total, "speaker share")?
        ));
    }

    Ok(output)
}

/// Every off-diagonal cell, zero counts included
fn inaccurate_stats(matrix: &ConfusionMatrix, speaker_total: u64) -> Result<String, StatsError> {
    let mut output = String::new();

    for human in Sentiment::ALL {
        for service in Sentiment::ALL {
            if human == service {
                continue;
            }
            let count = matrix.get(human, service);
            output.push_str(&format!(
                "Incorrect ID of {} {} stmts as {}: {:.1}% of speaker total\n",
                count,
                human.short_name(),
                service.short_name(),
                percentage(count, speaker_total, "speaker share")?
            ));
        }
    }

    Ok(output)
}

/// Share of each service-assigned category the operator agreed with
fn correct_of_service_labels(matrix: &ConfusionMatrix) -> Result<String, StatsError> {
    let mut output = String::new();

    for category in Sentiment::ALL {
        let column = matrix.column_sum(category);
        if column == 0 {
            output.push_str(&format!("No {} statements found!\n", category.short_name()));
            continue;
        }

        output.push_str(&format!(
            "{:.1}% of stmts Google thought were {} were actually {}\n",
            percentage(matrix.get(category, category), column, "service precision")?,
            category.short_name(),
            category.short_name()
        ));
    }

    Ok(output)
}
