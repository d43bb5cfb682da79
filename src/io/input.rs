use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Paragraph;

/// Parse a transcript JSON file into its ordered paragraphs
pub fn load_transcript_file(path: &Path) -> Result<Vec<Paragraph>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_transcript_json(&content).with_context(|| format!("Invalid transcript: {:?}", path))
}

/// Parse a transcript JSON string: an array of `{"speaker", "transcript"}` records
pub fn parse_transcript_json(json: &str) -> Result<Vec<Paragraph>> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(json).context("Failed to parse transcript JSON")?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value::<Paragraph>(record)
                .with_context(|| format!("Invalid paragraph {}", index))
        })
        .collect()
}
