use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{info, warn};

use crate::models::{ConfusionMatrix, SentimentStatistics};
use crate::service::Prompter;

/// Marker inserted before the transcript's extension to name its cache file
pub const CACHE_MARKER: &str = "-userdata";

/// Reserved cache key holding the grand sentence count
pub const TOTAL_KEY: &str = "total";

/// Derive the cache file for a transcript: `talk.json` -> `talk-userdata.json`
pub fn cache_path(transcript: &Path) -> PathBuf {
    let mut name = transcript
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(CACHE_MARKER);
    if let Some(ext) = transcript.extension() {
        name.push(".");
        name.push(ext);
    }
    transcript.with_file_name(name)
}

/// Derive a speaker's plot file: `talk.json` -> `talk_speaker{id}.{extension}`
pub fn plot_path(transcript: &Path, speaker: u32, extension: &str) -> PathBuf {
    let mut path = transcript.with_extension("").into_os_string();
    path.push(format!("_speaker{}.{}", speaker, extension));
    PathBuf::from(path)
}

/// Write statistics as `{"<speaker>": [[..]; 3], ..., "total": n}`, replacing any existing file
pub fn write_cache(stats: &SentimentStatistics, path: &Path) -> Result<()> {
    let mut document: IndexMap<String, Value> = IndexMap::new();
    for (speaker, matrix) in stats.speakers() {
        document.insert(speaker.to_string(), serde_json::to_value(matrix)?);
    }
    document.insert(TOTAL_KEY.to_string(), Value::from(stats.total()));

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer(file, &document).context("Failed to write JSON")?;

    info!(
        "Saved {} sentences from {} speakers to {:?}",
        stats.total(),
        stats.speaker_count(),
        path
    );
    Ok(())
}

/// Offer to reuse judgments cached for `transcript`
///
/// Returns the cached statistics only when the cache file exists and the
/// operator answers exactly `y`; any other answer means a fresh run.
pub fn resolve_cache<P>(
    prompter: &mut P,
    transcript: &Path,
) -> Result<Option<SentimentStatistics>>
where
    P: Prompter + ?Sized,
{
    let cache = cache_path(transcript);
    if !cache.is_file() {
        return Ok(None);
    }

    let answer = prompter.ask(&format!(
        "User data was found for {} (in {})!\nWould you like to use it? y/n: ",
        transcript.display(),
        cache.display()
    ))?;
    if answer != "y" {
        return Ok(None);
    }

    info!("Reusing cached judgments from {:?}", cache);
    read_cache(&cache).map(Some)
}

/// Read a cache file written by [`write_cache`]
pub fn read_cache(path: &Path) -> Result<SentimentStatistics> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_cache_json(&content).with_context(|| format!("Invalid cache file: {:?}", path))
}

/// Parse cache JSON, splitting the reserved `total` key from the speaker matrices
pub fn parse_cache_json(json: &str) -> Result<SentimentStatistics> {
    let mut document: IndexMap<String, Value> =
        serde_json::from_str(json).context("Failed to parse cache JSON")?;

    let total = match document.shift_remove(TOTAL_KEY) {
        Some(value) => value
            .as_u64()
            .with_context(|| format!("\"{}\" is not a non-negative integer: {}", TOTAL_KEY, value))?,
        None => bail!("Missing \"{}\" key", TOTAL_KEY),
    };

    let mut speakers = IndexMap::with_capacity(document.len());
    for (key, value) in document {
        let speaker: u32 = key
            .parse()
            .with_context(|| format!("Speaker key {:?} is not an integer", key))?;
        let matrix: ConfusionMatrix = serde_json::from_value(value)
            .with_context(|| format!("Speaker {} does not hold a 3x3 count matrix", speaker))?;
        speakers.insert(speaker, matrix);
    }

    let stats = SentimentStatistics::from_parts(speakers, total);
    if !stats.is_consistent() {
        warn!(
            "Cached total {} differs from the {} sentences in the matrices",
            total,
            stats.cell_total()
        );
    }
    Ok(stats)
}
