use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Sentiment;

/// Per-speaker 3x3 table of counts, indexed `[human][service]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfusionMatrix {
    cells: [[u64; 3]; 3],
}

impl ConfusionMatrix {
    pub fn from_cells(cells: [[u64; 3]; 3]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[[u64; 3]; 3] {
        &self.cells
    }

    pub fn get(&self, human: Sentiment, service: Sentiment) -> u64 {
        self.cells[human.index()][service.index()]
    }

    /// Count one sentence judged `human` by the operator and `service` by the service
    pub fn record(&mut self, human: Sentiment, service: Sentiment) {
        self.cells[human.index()][service.index()] += 1;
    }

    /// Number of sentences where both judgments agree
    pub fn agreements(&self) -> u64 {
        Sentiment::ALL.iter().map(|&s| self.get(s, s)).sum()
    }

    /// Sentences the operator labeled `human`
    pub fn row_sum(&self, human: Sentiment) -> u64 {
        self.cells[human.index()].iter().sum()
    }

    /// Sentences the service assigned `service`
    pub fn column_sum(&self, service: Sentiment) -> u64 {
        self.cells.iter().map(|row| row[service.index()]).sum()
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }

    /// Largest single cell, used to scale plot colors
    pub fn max_cell(&self) -> u64 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Confusion matrices for every speaker, in order of first appearance, plus the grand total
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentStatistics {
    speakers: IndexMap<u32, ConfusionMatrix>,
    total: u64,
}

impl SentimentStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild statistics from stored parts, e.g. a cache file
    pub fn from_parts(speakers: IndexMap<u32, ConfusionMatrix>, total: u64) -> Self {
        Self { speakers, total }
    }

    /// Register a speaker with an empty matrix if it has not been seen yet
    pub fn ensure_speaker(&mut self, speaker: u32) -> &mut ConfusionMatrix {
        self.speakers.entry(speaker).or_default()
    }

    pub fn record(&mut self, speaker: u32, human: Sentiment, service: Sentiment) {
        self.ensure_speaker(speaker).record(human, service);
        self.total += 1;
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn matrix(&self, speaker: u32) -> Option<&ConfusionMatrix> {
        self.speakers.get(&speaker)
    }

    /// Speakers and their matrices in insertion order
    pub fn speakers(&self) -> impl Iterator<Item = (u32, &ConfusionMatrix)> {
        self.speakers.iter().map(|(&id, m)| (id, m))
    }

    pub fn speaker_count(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }

    /// Agreements summed over every speaker
    pub fn agreements(&self) -> u64 {
        self.speakers.values().map(ConfusionMatrix::agreements).sum()
    }

    /// Sum of every cell of every matrix; equals `total` for consistent data
    pub fn cell_total(&self) -> u64 {
        self.speakers.values().map(ConfusionMatrix::total).sum()
    }

    pub fn is_consistent(&self) -> bool {
        self.cell_total() == self.total
    }
}
