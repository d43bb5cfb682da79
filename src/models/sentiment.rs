use std::fmt;

use thiserror::Error;

/// A sentiment judgment, shared by the human and the service axes of a confusion matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive = 0,
    Negative = 1,
    Neutral = 2,
}

/// Errors raised while reading a human label
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("label {input:?} is not an integer")]
    NotAnInteger { input: String },
    #[error("label {value} is out of range (expected 0, 1 or 2)")]
    OutOfRange { value: i64 },
}

impl Sentiment {
    /// All categories in matrix index order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Bucket a continuous service score into a category
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Sentiment::Positive
        } else if score < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Look up a category by its matrix index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse an operator-entered label (`0`, `1` or `2`)
    pub fn parse_label(input: &str) -> Result<Self, LabelError> {
        let trimmed = input.trim();
        let value: i64 = trimmed.parse().map_err(|_| LabelError::NotAnInteger {
            input: trimmed.to_string(),
        })?;

        usize::try_from(value)
            .ok()
            .and_then(Self::from_index)
            .ok_or(LabelError::OutOfRange { value })
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Abbreviation used in reports and plot ticks
    pub fn short_name(self) -> &'static str {
        match self {
            Sentiment::Positive => "posi",
            Sentiment::Negative => "neg",
            Sentiment::Neutral => "neut",
        }
    }

    pub fn word(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}
