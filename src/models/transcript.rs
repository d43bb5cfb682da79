use serde::{Deserialize, Deserializer, Serialize};

/// One speaker-attributed block of transcript text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Numeric speaker identifier; accepted as a JSON integer or an integer string
    #[serde(deserialize_with = "deserialize_speaker")]
    pub speaker: u32,
    /// Paragraph text submitted to the sentiment service
    pub transcript: String,
}

impl Paragraph {
    pub fn new(speaker: u32, transcript: impl Into<String>) -> Self {
        Self {
            speaker,
            transcript: transcript.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpeakerField {
    Number(u32),
    Text(String),
}

fn deserialize_speaker<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match SpeakerField::deserialize(deserializer)? {
        SpeakerField::Number(n) => Ok(n),
        SpeakerField::Text(s) => s.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("speaker {:?} is not a non-negative integer", s))
        }),
    }
}
