use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Default base URL of the Google Cloud Natural Language API
pub const DEFAULT_ENDPOINT: &str = "https://language.googleapis.com";

/// A sentence as segmented by the sentiment service, with its signed score
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceSentiment {
    pub text: String,
    /// Continuous score; positive, negative or exactly zero for neutral
    pub score: f64,
}

impl SentenceSentiment {
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// External sentiment classification capability
#[async_trait]
pub trait SentimentAnalyzer {
    /// Split `text` into sentences and score each one
    async fn analyze_sentiment(&self, text: &str) -> Result<Vec<SentenceSentiment>>;
}

/// Configuration for the Natural Language API client
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// API key (from GOOGLE_API_KEY env var)
    pub api_key: String,
    /// Base URL, overridable with GOOGLE_LANGUAGE_ENDPOINT
    pub endpoint: String,
}

impl LanguageConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .context("GOOGLE_API_KEY environment variable not set")?;
        let endpoint =
            std::env::var("GOOGLE_LANGUAGE_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        Ok(Self::new(api_key, endpoint))
    }

    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }
}

/// Google Cloud Natural Language API client
pub struct LanguageClient {
    client: Client,
    config: LanguageConfig,
}

impl LanguageClient {
    pub fn new(config: LanguageConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SentimentAnalyzer for LanguageClient {
    async fn analyze_sentiment(&self, text: &str) -> Result<Vec<SentenceSentiment>> {
        let request = AnalyzeSentimentRequest {
            document: Document {
                doc_type: "PLAIN_TEXT",
                content: text,
            },
            encoding_type: "UTF8",
        };

        let response = self
            .client
            .post(format!("{}/v1/documents:analyzeSentiment", self.config.endpoint))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Natural Language API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Natural Language API error: {} - {}", status, body);
        }

        let response: AnalyzeSentimentResponse = response
            .json()
            .await
            .context("Failed to parse Natural Language API response")?;

        Ok(response
            .sentences
            .into_iter()
            .map(|s| SentenceSentiment {
                text: s.text.content,
                score: s.sentiment.score,
            })
            .collect())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeSentimentRequest<'a> {
    document: Document<'a>,
    encoding_type: &'static str,
}

#[derive(Debug, Serialize)]
struct Document<'a> {
    #[serde(rename = "type")]
    doc_type: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnalyzeSentimentResponse {
    #[serde(default)]
    sentences: Vec<Sentence>,
}

#[derive(Debug, Deserialize)]
struct Sentence {
    text: TextSpan,
    #[serde(default)]
    sentiment: SentimentScore,
}

#[derive(Debug, Deserialize)]
struct TextSpan {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct SentimentScore {
    #[serde(default)]
    score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_config_trims_endpoint() {
        let config = LanguageConfig::new("key", "http://localhost:8080/");
        assert_eq!(config.endpoint, "http://localhost:8080");
    }

    #[test]
    fn test_parse_response() {
        let json = r#"{
            "documentSentiment": {"magnitude": 1.1, "score": 0.1},
            "language": "en",
            "sentences": [
                {"text": {"content": "I love it.", "beginOffset": 0}, "sentiment": {"magnitude": 0.9, "score": 0.9}},
                {"text": {"content": "It broke.", "beginOffset": 11}, "sentiment": {"magnitude": 0.6, "score": -0.6}},
                {"text": {"content": "Whatever.", "beginOffset": 21}, "sentiment": {}}
            ]
        }"#;

        let response: AnalyzeSentimentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.sentences.len(), 3);
        assert_eq!(response.sentences[0].text.content, "I love it.");
        assert_eq!(response.sentences[1].sentiment.score, -0.6);
        assert_eq!(response.sentences[2].sentiment.score, 0.0);
    }

    #[tokio::test]
    async fn test_analyze_sentiment_against_mock() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/documents:analyzeSentiment"))
            .and(query_param("key", "secret"))
            .and(body_json(serde_json::json!({
                "document": {"type": "PLAIN_TEXT", "content": "Good. Bad."},
                "encodingType": "UTF8"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sentences": [
                    {"text": {"content": "Good.", "beginOffset": 0}, "sentiment": {"magnitude": 0.5, "score": 0.5}},
                    {"text": {"content": "Bad.", "beginOffset": 6}, "sentiment": {"magnitude": 0.3, "score": -0.3}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LanguageClient::new(LanguageConfig::new("secret", server.uri()));
        let sentences = client.analyze_sentiment("Good. Bad.").await.unwrap();

        assert_eq!(
            sentences,
            vec![
                SentenceSentiment::new("Good.", 0.5),
                SentenceSentiment::new("Bad.", -0.3),
            ]
        );
    }

    #[tokio::test]
    async fn test_api_error_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let client = LanguageClient::new(LanguageConfig::new("bad", server.uri()));
        let err = client.analyze_sentiment("Hello.").await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_malformed_response_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = LanguageClient::new(LanguageConfig::new("key", server.uri()));
        assert!(client.analyze_sentiment("Hello.").await.is_err());
    }
}
