use sentiment_eval::{
    cache_path, evaluate_transcript, format_stats, load_transcript_file, plot_confusion_matrices,
    read_cache, write_cache, LanguageClient, LanguageConfig, LinePrompter, Sentiment, SvgHeatmap,
};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_sentence(server: &MockServer, paragraph: &str, score: f64) {
    Mock::given(method("POST"))
        .and(path("/v1/documents:analyzeSentiment"))
        .and(body_string_contains(paragraph))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "documentSentiment": {"magnitude": score.abs(), "score": score},
            "language": "en",
            "sentences": [
                {"text": {"content": paragraph, "beginOffset": 0},
                 "sentiment": {"magnitude": score.abs(), "score": score}}
            ]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn two_speakers_full_run() {
    let dir = tempfile::tempdir().unwrap();
    let transcript = dir.path().join("transcript.json");
    std::fs::write(
        &transcript,
        r#"[
            {"speaker": 0, "transcript": "Sounds great to me."},
            {"speaker": "1", "transcript": "I really hate it."}
        ]"#,
    )
    .unwrap();

    let server = MockServer::start().await;
    mount_sentence(&server, "Sounds great to me.", 0.5).await;
    mount_sentence(&server, "I really hate it.", -0.3).await;

    let paragraphs = load_transcript_file(&transcript).unwrap();
    let client = LanguageClient::new(LanguageConfig::new("test-key", server.uri()));
    let mut prompter = LinePrompter::new("0\n1\n".as_bytes(), Vec::new());

    let stats = evaluate_transcript(&client, &mut prompter, &paragraphs)
        .await
        .unwrap();

    let console = String::from_utf8(prompter.into_output()).unwrap();
    assert!(console.contains("--> Sounds great to me.\n"));
    assert!(console.contains("Google thought it was positive.\n"));
    assert!(console.contains("--> I really hate it.\n"));
    assert!(console.contains("Google thought it was negative.\n"));

    assert_eq!(stats.total(), 2);
    assert!(stats.is_consistent());
    assert_eq!(
        stats.matrix(0).unwrap().cells(),
        &[[1, 0, 0], [0, 0, 0], [0, 0, 0]]
    );
    assert_eq!(
        stats.matrix(1).unwrap().cells(),
        &[[0, 0, 0], [0, 1, 0], [0, 0, 0]]
    );
    assert_eq!(
        stats.matrix(1).unwrap().get(Sentiment::Negative, Sentiment::Negative),
        1
    );

    let report = format_stats(&stats).unwrap();
    assert!(report.starts_with("Overall accuracy: 100.0%\nSpeaker 0:\n"));
    assert!(report.contains("Speaker 1:\nOverall speaker accuracy: 100.0%\n"));

    let plots = plot_confusion_matrices(&SvgHeatmap, &stats, &transcript).unwrap();
    assert_eq!(
        plots,
        vec![
            dir.path().join("transcript_speaker0.svg"),
            dir.path().join("transcript_speaker1.svg"),
        ]
    );
    assert!(plots.iter().all(|p| p.is_file()));

    let cache = cache_path(&transcript);
    assert_eq!(cache, dir.path().join("transcript-userdata.json"));
    write_cache(&stats, &cache).unwrap();

    let cached = read_cache(&cache).unwrap();
    assert_eq!(cached, stats);
    assert_eq!(format_stats(&cached).unwrap(), report);
}

#[tokio::test]
async fn service_failure_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&server)
        .await;

    let paragraphs = sentiment_eval::parse_transcript_json(
        r#"[{"speaker": 0, "transcript": "Hello there."}]"#,
    )
    .unwrap();
    let client = LanguageClient::new(LanguageConfig::new("test-key", server.uri()));
    let mut prompter = LinePrompter::new("0\n".as_bytes(), Vec::new());

    let err = evaluate_transcript(&client, &mut prompter, &paragraphs)
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("500"));
}
