pub mod io;
pub mod models;
pub mod service;
pub mod stages;

pub use io::{
    cache_path, load_transcript_file, parse_transcript_json, plot_path, read_cache, resolve_cache,
    write_cache,
};
pub use models::{ConfusionMatrix, LabelError, Paragraph, Sentiment, SentimentStatistics};
pub use service::{
    ConsolePrompter, LanguageClient, LanguageConfig, LinePrompter, Prompter, SentenceSentiment,
    SentimentAnalyzer,
};
pub use stages::{
    evaluate_transcript, format_stats, plot_confusion_matrices, HeatmapRenderer, StatsError,
    SvgHeatmap,
};
