pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use crate::core::analysis::{analyze, analyze_concurrently};
pub use app::pipelines::analysis_pipeline::{AnalysisPipeline, STDIN_INPUT};
pub use crate::core::{etl::AnalysisEngine, parser::TranscriptParser};
pub use domain::model::{
    AnalysisReport, AnalysisResult, ChatRow, FeatureCount, IssueCount, OutputFormat, Sentiment,
    SentimentCounts,
};
pub use utils::error::{AnalyzerError, Result};
