//! Row to summary transform.
//!
//! Each pass reads the same rows and keeps its own counters, so the passes can
//! run in any order or side by side and still produce the same result.

pub mod assembler;
pub mod conversations;
pub mod features;
pub mod issues;
pub mod sentiment;
pub mod user_types;

use crate::domain::model::{AnalysisResult, ChatRow};
use crate::utils::error::{AnalyzerError, Result};
use assembler::{AnalysisParts, ResultAssembler};
use std::sync::Arc;

/// Length cap for the ranked issue and feature lists.
pub const TOP_N: usize = 10;

pub fn analyze(rows: Vec<ChatRow>) -> AnalysisResult {
    let parts = AnalysisParts {
        conversation_count: conversations::count_conversations(&rows),
        messages_by_user_type: user_types::count_by_user_type(&rows),
        top_issues: issues::detect_issues(&rows),
        sentiment: sentiment::tally_sentiment(&rows),
        feature_requests: features::extract_feature_requests(&rows),
    };
    finish(parts, rows)
}

/// Same result as [`analyze`], with each pass on the blocking pool.
pub async fn analyze_concurrently(rows: Vec<ChatRow>) -> Result<AnalysisResult> {
    let shared = Arc::new(rows);
    let (conversation_count, messages_by_user_type, top_issues, sentiment, feature_requests) =
        tokio::try_join!(
            run_pass(&shared, conversations::count_conversations),
            run_pass(&shared, user_types::count_by_user_type),
            run_pass(&shared, issues::detect_issues),
            run_pass(&shared, sentiment::tally_sentiment),
            run_pass(&shared, features::extract_feature_requests),
        )?;

    let parts = AnalysisParts {
        conversation_count,
        messages_by_user_type,
        top_issues,
        sentiment,
        feature_requests,
    };
    let rows = Arc::try_unwrap(shared).unwrap_or_else(|rows| rows.as_ref().clone());
    Ok(finish(parts, rows))
}

async fn run_pass<T, F>(rows: &Arc<Vec<ChatRow>>, pass: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&[ChatRow]) -> T + Send + 'static,
{
    let rows = Arc::clone(rows);
    tokio::task::spawn_blocking(move || pass(rows.as_slice()))
        .await
        .map_err(|e| AnalyzerError::ProcessingError {
            message: format!("analysis pass failed: {}", e),
        })
}

fn finish(parts: AnalysisParts, rows: Vec<ChatRow>) -> AnalysisResult {
    let result = ResultAssembler::assemble(parts, rows);
    tracing::debug!(
        conversations = result.conversation_count(),
        messages = result.total_messages(),
        issues = result.top_issues().len(),
        features = result.feature_requests().len(),
        "Analysis complete"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<ChatRow> {
        vec![
            ChatRow::new("1", Some("visitor"), Some("The export is broken")),
            ChatRow::new("1", Some("agent"), Some("Thanks, looking into it")),
            ChatRow::new("2", Some("visitor"), Some("Could you add dark mode?")),
            ChatRow::new("2", None, None),
            ChatRow::new("", Some("visitor"), Some("terrible experience, bug everywhere")),
        ]
    }

    #[test]
    fn test_empty_input() {
        let result = analyze(Vec::new());

        assert_eq!(result.conversation_count(), 0);
        assert_eq!(result.total_messages(), 0);
        assert!(result.messages_by_user_type().is_empty());
        assert!(result.top_issues().is_empty());
        assert!(result.feature_requests().is_empty());
        assert_eq!(result.sentiment().total(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() {
        let concurrent = analyze_concurrently(sample_rows()).await.unwrap();
        assert_eq!(analyze(sample_rows()), concurrent);
        assert_eq!(concurrent.raw_data(), sample_rows().as_slice());
    }

    #[tokio::test]
    async fn test_concurrent_empty_input() {
        let result = analyze_concurrently(Vec::new()).await.unwrap();
        assert_eq!(result, analyze(Vec::new()));
    }

    #[test]
    fn test_counts_line_up() {
        let result = analyze(sample_rows());

        assert_eq!(result.conversation_count(), 3);
        assert_eq!(result.total_messages(), 5);
        assert_eq!(result.messages_by_user_type().total(), 5);
        assert_eq!(result.sentiment().total(), 4);
    }
}
