use crate::domain::counter::OrderedCounter;
use crate::domain::model::{AnalysisResult, ChatRow, FeatureCount, IssueCount, SentimentCounts};

/// Outputs of the independent analysis passes, waiting to be merged.
#[derive(Debug, Clone, Default)]
pub struct AnalysisParts {
    pub conversation_count: usize,
    pub messages_by_user_type: OrderedCounter,
    pub top_issues: Vec<IssueCount>,
    pub sentiment: SentimentCounts,
    pub feature_requests: Vec<FeatureCount>,
}

pub struct ResultAssembler;

impl ResultAssembler {
    /// Merges pass outputs and keeps the untouched rows for export.
    pub fn assemble(parts: AnalysisParts, raw_data: Vec<ChatRow>) -> AnalysisResult {
        AnalysisResult {
            conversation_count: parts.conversation_count,
            total_messages: raw_data.len(),
            messages_by_user_type: parts.messages_by_user_type,
            top_issues: parts.top_issues,
            feature_requests: parts.feature_requests,
            sentiment: parts.sentiment,
            raw_data,
        }
    }
}
