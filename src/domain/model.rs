use crate::domain::counter::OrderedCounter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role assigned to rows whose `UserType` is missing or empty.
pub const UNKNOWN_ROLE: &str = "unknown";
pub const VISITOR_ROLE: &str = "visitor";

/// One transcript line as produced by the CSV parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRow {
    #[serde(rename = "ChatLogID", default)]
    pub conversation_id: String,
    #[serde(rename = "UserType", default)]
    pub user_type: Option<String>,
    #[serde(rename = "MessageText", default)]
    pub message_text: Option<String>,
}

impl ChatRow {
    pub fn new(
        conversation_id: impl Into<String>,
        user_type: Option<&str>,
        message_text: Option<&str>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            user_type: user_type.map(str::to_string),
            message_text: message_text.map(str::to_string),
        }
    }

    /// Normalized role: the raw `UserType`, or `"unknown"` when it is absent.
    pub fn role(&self) -> &str {
        match self.user_type.as_deref() {
            Some(role) if !role.is_empty() => role,
            _ => UNKNOWN_ROLE,
        }
    }

    pub fn is_visitor(&self) -> bool {
        self.user_type.as_deref() == Some(VISITOR_ROLE)
    }

    /// Message text, treating an empty string the same as a missing one.
    pub fn text(&self) -> Option<&str> {
        self.message_text.as_deref().filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueCount {
    pub issue: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureCount {
    pub feature: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Summary of one transcript. Built once by the assembler and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub(crate) conversation_count: usize,
    pub(crate) total_messages: usize,
    pub(crate) messages_by_user_type: OrderedCounter,
    pub(crate) top_issues: Vec<IssueCount>,
    pub(crate) feature_requests: Vec<FeatureCount>,
    pub(crate) sentiment: SentimentCounts,
    pub(crate) raw_data: Vec<ChatRow>,
}

impl AnalysisResult {
    pub fn conversation_count(&self) -> usize {
        self.conversation_count
    }

    pub fn total_messages(&self) -> usize {
        self.total_messages
    }

    pub fn messages_by_user_type(&self) -> &OrderedCounter {
        &self.messages_by_user_type
    }

    pub fn top_issues(&self) -> &[IssueCount] {
        &self.top_issues
    }

    pub fn feature_requests(&self) -> &[FeatureCount] {
        &self.feature_requests
    }

    pub fn sentiment(&self) -> SentimentCounts {
        self.sentiment
    }

    pub fn raw_data(&self) -> &[ChatRow] {
        &self.raw_data
    }
}

/// An analysis stamped with where it came from and when it was produced.
/// Serializes with the result fields at the top level next to the stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub source_name: String,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Json, OutputFormat::Csv];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "chat-analysis.json",
            OutputFormat::Csv => "chat-analysis.csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unsupported output format: {}", other)),
        }
    }
}
