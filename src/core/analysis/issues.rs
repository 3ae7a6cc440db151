use super::TOP_N;
use crate::domain::counter::OrderedCounter;
use crate::domain::model::{ChatRow, IssueCount};

/// Complaint indicators searched for in visitor messages.
///
/// Matching is plain substring search on lower-cased text, so `bug` also hits
/// "debug", `error` hits "errors" and `issue` hits "tissue".
pub const ISSUE_KEYWORDS: [&str; 10] = [
    "error",
    "problem",
    "issue",
    "broken",
    "doesn't work",
    "failed",
    "bug",
    "wrong",
    "incorrect",
    "not working",
];

/// Keywords present in `lowered`, in vocabulary order.
pub fn matching_keywords(lowered: &str) -> impl Iterator<Item = &'static str> + '_ {
    ISSUE_KEYWORDS
        .iter()
        .copied()
        .filter(move |keyword| lowered.contains(keyword))
}

pub fn count_issue_keywords(rows: &[ChatRow]) -> OrderedCounter {
    let mut counter = OrderedCounter::new();
    for row in rows.iter().filter(|row| row.is_visitor()) {
        let Some(text) = row.text() else {
            continue;
        };
        let lowered = text.to_lowercase();
        for keyword in matching_keywords(&lowered) {
            counter.increment(keyword);
        }
    }
    counter
}

/// Ten most frequent issue keywords across visitor messages.
pub fn detect_issues(rows: &[ChatRow]) -> Vec<IssueCount> {
    let counter = count_issue_keywords(rows);
    tracing::debug!("Matched {} distinct issue keywords", counter.len());

    counter
        .into_top(TOP_N)
        .into_iter()
        .map(|(issue, count)| IssueCount { issue, count })
        .collect()
}
