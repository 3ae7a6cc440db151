use super::TOP_N;
use crate::domain::counter::OrderedCounter;
use crate::domain::model::{ChatRow, FeatureCount};

/// Enhancement-request indicators. `add` also matches "address" and "additional".
pub const FEATURE_PHRASES: [&str; 10] = [
    "feature",
    "add",
    "would like",
    "could you",
    "should have",
    "missing",
    "need",
    "want",
    "request",
    "improve",
];

const SENTENCE_DELIMITERS: [char; 3] = ['.', '!', '?'];

/// First sentence of `lowered` that mentions `phrase`, trimmed.
///
/// Falls back to the whole text when no single sentence holds the phrase.
pub fn extract_fragment<'a>(lowered: &'a str, phrase: &str) -> &'a str {
    lowered
        .split(SENTENCE_DELIMITERS)
        .find(|segment| segment.contains(phrase))
        .unwrap_or(lowered)
        .trim()
}

pub fn count_feature_fragments(rows: &[ChatRow]) -> OrderedCounter {
    let mut counter = OrderedCounter::new();
    for row in rows.iter().filter(|row| row.is_visitor()) {
        let Some(text) = row.text() else {
            continue;
        };
        let lowered = text.to_lowercase();
        for phrase in FEATURE_PHRASES {
            if lowered.contains(phrase) {
                counter.increment(extract_fragment(&lowered, phrase));
            }
        }
    }
    counter
}

/// Ten most frequent request fragments across visitor messages.
pub fn extract_feature_requests(rows: &[ChatRow]) -> Vec<FeatureCount> {
    let counter = count_feature_fragments(rows);
    tracing::debug!("Collected {} distinct feature fragments", counter.len());

    counter
        .into_top(TOP_N)
        .into_iter()
        .map(|(feature, count)| FeatureCount { feature, count })
        .collect()
}
