use crate::domain::model::{ChatRow, Sentiment, SentimentCounts};

pub const POSITIVE_WORDS: [&str; 7] = [
    "good",
    "great",
    "excellent",
    "thank",
    "thanks",
    "helpful",
    "appreciate",
];

// "unhelpful" also contains "helpful", so it always lands in neutral.
pub const NEGATIVE_WORDS: [&str; 6] = [
    "bad",
    "poor",
    "terrible",
    "awful",
    "unhelpful",
    "disappointed",
];

/// Buckets a single message. Positive and negative cues together cancel out to neutral.
pub fn classify(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let is_positive = POSITIVE_WORDS.iter().any(|word| lowered.contains(word));
    let is_negative = NEGATIVE_WORDS.iter().any(|word| lowered.contains(word));

    match (is_positive, is_negative) {
        (true, false) => Sentiment::Positive,
        (false, true) => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

pub fn tally_sentiment(rows: &[ChatRow]) -> SentimentCounts {
    let mut counts = SentimentCounts::default();
    for text in rows.iter().filter_map(ChatRow::text) {
        counts.record(classify(text));
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_buckets() {
        assert_eq!(classify("Thanks for reporting"), Sentiment::Positive);
        assert_eq!(classify("That was AWFUL"), Sentiment::Negative);
        assert_eq!(classify("This is broken and wrong"), Sentiment::Neutral);
    }

    #[test]
    fn test_mixed_cues_are_neutral() {
        assert_eq!(classify("thanks, but this is terrible"), Sentiment::Neutral);
        assert_eq!(classify("you were unhelpful"), Sentiment::Neutral);
    }

    #[test]
    fn test_tally_skips_rows_without_text() {
        let rows = vec![
            ChatRow::new("1", Some("agent"), Some("Great, glad I could help")),
            ChatRow::new("1", Some("visitor"), None),
            ChatRow::new("1", Some("visitor"), Some("")),
            ChatRow::new("1", Some("visitor"), Some("poor service")),
            ChatRow::new("1", Some("visitor"), Some("ok")),
        ];

        let counts = tally_sentiment(&rows);
        assert_eq!(
            counts,
            SentimentCounts {
                positive: 1,
                negative: 1,
                neutral: 1
            }
        );
        assert_eq!(counts.total(), 3);
    }
}
