use crate::domain::model::ChatRow;
use std::collections::HashSet;

/// Number of distinct `ChatLogID` values. An empty id is its own conversation.
pub fn count_conversations(rows: &[ChatRow]) -> usize {
    rows.iter()
        .map(|row| row.conversation_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_distinct_ids() {
        let rows = vec![
            ChatRow::new("1", Some("visitor"), Some("hi")),
            ChatRow::new("2", Some("visitor"), Some("hello")),
            ChatRow::new("1", Some("agent"), Some("welcome")),
        ];
        assert_eq!(count_conversations(&rows), 2);
    }

    #[test]
    fn test_empty_id_is_a_conversation() {
        let rows = vec![
            ChatRow::new("", Some("visitor"), None),
            ChatRow::new("", Some("agent"), None),
            ChatRow::new("7", Some("agent"), None),
        ];
        assert_eq!(count_conversations(&rows), 2);
    }

    #[test]
    fn test_no_rows() {
        assert_eq!(count_conversations(&[]), 0);
    }
}
