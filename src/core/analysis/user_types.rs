use crate::domain::counter::OrderedCounter;
use crate::domain::model::ChatRow;

/// Messages per role, keyed in the order roles first appear.
pub fn count_by_user_type(rows: &[ChatRow]) -> OrderedCounter {
    let mut counter = OrderedCounter::new();
    for row in rows {
        counter.increment(row.role());
    }
    counter
}
