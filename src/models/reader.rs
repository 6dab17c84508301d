use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reader {
    pub id: String,
    pub email: String,
    /// Late-return penalty: borrowing is blocked while today is on or
    /// before this date.
    pub active_ban_until: Option<NaiveDate>,
    /// Ids of currently open loans. Insertion order, not meaningful.
    pub active_loan_ids: Vec<String>,
}

impl Reader {
    /// A reader may borrow iff not banned as of `today` (the ban end date
    /// itself still counts as banned) and fewer than `max_active_loans`
    /// loans are open.
    pub fn can_borrow(&self, today: NaiveDate, max_active_loans: usize) -> bool {
        let banned = self.active_ban_until.is_some_and(|until| today <= until);
        !banned && self.active_loan_ids.len() < max_active_loans
    }
}
