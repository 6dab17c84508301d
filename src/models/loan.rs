use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: String,
    /// `None` for a loan of a new-release "original" with no physical copy.
    pub copy_id: Option<String>,
    pub book_id: String,
    pub reader_id: String,
    pub start: NaiveDate,
    pub due: NaiveDate,
    pub returned: Option<NaiveDate>,
}

impl Loan {
    pub fn is_open(&self) -> bool {
        self.returned.is_none()
    }

    /// Whole days past due; 0 while the loan is open or when it was
    /// returned on or before the due date.
    pub fn late_days(&self) -> i64 {
        match self.returned {
            Some(returned) if returned > self.due => (returned - self.due).num_days(),
            _ => 0,
        }
    }
}
