use serde::{Deserialize, Serialize};

/// Availability status of a physical copy.
/// Valid values:
/// - `IN_LIBRARY`: on shelf, can be loaned
/// - `LOANED`: currently lent out (has an open loan)
/// - `RESERVED`, `LATE`, `REPAIR`: reserved for future workflows; the
///   circulation rules never set them today
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CopyStatus {
    InLibrary,
    Loaned,
    Reserved,
    Late,
    Repair,
}

/// A physical instance of a book, loanable independently of its siblings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Copy {
    pub id: String,
    pub book_id: String,
    pub status: CopyStatus,
}
