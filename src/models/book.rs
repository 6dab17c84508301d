use serde::{Deserialize, Serialize};

/// Author of a [`Book`]. Both fields are opaque display strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub full_name: String,
    pub birth_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub author: Author,
    pub edition: String,
    /// New releases circulate without physical copies: a single
    /// non-physical "original" can be lent, to one reader at a time.
    pub is_new_release: bool,
}
