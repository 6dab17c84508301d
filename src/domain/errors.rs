//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

/// Failure kinds raised by the circulation rules.
///
/// Every variant is a precondition violation surfaced before any store
/// write, so a rejected operation never leaves the store half-mutated.
/// Each carries the offending id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// Operation references an unknown copy id
    CopyNotFound(String),
    /// Operation references an unknown reader id
    ReaderNotFound(String),
    /// Operation references an unknown book id
    BookNotFound(String),
    /// Reader is banned as of the given date, or already at the loan cap
    BorrowForbidden(String),
    /// Copy exists but is not in the library
    CopyNotAvailable(String),
    /// Return attempted on a copy that is not out on loan
    CopyNotLoaned(String),
    /// No matching open loan for the return request
    LoanNotFound(String),
    /// Original-loan path invoked on a book not flagged as a new release
    NotNewRelease(String),
    /// Original requested while another reader already holds it
    OriginalAlreadyBorrowed(String),
    /// Original return requested but no original is currently out
    OriginalNotBorrowed(String),
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::CopyNotFound(id) => write!(f, "Copy {} not found", id),
            LibraryError::ReaderNotFound(id) => write!(f, "Reader {} not found", id),
            LibraryError::BookNotFound(id) => write!(f, "Book {} not found", id),
            LibraryError::BorrowForbidden(id) => {
                write!(f, "Reader {} may not borrow (banned or at the loan cap)", id)
            }
            LibraryError::CopyNotAvailable(id) => write!(f, "Copy {} is not available", id),
            LibraryError::CopyNotLoaned(id) => write!(f, "Copy {} is not out on loan", id),
            LibraryError::LoanNotFound(id) => write!(f, "No open loan found for {}", id),
            LibraryError::NotNewRelease(id) => write!(f, "Book {} is not a new release", id),
            LibraryError::OriginalAlreadyBorrowed(id) => {
                write!(f, "The original of book {} is already out", id)
            }
            LibraryError::OriginalNotBorrowed(id) => {
                write!(f, "The original of book {} is not out", id)
            }
        }
    }
}

impl std::error::Error for LibraryError {}
