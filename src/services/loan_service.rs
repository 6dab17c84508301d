//! Loan Service - circulation business rules without any delivery layer
//!
//! Free functions over the in-memory store. Every operation takes the
//! current date explicitly so the rules stay deterministic under test;
//! callers that want the real clock pass [`today`].

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::config::LoanPolicy;
use crate::db::MemoryDb;
use crate::domain::LibraryError;
use crate::models::{CopyStatus, Loan};
use crate::services::alert_service::BioAlert;

/// Current date in UTC, for callers that do not supply one.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn next_loan_id(db: &MemoryDb) -> String {
    // Derived from the total count of loans ever created. Loans are never
    // deleted, so this cannot collide; if deletion is ever added, this
    // scheme must change first.
    format!("L{}", db.loans.len() + 1)
}

/// Lend a physical copy to a reader.
///
/// The due date is `today` plus the policy's loan period. Borrowing never
/// triggers notifications.
pub fn borrow_copy(
    db: &mut MemoryDb,
    policy: &LoanPolicy,
    copy_id: &str,
    reader_id: &str,
    today: NaiveDate,
) -> Result<String, LibraryError> {
    // 1. Check all preconditions before writing anything
    let copy = db
        .copies
        .get(copy_id)
        .ok_or_else(|| LibraryError::CopyNotFound(copy_id.to_owned()))?;
    let book_id = copy.book_id.clone();
    let status = copy.status;

    let reader = db
        .readers
        .get(reader_id)
        .ok_or_else(|| LibraryError::ReaderNotFound(reader_id.to_owned()))?;

    if !reader.can_borrow(today, policy.max_active_loans) {
        return Err(LibraryError::BorrowForbidden(reader_id.to_owned()));
    }
    if status != CopyStatus::InLibrary {
        return Err(LibraryError::CopyNotAvailable(copy_id.to_owned()));
    }

    // 2. Create the loan
    let loan_id = next_loan_id(db);
    let due = today + Duration::days(policy.loan_period_days);
    db.loans.insert(
        loan_id.clone(),
        Loan {
            id: loan_id.clone(),
            copy_id: Some(copy_id.to_owned()),
            book_id,
            reader_id: reader_id.to_owned(),
            start: today,
            due,
            returned: None,
        },
    );

    // 3. Mark the copy out and record the loan on the reader
    db.copies
        .get_mut(copy_id)
        .ok_or_else(|| LibraryError::CopyNotFound(copy_id.to_owned()))?
        .status = CopyStatus::Loaned;
    db.readers
        .get_mut(reader_id)
        .ok_or_else(|| LibraryError::ReaderNotFound(reader_id.to_owned()))?
        .active_loan_ids
        .push(loan_id.clone());

    tracing::info!(
        "Loan {} created: copy {} to reader {}, due {}",
        loan_id,
        copy_id,
        reader_id,
        due
    );
    Ok(loan_id)
}

/// Lend the single "original" of a new-release book (no physical copy).
///
/// At most one original per book is out at a time, regardless of reader.
pub fn borrow_original_new_release(
    db: &mut MemoryDb,
    policy: &LoanPolicy,
    book_id: &str,
    reader_id: &str,
    today: NaiveDate,
) -> Result<String, LibraryError> {
    // 1. Check all preconditions before writing anything
    let book = db
        .books
        .get(book_id)
        .ok_or_else(|| LibraryError::BookNotFound(book_id.to_owned()))?;
    let reader = db
        .readers
        .get(reader_id)
        .ok_or_else(|| LibraryError::ReaderNotFound(reader_id.to_owned()))?;

    if !book.is_new_release {
        return Err(LibraryError::NotNewRelease(book_id.to_owned()));
    }
    if !reader.can_borrow(today, policy.max_active_loans) {
        return Err(LibraryError::BorrowForbidden(reader_id.to_owned()));
    }
    if db.new_release_borrowed.contains(book_id) {
        return Err(LibraryError::OriginalAlreadyBorrowed(book_id.to_owned()));
    }

    // 2. Create the copy-less loan and take the original
    let loan_id = next_loan_id(db);
    let due = today + Duration::days(policy.loan_period_days);
    db.loans.insert(
        loan_id.clone(),
        Loan {
            id: loan_id.clone(),
            copy_id: None,
            book_id: book_id.to_owned(),
            reader_id: reader_id.to_owned(),
            start: today,
            due,
            returned: None,
        },
    );
    db.new_release_borrowed.insert(book_id.to_owned());
    db.readers
        .get_mut(reader_id)
        .ok_or_else(|| LibraryError::ReaderNotFound(reader_id.to_owned()))?
        .active_loan_ids
        .push(loan_id.clone());

    tracing::info!(
        "Loan {} created: original of book {} to reader {}, due {}",
        loan_id,
        book_id,
        reader_id,
        due
    );
    Ok(loan_id)
}

/// Take a copy back, applying the late-return penalty and alerting
/// subscribers that the book is available again.
pub fn return_copy(
    db: &mut MemoryDb,
    policy: &LoanPolicy,
    alerts: &BioAlert,
    copy_id: &str,
    when: NaiveDate,
) -> Result<(), LibraryError> {
    // 1. The copy must exist and actually be out
    let copy = db
        .copies
        .get(copy_id)
        .ok_or_else(|| LibraryError::CopyNotFound(copy_id.to_owned()))?;
    if copy.status != CopyStatus::Loaned && copy.status != CopyStatus::Late {
        return Err(LibraryError::CopyNotLoaned(copy_id.to_owned()));
    }

    // 2. Locate the open loan for this copy. The service never creates two
    //    open loans for one copy; if that ever happened, the first match in
    //    map order (unspecified) would win.
    let (loan_id, reader_id) = db
        .loans
        .values()
        .find(|loan| loan.copy_id.as_deref() == Some(copy_id) && loan.is_open())
        .map(|loan| (loan.id.clone(), loan.reader_id.clone()))
        .ok_or_else(|| LibraryError::LoanNotFound(copy_id.to_owned()))?;
    if !db.readers.contains_key(&reader_id) {
        return Err(LibraryError::ReaderNotFound(reader_id));
    }

    // 3. Close the loan
    let loan = db
        .loans
        .get_mut(&loan_id)
        .ok_or_else(|| LibraryError::LoanNotFound(copy_id.to_owned()))?;
    loan.returned = Some(when);
    let late = loan.late_days();
    let book_id = loan.book_id.clone();

    // 4. Penalty: the newest late return replaces any earlier ban; an
    //    on-time return changes nothing
    let reader = db
        .readers
        .get_mut(&reader_id)
        .ok_or_else(|| LibraryError::ReaderNotFound(reader_id.clone()))?;
    if late > 0 {
        let ban_until = when + Duration::days(policy.late_ban_multiplier * late);
        reader.active_ban_until = Some(ban_until);
        tracing::info!(
            "Reader {} banned until {} ({} days late on loan {})",
            reader_id,
            ban_until,
            late,
            loan_id
        );
    }
    reader.active_loan_ids.retain(|id| id != &loan_id);

    // 5. Copy back on the shelf
    db.copies
        .get_mut(copy_id)
        .ok_or_else(|| LibraryError::CopyNotFound(copy_id.to_owned()))?
        .status = CopyStatus::InLibrary;

    tracing::info!("Loan {} closed: copy {} returned on {}", loan_id, copy_id, when);

    // 6. Tell whoever is waiting
    alerts.notify_available(
        &book_id,
        |rid| db.readers.get(rid).map(|r| r.email.clone()),
        |bid| db.books.get(bid).map(|b| b.title.clone()),
    );
    Ok(())
}

/// Take back the "original" of a new-release book, releasing it for the
/// next reader and alerting subscribers.
pub fn return_original_new_release(
    db: &mut MemoryDb,
    policy: &LoanPolicy,
    alerts: &BioAlert,
    book_id: &str,
    reader_id: &str,
    when: NaiveDate,
) -> Result<(), LibraryError> {
    // 1. Check all preconditions before writing anything
    if !db.books.contains_key(book_id) {
        return Err(LibraryError::BookNotFound(book_id.to_owned()));
    }
    if !db.readers.contains_key(reader_id) {
        return Err(LibraryError::ReaderNotFound(reader_id.to_owned()));
    }
    if !db.new_release_borrowed.contains(book_id) {
        return Err(LibraryError::OriginalNotBorrowed(book_id.to_owned()));
    }

    // 2. The open copy-less loan for this (book, reader) pair
    let loan_id = db
        .loans
        .values()
        .find(|loan| {
            loan.book_id == book_id
                && loan.reader_id == reader_id
                && loan.copy_id.is_none()
                && loan.is_open()
        })
        .map(|loan| loan.id.clone())
        .ok_or_else(|| LibraryError::LoanNotFound(book_id.to_owned()))?;

    // 3. Close the loan
    let loan = db
        .loans
        .get_mut(&loan_id)
        .ok_or_else(|| LibraryError::LoanNotFound(book_id.to_owned()))?;
    loan.returned = Some(when);
    let late = loan.late_days();

    // 4. Same penalty rule as physical copies
    let reader = db
        .readers
        .get_mut(reader_id)
        .ok_or_else(|| LibraryError::ReaderNotFound(reader_id.to_owned()))?;
    if late > 0 {
        let ban_until = when + Duration::days(policy.late_ban_multiplier * late);
        reader.active_ban_until = Some(ban_until);
        tracing::info!(
            "Reader {} banned until {} ({} days late on loan {})",
            reader_id,
            ban_until,
            late,
            loan_id
        );
    }
    reader.active_loan_ids.retain(|id| id != &loan_id);

    // 5. Release the original for the next reader
    db.new_release_borrowed.remove(book_id);

    tracing::info!(
        "Loan {} closed: original of book {} returned on {}",
        loan_id,
        book_id,
        when
    );

    // 6. Tell whoever is waiting
    alerts.notify_available(
        book_id,
        |rid| db.readers.get(rid).map(|r| r.email.clone()),
        |bid| db.books.get(bid).map(|b| b.title.clone()),
    );
    Ok(())
}

/// Filter parameters for listing loans
#[derive(Debug, Default, Clone)]
pub struct LoanFilter {
    pub reader_id: Option<String>,
    pub book_id: Option<String>,
    pub open_only: bool,
}

/// Enriched loan with related book and reader data
#[derive(Debug, Clone, Serialize)]
pub struct LoanWithDetails {
    pub id: String,
    pub copy_id: Option<String>,
    pub book_id: String,
    pub book_title: String,
    pub reader_id: String,
    pub reader_email: String,
    pub start: NaiveDate,
    pub due: NaiveDate,
    pub returned: Option<NaiveDate>,
    pub late_days: i64,
}

/// List loans with related book and reader info, oldest first.
pub fn list_loans(db: &MemoryDb, filter: &LoanFilter) -> Vec<LoanWithDetails> {
    let mut loans: Vec<&Loan> = db
        .loans
        .values()
        .filter(|loan| {
            filter
                .reader_id
                .as_deref()
                .map_or(true, |reader_id| loan.reader_id == reader_id)
        })
        .filter(|loan| {
            filter
                .book_id
                .as_deref()
                .map_or(true, |book_id| loan.book_id == book_id)
        })
        .filter(|loan| !filter.open_only || loan.is_open())
        .collect();
    loans.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    loans
        .into_iter()
        .map(|loan| LoanWithDetails {
            id: loan.id.clone(),
            copy_id: loan.copy_id.clone(),
            book_id: loan.book_id.clone(),
            book_title: db
                .books
                .get(&loan.book_id)
                .map(|b| b.title.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            reader_id: loan.reader_id.clone(),
            reader_email: db
                .readers
                .get(&loan.reader_id)
                .map(|r| r.email.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            start: loan.start,
            due: loan.due,
            returned: loan.returned,
            late_days: loan.late_days(),
        })
        .collect()
}
