//! Demo catalog seeding

use crate::db::MemoryDb;
use crate::models::{Author, Book, Copy, CopyStatus, Reader};

/// Populate `db` with the demo world: a regular book with two copies, a
/// copy-less new release, and two readers.
pub fn seed_demo_data(db: &mut MemoryDb) {
    db.books.insert(
        "B1".to_owned(),
        Book {
            id: "B1".to_owned(),
            title: "Software Engineering".to_owned(),
            year: 2020,
            author: Author {
                full_name: "Ian Sommerville".to_owned(),
                birth_date: "1951-08-23".to_owned(),
            },
            edition: "10th".to_owned(),
            is_new_release: false,
        },
    );
    db.books.insert(
        "B2".to_owned(),
        Book {
            id: "B2".to_owned(),
            title: "Clean Agile (New Release)".to_owned(),
            year: 2025,
            author: Author {
                full_name: "Robert C. Martin".to_owned(),
                birth_date: "1952-12-05".to_owned(),
            },
            edition: "1st".to_owned(),
            is_new_release: true,
        },
    );

    for copy_id in ["C1", "C2"] {
        db.copies.insert(
            copy_id.to_owned(),
            Copy {
                id: copy_id.to_owned(),
                book_id: "B1".to_owned(),
                status: CopyStatus::InLibrary,
            },
        );
    }

    db.readers.insert(
        "R1".to_owned(),
        Reader {
            id: "R1".to_owned(),
            email: "alice@example.com".to_owned(),
            active_ban_until: None,
            active_loan_ids: Vec::new(),
        },
    );
    db.readers.insert(
        "R2".to_owned(),
        Reader {
            id: "R2".to_owned(),
            email: "bob@example.com".to_owned(),
            active_ban_until: None,
            active_loan_ids: Vec::new(),
        },
    );

    tracing::info!(
        "Seeded demo data: {} books, {} copies, {} readers",
        db.books.len(),
        db.copies.len(),
        db.readers.len()
    );
}
