pub mod book;
pub mod copy;
pub mod loan;
pub mod reader;

pub use book::{Author, Book};
pub use copy::{Copy, CopyStatus};
pub use loan::Loan;
pub use reader::Reader;
