//! Data models for Libris

pub mod book;
pub mod loan;
pub mod member;

// Re-export commonly used types
pub use book::{Book, BookShort};
pub use loan::{Loan, LoanDetails};
pub use member::{Member, MemberShort};
