//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod borrow;
pub mod reader;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BorrowPeriodQuery, ConditionGrade};
pub use borrow::Borrow;
pub use reader::{Reader, ReaderStatistics};
