//! Borrow record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    column,
    store::{Column, MapRow},
};

/// A book lent to a reader, with display fields joined in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Borrow {
    pub borrow_id: i32,
    pub book_id: i32,
    pub reader_id: i32,
    pub borrow_date: DateTime<Utc>,
    /// `None` while the book is still out
    pub return_date: Option<DateTime<Utc>>,
    pub book_title: Option<String>,
    pub reader_name: Option<String>,
    pub phone_number: Option<String>,
    pub reader_email: Option<String>,
    /// Days between borrow date and return date (or today for open borrows)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrow_days: Option<i32>,
}

impl MapRow for Borrow {
    const COLUMNS: &'static [Column<Self>] = &[
        column!(Borrow, "BorrowId" => borrow_id),
        column!(Borrow, "BookId" => book_id),
        column!(Borrow, "ReaderId" => reader_id),
        column!(Borrow, "BorrowDate" => borrow_date),
        column!(Borrow, "ReturnDate" => return_date),
        column!(Borrow, "BookTitle" => book_title),
        column!(Borrow, "ReaderName" => reader_name),
        column!(Borrow, "PhoneNumber" => phone_number),
        column!(Borrow, "ReaderEmail" => reader_email),
        column!(Borrow, "BorrowDays" => borrow_days),
    ];
}
