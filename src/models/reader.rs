//! Reader model and derived statistics

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::borrow::Borrow;
use crate::{
    column,
    store::{Column, MapRow},
};

/// Library reader
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reader {
    pub reader_id: i32,
    pub reader_name: Option<String>,
    pub phone_number: Option<String>,
    pub reader_email: Option<String>,
    /// Free text last written by the info refresh procedure
    pub reader_info: Option<String>,
    /// Returned borrows, computed at read time
    pub books_read: i64,
    /// Only populated on detail fetches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrows: Option<Vec<Borrow>>,
}

impl MapRow for Reader {
    const COLUMNS: &'static [Column<Self>] = &[
        column!(Reader, "ReaderId" => reader_id),
        column!(Reader, "ReaderName" => reader_name),
        column!(Reader, "PhoneNumber" => phone_number),
        column!(Reader, "ReaderEmail" => reader_email),
        column!(Reader, "ReaderInfo" => reader_info),
        column!(Reader, "BooksRead" => books_read),
    ];
}

/// Borrow statistics of one reader; never persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReaderStatistics {
    pub total_borrows: i64,
    /// Borrows without a return date
    pub active_borrows: i64,
    pub average_borrow_days: f64,
}

impl MapRow for ReaderStatistics {
    const COLUMNS: &'static [Column<Self>] = &[
        column!(ReaderStatistics, "TotalBorrows" => total_borrows),
        column!(ReaderStatistics, "ActiveBorrows" => active_borrows),
        column!(ReaderStatistics, "AverageBorrowDays" => average_borrow_days),
    ];
}
