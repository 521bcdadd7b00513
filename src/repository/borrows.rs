//! Borrows repository

use crate::{
    models::{Borrow, ReaderStatistics},
    store::{Params, QueryExecutor, StoreResult},
};

#[derive(Clone)]
pub struct BorrowsRepository {
    executor: QueryExecutor,
}

impl BorrowsRepository {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }

    /// Borrows of a book with the reader's contact details, newest first
    pub async fn list_for_book(&self, book_id: i32) -> StoreResult<Vec<Borrow>> {
        self.executor
            .query_many(
                r#"
                SELECT br.borrow_id AS BorrowId,
                       br.book_id AS BookId,
                       br.reader_id AS ReaderId,
                       br.borrow_date AS BorrowDate,
                       br.return_date AS ReturnDate,
                       b.title AS BookTitle,
                       r.reader_name AS ReaderName,
                       r.phone_number AS PhoneNumber,
                       r.email AS ReaderEmail
                FROM borrows br
                LEFT JOIN books b ON br.book_id = b.book_id
                LEFT JOIN readers r ON br.reader_id = r.reader_id
                WHERE br.book_id = @BookId
                ORDER BY br.borrow_date DESC
                "#,
                &Params::new().with("BookId", book_id),
            )
            .await
    }

    /// Borrows of a reader, newest first, each with its elapsed days
    /// (up to today for books not yet returned)
    pub async fn list_for_reader(&self, reader_id: i32) -> StoreResult<Vec<Borrow>> {
        self.executor
            .query_many(
                r#"
                SELECT br.borrow_id AS BorrowId,
                       br.book_id AS BookId,
                       br.reader_id AS ReaderId,
                       br.borrow_date AS BorrowDate,
                       br.return_date AS ReturnDate,
                       b.title AS BookTitle,
                       r.reader_name AS ReaderName,
                       r.phone_number AS PhoneNumber,
                       r.email AS ReaderEmail,
                       (COALESCE(br.return_date, NOW())::date - br.borrow_date::date) AS BorrowDays
                FROM borrows br
                LEFT JOIN books b ON br.book_id = b.book_id
                LEFT JOIN readers r ON br.reader_id = r.reader_id
                WHERE br.reader_id = @ReaderId
                ORDER BY br.borrow_date DESC
                "#,
                &Params::new().with("ReaderId", reader_id),
            )
            .await
    }

    /// Number of borrows the reader has returned
    pub async fn count_returned_by_reader(&self, reader_id: i32) -> StoreResult<i64> {
        self.executor
            .scalar(
                r#"
                SELECT COUNT(*)
                FROM borrows
                WHERE reader_id = @ReaderId AND return_date IS NOT NULL
                "#,
                &Params::new().with("ReaderId", reader_id),
            )
            .await
    }

    /// Borrow statistics for a reader, zeroed when they never borrowed anything
    pub async fn statistics_for_reader(&self, reader_id: i32) -> StoreResult<ReaderStatistics> {
        let stats = self
            .executor
            .query_single::<ReaderStatistics>(
                r#"
                SELECT COUNT(*) AS TotalBorrows,
                       SUM(CASE WHEN return_date IS NULL THEN 1 ELSE 0 END) AS ActiveBorrows,
                       AVG((COALESCE(return_date, NOW())::date - borrow_date::date)::float8) AS AverageBorrowDays
                FROM borrows
                WHERE reader_id = @ReaderId
                GROUP BY reader_id
                "#,
                &Params::new().with("ReaderId", reader_id),
            )
            .await?;
        Ok(stats.unwrap_or_default())
    }
}
