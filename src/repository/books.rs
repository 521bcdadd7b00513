//! Books repository

use crate::{
    models::Book,
    store::{Params, QueryExecutor, StoreResult},
};

const BOOK_COLUMNS: &str = r#"
    b.book_id AS BookId,
    b.title AS Title,
    b.author_id AS AuthorId,
    b.year_published AS YearPublished,
    b.pages AS Pages,
    b.genre AS Genre,
    b.condition_percent AS ConditionPercent,
    a.author_name AS AuthorName
"#;

#[derive(Clone)]
pub struct BooksRepository {
    executor: QueryExecutor,
}

impl BooksRepository {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }

    /// All books with their author's name, by title
    pub async fn list_with_authors(&self) -> StoreResult<Vec<Book>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM books b
            LEFT JOIN authors a ON b.author_id = a.author_id
            ORDER BY b.title
            "#,
            BOOK_COLUMNS
        );
        self.executor.query_many(&sql, &Params::new()).await
    }

    /// Get book by ID
    pub async fn get_by_id(&self, book_id: i32) -> StoreResult<Option<Book>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM books b
            LEFT JOIN authors a ON b.author_id = a.author_id
            WHERE b.book_id = @BookId
            "#,
            BOOK_COLUMNS
        );
        self.executor
            .query_single(&sql, &Params::new().with("BookId", book_id))
            .await
    }

    /// Books written by an author, by title
    pub async fn list_by_author(&self, author_id: i32) -> StoreResult<Vec<Book>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM books b
            LEFT JOIN authors a ON b.author_id = a.author_id
            WHERE b.author_id = @AuthorId
            ORDER BY b.title
            "#,
            BOOK_COLUMNS
        );
        self.executor
            .query_many(&sql, &Params::new().with("AuthorId", author_id))
            .await
    }

    /// Longest borrow period for a title, as computed by the store.
    ///
    /// Each line is free-form text such as `"Reader - 42 days"`.
    pub async fn max_borrow_period(&self, book_name: &str) -> StoreResult<Vec<String>> {
        self.executor
            .query_column(
                "SELECT * FROM get_max_borrow_period(@BookName)",
                &Params::new().with("BookName", book_name),
            )
            .await
    }
}
