//! Catalog service: books, authors and their borrow history

use validator::Validate;

use crate::{
    api::books::BookFullResponse,
    error::{AppError, AppResult},
    models::{Author, Book, Borrow, BorrowPeriodQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books with author names, by title
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        let books = self.repository.books.list_with_authors().await?;
        Ok(books.into_iter().map(Book::graded).collect())
    }

    /// Get a book, `None` when it does not exist
    pub async fn get_book(&self, book_id: i32) -> AppResult<Option<Book>> {
        let book = self.repository.books.get_by_id(book_id).await?;
        Ok(book.map(Book::graded))
    }

    /// Borrow history of a book, newest first
    pub async fn get_book_borrows(&self, book_id: i32) -> AppResult<Vec<Borrow>> {
        Ok(self.repository.borrows.list_for_book(book_id).await?)
    }

    /// Book together with its borrow history.
    ///
    /// Any store failure is reported as a single error for the whole lookup.
    pub async fn get_book_full(&self, book_id: i32) -> AppResult<Option<BookFullResponse>> {
        let context = format!("Failed to load full info for book {}", book_id);

        let Some(book) = self
            .repository
            .books
            .get_by_id(book_id)
            .await
            .map_err(AppError::lookup(context.clone()))?
        else {
            return Ok(None);
        };

        let borrows = self
            .repository
            .borrows
            .list_for_book(book_id)
            .await
            .map_err(AppError::lookup(context))?;

        Ok(Some(BookFullResponse {
            book: book.graded(),
            borrows,
        }))
    }

    /// Author with their books and the derived book count
    pub async fn get_author(&self, author_id: i32) -> AppResult<Option<Author>> {
        let Some(mut author) = self.repository.authors.get_by_id(author_id).await? else {
            return Ok(None);
        };

        let books: Vec<Book> = self
            .repository
            .books
            .list_by_author(author_id)
            .await?
            .into_iter()
            .map(Book::graded)
            .collect();

        author.books_count = books.len() as i64;
        author.books = Some(books);
        Ok(Some(author))
    }

    /// Longest borrow period of a title. A blank title is rejected without querying.
    pub async fn max_borrow_period(&self, title: &str) -> AppResult<Vec<String>> {
        let query = BorrowPeriodQuery {
            title: title.to_string(),
        };
        query
            .validate()
            .map_err(|_| AppError::Validation("Book title is required".to_string()))?;

        tracing::debug!("Looking up longest borrow period for '{}'", query.title);
        Ok(self.repository.books.max_borrow_period(&query.title).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{executor::MockStore, Row, StoreError, Value};
    use chrono::{TimeZone, Utc};
    use mockall::Sequence;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn service(store: MockStore) -> CatalogService {
        CatalogService::new(Repository::new(Arc::new(store)))
    }

    fn dune_row() -> Row {
        Row::new()
            .with("bookid", 7)
            .with("title", "Dune")
            .with("authorid", 2)
            .with("yearpublished", 1965)
            .with("pages", 412)
            .with("genre", "Science fiction")
            .with("conditionpercent", Decimal::from(64))
            .with("authorname", "Frank Herbert")
    }

    fn borrow_row(id: i32, day: u32, returned: Option<u32>) -> Row {
        Row::new()
            .with("borrowid", id)
            .with("bookid", 7)
            .with("readerid", 1)
            .with("borrowdate", Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap())
            .with(
                "returndate",
                returned.map(|d| Utc.with_ymd_and_hms(2024, 5, d, 9, 0, 0).unwrap()),
            )
            .with("booktitle", "Dune")
    }

    #[tokio::test]
    async fn test_book_full_combines_book_and_borrows() {
        let mut store = MockStore::new();
        let mut seq = Sequence::new();
        store
            .expect_fetch()
            .withf(|sql, params| sql.contains("FROM books b") && params.get("BookId") == Some(&Value::Int(7)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![dune_row()]));
        store
            .expect_fetch()
            .withf(|sql, _| sql.contains("FROM borrows br"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![borrow_row(2, 20, None), borrow_row(1, 2, Some(9))]));

        let full = service(store).get_book_full(7).await.unwrap().unwrap();

        assert_eq!(full.book.title, "Dune");
        assert_eq!(full.borrows.len(), 2);
        assert!(full.borrows[0].return_date.is_none());
        assert!(full.borrows[0].borrow_date > full.borrows[1].borrow_date);
    }

    #[tokio::test]
    async fn test_book_full_absent_book_skips_borrows() {
        let mut store = MockStore::new();
        store.expect_fetch().times(1).returning(|_, _| Ok(vec![]));

        let full = service(store).get_book_full(404).await.unwrap();
        assert!(full.is_none());
    }

    #[tokio::test]
    async fn test_book_full_wraps_second_fetch_failure() {
        let mut store = MockStore::new();
        let mut seq = Sequence::new();
        store
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![dune_row()]));
        store
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));

        let err = service(store).get_book_full(7).await.unwrap_err();
        match err {
            AppError::Lookup { context, .. } => assert!(context.contains("book 7")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blank_title_rejected_before_store() {
        // No expectations: any store call would panic
        let store = MockStore::new();
        let service = service(store);

        assert!(matches!(
            service.max_borrow_period("").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.max_borrow_period("  ").await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_max_borrow_period_returns_lines() {
        let mut store = MockStore::new();
        store
            .expect_fetch()
            .withf(|sql, params| {
                sql.contains("get_max_borrow_period")
                    && params.get("BookName") == Some(&Value::Text("Dune".into()))
            })
            .times(1)
            .returning(|_, _| Ok(vec![Row::new().with("result", "Olena - 31 days")]));

        let lines = service(store).max_borrow_period("Dune").await.unwrap();
        assert_eq!(lines, vec!["Olena - 31 days"]);
    }

    #[tokio::test]
    async fn test_author_counts_books() {
        let mut store = MockStore::new();
        let mut seq = Sequence::new();
        store
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Ok(vec![Row::new()
                    .with("authorid", 2)
                    .with("authorname", "Frank Herbert")
                    .with("birthyear", 1920)])
            });
        store
            .expect_fetch()
            .withf(|_, params| params.get("AuthorId") == Some(&Value::Int(2)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![dune_row(), dune_row().with("bookid", 8)]));

        let author = service(store).get_author(2).await.unwrap().unwrap();
        assert_eq!(author.books_count, 2);
        assert_eq!(author.books.map(|b| b.len()), Some(2));
    }
}
