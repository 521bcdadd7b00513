//! Readers repository

use crate::{
    models::Reader,
    store::{Params, QueryExecutor, StoreResult},
};

/// Letter case applied to reader emails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailCase {
    Upper,
    Lower,
}

impl EmailCase {
    fn sql_function(self) -> &'static str {
        match self {
            EmailCase::Upper => "UPPER",
            EmailCase::Lower => "LOWER",
        }
    }
}

#[derive(Clone)]
pub struct ReadersRepository {
    executor: QueryExecutor,
}

impl ReadersRepository {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }

    /// All readers with the number of books they returned, by name
    pub async fn list_with_read_count(&self) -> StoreResult<Vec<Reader>> {
        self.executor
            .query_many(
                r#"
                SELECT r.reader_id AS ReaderId,
                       r.reader_name AS ReaderName,
                       r.phone_number AS PhoneNumber,
                       r.email AS ReaderEmail,
                       r.reader_info AS ReaderInfo,
                       COALESCE(b.returned_books, 0) AS BooksRead
                FROM readers r
                LEFT JOIN (
                    SELECT reader_id, COUNT(*) AS returned_books
                    FROM borrows
                    WHERE return_date IS NOT NULL
                    GROUP BY reader_id
                ) b ON r.reader_id = b.reader_id
                ORDER BY r.reader_name
                "#,
                &Params::new(),
            )
            .await
    }

    /// Get reader by ID, base fields only
    pub async fn get_by_id(&self, reader_id: i32) -> StoreResult<Option<Reader>> {
        self.executor
            .query_single(
                r#"
                SELECT reader_id AS ReaderId,
                       reader_name AS ReaderName,
                       phone_number AS PhoneNumber,
                       email AS ReaderEmail,
                       reader_info AS ReaderInfo
                FROM readers
                WHERE reader_id = @ReaderId
                "#,
                &Params::new().with("ReaderId", reader_id),
            )
            .await
    }

    /// Non-blank emails in the requested case, alphabetically
    pub async fn emails(&self, case: EmailCase) -> StoreResult<Vec<String>> {
        let sql = format!(
            r#"
            SELECT {}(email) AS Email
            FROM readers
            WHERE email IS NOT NULL AND LENGTH(TRIM(email)) > 0
            ORDER BY 1
            "#,
            case.sql_function()
        );
        self.executor.query_column(&sql, &Params::new()).await
    }

    /// Run the stored procedure recomputing the reader's info text.
    ///
    /// Integer parameters travel as INT8; routine resolution never narrows, so
    /// the argument is cast to the procedure's INTEGER signature.
    pub async fn recompute_info(&self, reader_id: i32) -> StoreResult<u64> {
        self.executor
            .execute(
                "CALL update_reader_info(@ReaderId::int)",
                &Params::new().with("ReaderId", reader_id),
            )
            .await
    }

    /// Current info text of a reader
    pub async fn get_info(&self, reader_id: i32) -> StoreResult<Option<String>> {
        self.executor
            .scalar(
                "SELECT reader_info FROM readers WHERE reader_id = @ReaderId",
                &Params::new().with("ReaderId", reader_id),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{executor::MockStore, params::bind_named, Row, Value};
    use std::sync::Arc;

    fn repository(store: MockStore) -> ReadersRepository {
        ReadersRepository::new(QueryExecutor::new(Arc::new(store)))
    }

    #[tokio::test]
    async fn test_emails_exclude_blank_and_sort() {
        let mut store = MockStore::new();
        store
            .expect_fetch()
            .withf(|sql, _| {
                sql.contains("LOWER(email)")
                    && sql.contains("email IS NOT NULL")
                    && sql.contains("LENGTH(TRIM(email)) > 0")
                    && sql.contains("ORDER BY 1")
            })
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    Row::new().with("email", "a@x.com"),
                    Row::new().with("email", Value::Null),
                ])
            });

        let emails = repository(store).emails(EmailCase::Lower).await.unwrap();
        assert_eq!(emails, vec!["a@x.com"]);
    }

    #[tokio::test]
    async fn test_readers_listed_by_name() {
        let mut store = MockStore::new();
        store
            .expect_fetch()
            .withf(|sql, _| sql.contains("ORDER BY r.reader_name") && sql.contains("return_date IS NOT NULL"))
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    Row::new().with("readerid", 2).with("readername", "Andrii").with("booksread", 0_i64),
                    Row::new().with("readerid", 1).with("readername", "Olena").with("booksread", 3_i64),
                ])
            });

        let readers = repository(store).list_with_read_count().await.unwrap();
        assert_eq!(readers[0].reader_name.as_deref(), Some("Andrii"));
        assert_eq!(readers[1].books_read, 3);
    }

    #[tokio::test]
    async fn test_recompute_info_casts_reader_id() {
        let mut store = MockStore::new();
        store
            .expect_execute()
            .withf(|sql, params| {
                bind_named(sql, params)
                    .map(|bound| bound.sql == "CALL update_reader_info($1::int)")
                    .unwrap_or(false)
            })
            .times(1)
            .returning(|_, _| Ok(0));

        assert_eq!(repository(store).recompute_info(3).await.unwrap(), 0);
    }
}
