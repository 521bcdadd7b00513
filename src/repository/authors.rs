//! Authors repository

use crate::{
    models::Author,
    store::{Params, QueryExecutor, StoreResult},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    executor: QueryExecutor,
}

impl AuthorsRepository {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }

    /// Get author by ID (without books)
    pub async fn get_by_id(&self, author_id: i32) -> StoreResult<Option<Author>> {
        self.executor
            .query_single(
                r#"
                SELECT author_id AS AuthorId,
                       author_name AS AuthorName,
                       birth_year AS BirthYear
                FROM authors
                WHERE author_id = @AuthorId
                "#,
                &Params::new().with("AuthorId", author_id),
            )
            .await
    }
}
