//! Repository layer: the catalog of named queries over the store

pub mod authors;
pub mod books;
pub mod borrows;
pub mod readers;

use std::sync::Arc;

use crate::store::{QueryExecutor, Store};

/// Main repository struct holding the query executor
#[derive(Clone)]
pub struct Repository {
    pub executor: QueryExecutor,
    pub books: books::BooksRepository,
    pub authors: authors::AuthorsRepository,
    pub readers: readers::ReadersRepository,
    pub borrows: borrows::BorrowsRepository,
}

impl Repository {
    /// Create a new repository over the given store handle
    pub fn new(store: Arc<dyn Store>) -> Self {
        let executor = QueryExecutor::new(store);
        Self {
            books: books::BooksRepository::new(executor.clone()),
            authors: authors::AuthorsRepository::new(executor.clone()),
            readers: readers::ReadersRepository::new(executor.clone()),
            borrows: borrows::BorrowsRepository::new(executor.clone()),
            executor,
        }
    }

    /// Round trip to the store, used by the readiness check
    pub async fn ping(&self) -> crate::store::StoreResult<i32> {
        self.executor
            .scalar::<i32>("SELECT 1", &crate::store::Params::new())
            .await
    }
}
