//! Query execution on top of a [`Store`]

use std::sync::Arc;

use async_trait::async_trait;

use super::{
    mapper::{map_row, MapRow, Mapped},
    params::Params,
    row::Row,
    value::FromValue,
    StoreError, StoreResult,
};

/// Store client: runs one statement on its own connection.
///
/// Implementations acquire a connection for the duration of a single call and
/// release it on every exit path. Pooling, if any, is their own business.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Run a query and return every row, in result order
    async fn fetch(&self, sql: &str, params: &Params) -> StoreResult<Vec<Row>>;

    /// Run a command and return the number of affected rows
    async fn execute(&self, sql: &str, params: &Params) -> StoreResult<u64>;
}

/// Typed query surface used by the repositories
#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<dyn Store>,
}

impl QueryExecutor {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Run a command, returning the affected row count
    pub async fn execute(&self, sql: &str, params: &Params) -> StoreResult<u64> {
        self.store.execute(sql, params).await
    }

    /// Run a query and map every row into `T`, preserving row order
    pub async fn query_many<T: MapRow>(&self, sql: &str, params: &Params) -> StoreResult<Vec<T>> {
        let rows = self.store.fetch(sql, params).await?;
        Ok(rows.iter().map(|row| map_row::<T>(row).record).collect())
    }

    /// Like [`query_many`](Self::query_many), keeping the per-row mapping warnings
    pub async fn query_many_checked<T: MapRow>(
        &self,
        sql: &str,
        params: &Params,
    ) -> StoreResult<Vec<Mapped<T>>> {
        let rows = self.store.fetch(sql, params).await?;
        Ok(rows.iter().map(map_row::<T>).collect())
    }

    /// First mapped row, or `None` when the query returns nothing.
    ///
    /// Uniqueness is not checked: extra rows are dropped.
    pub async fn query_single<T: MapRow>(&self, sql: &str, params: &Params) -> StoreResult<Option<T>> {
        Ok(self.query_many(sql, params).await?.into_iter().next())
    }

    /// Like [`query_single`](Self::query_single) but fails when more than one row matches
    pub async fn query_single_strict<T: MapRow>(
        &self,
        sql: &str,
        params: &Params,
    ) -> StoreResult<Option<T>> {
        let mut records = self.query_many(sql, params).await?;
        match records.len() {
            0 | 1 => Ok(records.pop()),
            n => Err(StoreError::NotUnique(n)),
        }
    }

    /// First column of every row, skipping nulls
    pub async fn query_column<T: FromValue>(&self, sql: &str, params: &Params) -> StoreResult<Vec<T>> {
        let rows = self.store.fetch(sql, params).await?;
        let mut values = Vec::with_capacity(rows.len());
        for value in rows.iter().filter_map(Row::first) {
            if value.is_null() {
                continue;
            }
            values.push(T::from_value(value)?);
        }
        Ok(values)
    }

    /// First column of the first row, or `T::default()` when absent or null
    pub async fn scalar<T: FromValue + Default>(&self, sql: &str, params: &Params) -> StoreResult<T> {
        let rows = self.store.fetch(sql, params).await?;
        match rows.first().and_then(Row::first) {
            Some(value) if !value.is_null() => Ok(T::from_value(value)?),
            _ => Ok(T::default()),
        }
    }
}
