//! PostgreSQL store client backed by sqlx

use async_trait::async_trait;
use sqlx::{
    encode::IsNull,
    postgres::{types::Oid, PgArgumentBuffer, PgArguments, PgPoolOptions, PgTypeInfo},
    query::Query,
    Encode, PgPool, Postgres, Type,
};
use std::time::Duration;

use super::{
    executor::Store,
    params::{bind_named, BoundQuery, Params},
    row::Row,
    value::Value,
    StoreResult,
};
use crate::config::DatabaseConfig;

/// Store handle over a sqlx connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open the pool described by the database configuration
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;
        Ok(Self { pool })
    }

    /// Close every connection; used at shutdown
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// SQL NULL sent with an unspecified parameter type.
///
/// The server infers the type from where the placeholder is used, so the same
/// marker works against integer, text or timestamp columns.
#[derive(Debug, Clone, Copy)]
struct UntypedNull;

impl Type<Postgres> for UntypedNull {
    fn type_info() -> PgTypeInfo {
        // OID 0 leaves the parameter type to the server
        PgTypeInfo::with_oid(Oid(0))
    }

    fn compatible(_ty: &PgTypeInfo) -> bool {
        true
    }
}

impl Encode<'_, Postgres> for UntypedNull {
    fn encode_by_ref(&self, _buf: &mut PgArgumentBuffer) -> IsNull {
        IsNull::Yes
    }
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &Value,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        Value::Null => query.bind(UntypedNull),
        Value::Int(v) => query.bind(*v),
        Value::Float(v) => query.bind(*v),
        Value::Decimal(v) => query.bind(*v),
        Value::Text(v) => query.bind(v.clone()),
        Value::Bool(v) => query.bind(*v),
        Value::Timestamp(v) => query.bind(*v),
    }
}

/// Build the sqlx query for a bound statement.
///
/// A statement carrying a NULL is not cached: the server fixes the inferred
/// parameter types at prepare time, which later non-null binds must not inherit.
fn prepare(bound: &BoundQuery) -> Query<'_, Postgres, PgArguments> {
    let persistent = !bound.values.iter().any(Value::is_null);
    bound
        .values
        .iter()
        .fold(sqlx::query(&bound.sql).persistent(persistent), bind_value)
}

#[async_trait]
impl Store for PgStore {
    async fn fetch(&self, sql: &str, params: &Params) -> StoreResult<Vec<Row>> {
        let bound = bind_named(sql, params)?;
        let mut conn = self.pool.acquire().await?;

        let rows = prepare(&bound).fetch_all(&mut *conn).await?;
        tracing::debug!("Fetched {} rows", rows.len());

        let mut result = Vec::with_capacity(rows.len());
        for row in &rows {
            result.push(Row::try_from(row)?);
        }
        Ok(result)
    }

    async fn execute(&self, sql: &str, params: &Params) -> StoreResult<u64> {
        let bound = bind_named(sql, params)?;
        let mut conn = self.pool.acquire().await?;

        let done = prepare(&bound).execute(&mut *conn).await?;
        Ok(done.rows_affected())
    }
}
