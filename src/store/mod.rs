//! Generic data access: store client seam, query execution and row mapping

pub mod executor;
pub mod mapper;
pub mod params;
pub mod postgres;
pub mod row;
pub mod value;

use thiserror::Error;

pub use executor::{QueryExecutor, Store};
pub use mapper::{map_row, Column, MapRow, Mapped, MappingWarning};
pub use params::Params;
pub use postgres::PgStore;
pub use row::Row;
pub use value::{CoercionError, FromValue, Value};

/// Failures raised by the store or by query execution
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Query references parameter '@{0}' which was not supplied")]
    MissingParameter(String),

    #[error("Expected at most one row, got {0}")]
    NotUnique(usize),

    #[error("Scalar result could not be converted: {0}")]
    Scalar(#[from] CoercionError),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
