//! Tabular result rows

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{postgres::PgRow, Column, Row as _, TypeInfo, ValueRef};

use super::value::Value;

/// One result row: ordered column name → value pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((name.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Case-insensitive lookup by column name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(column, _)| column.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Value of the first column
    pub fn first(&self) -> Option<&Value> {
        self.columns.first().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl TryFrom<&PgRow> for Row {
    type Error = sqlx::Error;

    fn try_from(pg: &PgRow) -> Result<Self, Self::Error> {
        let mut row = Row::new();
        for (index, column) in pg.columns().iter().enumerate() {
            let is_null = pg.try_get_raw(index)?.is_null();
            let value = if is_null {
                Value::Null
            } else {
                decode_column(pg, index, column.type_info().name())?
            };
            row.push(column.name(), value);
        }
        Ok(row)
    }
}

fn decode_column(pg: &PgRow, index: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    let value = match type_name {
        "INT2" => Value::Int(pg.try_get::<i16, _>(index)? as i64),
        "INT4" => Value::Int(pg.try_get::<i32, _>(index)? as i64),
        "INT8" => Value::Int(pg.try_get::<i64, _>(index)?),
        "FLOAT4" => Value::Float(pg.try_get::<f32, _>(index)? as f64),
        "FLOAT8" => Value::Float(pg.try_get::<f64, _>(index)?),
        "NUMERIC" => Value::Decimal(pg.try_get::<Decimal, _>(index)?),
        "BOOL" => Value::Bool(pg.try_get::<bool, _>(index)?),
        "TIMESTAMPTZ" => Value::Timestamp(pg.try_get::<DateTime<Utc>, _>(index)?),
        "TIMESTAMP" => Value::Timestamp(pg.try_get::<NaiveDateTime, _>(index)?.and_utc()),
        "DATE" => {
            let date = pg.try_get::<NaiveDate, _>(index)?;
            Value::Timestamp(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
        }
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "CHAR" => {
            Value::Text(pg.try_get::<String, _>(index)?)
        }
        other => match pg.try_get::<String, _>(index) {
            Ok(text) => Value::Text(text),
            Err(_) => {
                tracing::warn!("Unsupported column type {} at index {}, read as null", other, index);
                Value::Null
            }
        },
    };
    Ok(value)
}
