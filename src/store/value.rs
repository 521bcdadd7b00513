//! Scalar values exchanged with the store and the coercion rules applied
//! when a column value is assigned to a record field.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use thiserror::Error;

/// A single column value or bind parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Short name of the variant, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::Bool(_) => "boolean",
            Value::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Timestamp(v) => f.write_str(&v.to_rfc3339()),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Why a column value could not be assigned to a field
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("null value for a required {target} field")]
    NullIntoRequired { target: &'static str },

    #[error("cannot convert {from} to {target}")]
    Incompatible {
        from: &'static str,
        target: &'static str,
    },

    #[error("value {value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },

    #[error("cannot parse '{value}' as {target}")]
    Parse { value: String, target: &'static str },
}

/// Conversion from a store value into a field type.
///
/// Optional fields unwrap to their inner type: `Option<T>` maps `Null` to `None`
/// and delegates everything else to `T`. A non-optional type refuses `Null`.
pub trait FromValue: Sized {
    /// Target type name used in diagnostics
    const TARGET: &'static str;

    fn from_value(value: &Value) -> Result<Self, CoercionError>;
}

fn incompatible<T: FromValue>(value: &Value) -> CoercionError {
    if value.is_null() {
        CoercionError::NullIntoRequired { target: T::TARGET }
    } else {
        CoercionError::Incompatible {
            from: value.kind(),
            target: T::TARGET,
        }
    }
}

fn parse_error<T: FromValue>(text: &str) -> CoercionError {
    CoercionError::Parse {
        value: text.to_string(),
        target: T::TARGET,
    }
}

impl FromValue for i64 {
    const TARGET: &'static str = "integer";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        let out_of_range = || CoercionError::OutOfRange {
            value: value.to_string(),
            target: Self::TARGET,
        };
        match value {
            Value::Int(v) => Ok(*v),
            Value::Bool(v) => Ok(*v as i64),
            Value::Float(v) if v.is_finite() => {
                let rounded = v.round();
                if rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
                    return Err(out_of_range());
                }
                Ok(rounded as i64)
            }
            Value::Float(_) => Err(out_of_range()),
            Value::Decimal(v) => v.round().to_i64().ok_or_else(out_of_range),
            Value::Text(s) => s.trim().parse().map_err(|_| parse_error::<Self>(s)),
            _ => Err(incompatible::<Self>(value)),
        }
    }
}

impl FromValue for i32 {
    const TARGET: &'static str = "integer";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        let wide = i64::from_value(value)?;
        i32::try_from(wide).map_err(|_| CoercionError::OutOfRange {
            value: wide.to_string(),
            target: "32-bit integer",
        })
    }
}

impl FromValue for f64 {
    const TARGET: &'static str = "float";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Float(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            Value::Decimal(v) => v.to_f64().ok_or_else(|| CoercionError::OutOfRange {
                value: v.to_string(),
                target: Self::TARGET,
            }),
            Value::Text(s) => s.trim().parse().map_err(|_| parse_error::<Self>(s)),
            _ => Err(incompatible::<Self>(value)),
        }
    }
}

impl FromValue for Decimal {
    const TARGET: &'static str = "decimal";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Decimal(v) => Ok(*v),
            Value::Int(v) => Ok(Decimal::from(*v)),
            Value::Float(v) => Decimal::from_f64(*v).ok_or_else(|| CoercionError::OutOfRange {
                value: v.to_string(),
                target: Self::TARGET,
            }),
            Value::Text(s) => s.trim().parse().map_err(|_| parse_error::<Self>(s)),
            _ => Err(incompatible::<Self>(value)),
        }
    }
}

impl FromValue for String {
    const TARGET: &'static str = "text";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Null => Err(incompatible::<Self>(value)),
            Value::Text(s) => Ok(s.clone()),
            other => Ok(other.to_string()),
        }
    }
}

impl FromValue for bool {
    const TARGET: &'static str = "boolean";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Bool(v) => Ok(*v),
            Value::Int(v) => Ok(*v != 0),
            Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => Ok(true),
                "false" | "f" | "0" => Ok(false),
                _ => Err(parse_error::<Self>(s)),
            },
            _ => Err(incompatible::<Self>(value)),
        }
    }
}

impl FromValue for DateTime<Utc> {
    const TARGET: &'static str = "timestamp";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Timestamp(v) => Ok(*v),
            Value::Text(s) => parse_timestamp(s.trim()).ok_or_else(|| parse_error::<Self>(s)),
            _ => Err(incompatible::<Self>(value)),
        }
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl<T: FromValue> FromValue for Option<T> {
    const TARGET: &'static str = T::TARGET;

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
