//! Row → record mapping.
//!
//! Every record type declares an explicit column table: one entry per field,
//! pairing the column name with a setter that coerces the value into the
//! field's type. Mapping is best effort. A value that cannot be assigned
//! leaves its field at the default and is reported as a [`MappingWarning`],
//! the remaining columns are still applied.

use super::{
    row::Row,
    value::{CoercionError, Value},
};

/// Field setter: coerce a column value and store it in the record
pub type Setter<T> = fn(&mut T, &Value) -> Result<(), CoercionError>;

/// One entry of a record's column table
pub struct Column<T> {
    pub name: &'static str,
    pub set: Setter<T>,
}

/// Records that can be built from a result row
pub trait MapRow: Default + 'static {
    /// Column name → setter table. Names are matched case-insensitively.
    const COLUMNS: &'static [Column<Self>];
}

/// Declares a [`Column`] entry assigning `$column` to the field `$field`.
///
/// ```ignore
/// const COLUMNS: &'static [Column<Self>] = &[column!(Book, "BookId" => book_id)];
/// ```
#[macro_export]
macro_rules! column {
    ($record:ty, $column:literal => $field:ident) => {
        $crate::store::mapper::Column::<$record> {
            name: $column,
            set: |record: &mut $record,
                  value: &$crate::store::value::Value|
                  -> Result<(), $crate::store::value::CoercionError> {
                record.$field = $crate::store::value::FromValue::from_value(value)?;
                Ok(())
            },
        }
    };
}

/// A column that could not be assigned to its field
#[derive(Debug, Clone, PartialEq)]
pub struct MappingWarning {
    pub column: String,
    pub source_kind: &'static str,
    pub error: CoercionError,
}

/// A mapped record together with the warnings raised while building it
#[derive(Debug, Clone, PartialEq)]
pub struct Mapped<T> {
    pub record: T,
    pub warnings: Vec<MappingWarning>,
}

impl<T> Mapped<T> {
    /// True when every matched column was assigned
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Build a record from a row.
///
/// Columns without a matching entry are ignored, entries without a column keep
/// their default value.
pub fn map_row<T: MapRow>(row: &Row) -> Mapped<T> {
    let mut record = T::default();
    let mut warnings = Vec::new();

    for (name, value) in row.iter() {
        let Some(column) = T::COLUMNS
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
        else {
            continue;
        };

        if let Err(error) = (column.set)(&mut record, value) {
            tracing::warn!(
                "Cannot assign column '{}' ({} value '{}') to {}: {}",
                name,
                value.kind(),
                value,
                std::any::type_name::<T>(),
                error
            );
            warnings.push(MappingWarning {
                column: name.to_string(),
                source_kind: value.kind(),
                error,
            });
        }
    }

    Mapped { record, warnings }
}
