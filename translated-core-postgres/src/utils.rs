use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{postgres::PgRow, Postgres, QueryBuilder, Row};
use std::error::Error;

use translated_core_api::{AttributeValue, Locale, TranslationError};

use crate::table::{ColumnType, TranslationColumn};

/// Retrieves a required `Locale` from a row.
pub fn get_locale(row: &PgRow, col_name: &str) -> Result<Locale, Box<dyn Error + Send + Sync>> {
    let s: String = row.try_get(col_name)?;
    Locale::new(&s).map_err(|e| format!("Value for column '{col_name}' is not a locale: {e}").into())
}

/// Retrieves a nullable translated column as an `AttributeValue`.
pub fn get_attribute(
    row: &PgRow,
    col_name: &str,
    column_type: ColumnType,
) -> Result<Option<AttributeValue>, Box<dyn Error + Send + Sync>> {
    let value = match column_type {
        ColumnType::Text => row.try_get::<Option<String>, _>(col_name)?.map(AttributeValue::Text),
        ColumnType::Integer => row.try_get::<Option<i64>, _>(col_name)?.map(AttributeValue::Integer),
        ColumnType::Decimal => row.try_get::<Option<Decimal>, _>(col_name)?.map(AttributeValue::Decimal),
        ColumnType::Boolean => row.try_get::<Option<bool>, _>(col_name)?.map(AttributeValue::Boolean),
        ColumnType::Date => row.try_get::<Option<NaiveDate>, _>(col_name)?.map(AttributeValue::Date),
        ColumnType::Timestamp => row
            .try_get::<Option<DateTime<Utc>>, _>(col_name)?
            .map(AttributeValue::Timestamp),
        ColumnType::Json => row
            .try_get::<Option<serde_json::Value>, _>(col_name)?
            .map(AttributeValue::Json),
    };
    Ok(value)
}

/// Bind a column value with the column's storage type. `None` binds a typed null.
///
/// Integers are accepted by decimal columns; any other mismatch is rejected.
pub fn push_attribute_bind(
    builder: &mut QueryBuilder<'_, Postgres>,
    column: &TranslationColumn,
    value: Option<&AttributeValue>,
) -> Result<(), TranslationError> {
    match (column.column_type(), value) {
        (ColumnType::Text, Some(AttributeValue::Text(v))) => builder.push_bind(v.clone()),
        (ColumnType::Text, None) => builder.push_bind(None::<String>),
        (ColumnType::Integer, Some(AttributeValue::Integer(v))) => builder.push_bind(*v),
        (ColumnType::Integer, None) => builder.push_bind(None::<i64>),
        (ColumnType::Decimal, Some(AttributeValue::Decimal(v))) => builder.push_bind(*v),
        (ColumnType::Decimal, Some(AttributeValue::Integer(v))) => builder.push_bind(Decimal::from(*v)),
        (ColumnType::Decimal, None) => builder.push_bind(None::<Decimal>),
        (ColumnType::Boolean, Some(AttributeValue::Boolean(v))) => builder.push_bind(*v),
        (ColumnType::Boolean, None) => builder.push_bind(None::<bool>),
        (ColumnType::Date, Some(AttributeValue::Date(v))) => builder.push_bind(*v),
        (ColumnType::Date, None) => builder.push_bind(None::<NaiveDate>),
        (ColumnType::Timestamp, Some(AttributeValue::Timestamp(v))) => builder.push_bind(*v),
        (ColumnType::Timestamp, None) => builder.push_bind(None::<DateTime<Utc>>),
        (ColumnType::Json, Some(AttributeValue::Json(v))) => builder.push_bind(v.clone()),
        (ColumnType::Json, None) => builder.push_bind(None::<serde_json::Value>),
        (expected, Some(other)) => {
            return Err(TranslationError::InvalidArgument(format!(
                "column '{}' stores {expected:?} values, got '{other}'",
                column.name()
            )))
        }
    };
    Ok(())
}
