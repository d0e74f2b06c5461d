//! Generic result rows.
//!
//! [`DatabaseManager::fetch_all`](super::DatabaseManager::fetch_all) returns
//! each row as a column-name → value mapping; repositories decode those into
//! the typed models of `blog-types` through [`FromRow`].

use std::fmt;
use std::sync::Arc;

use rusqlite::types::ValueRef;

use super::error::{DbError, DbResult};

/// A single column value as stored by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<ValueRef<'_>> for SqlValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => SqlValue::Null,
            ValueRef::Integer(i) => SqlValue::Integer(i),
            ValueRef::Real(f) => SqlValue::Real(f),
            ValueRef::Text(bytes) => SqlValue::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => SqlValue::Blob(bytes.to_vec()),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Integer(i) => write!(f, "{i}"),
            SqlValue::Real(r) => write!(f, "{r}"),
            SqlValue::Text(s) => write!(f, "{s:?}"),
            SqlValue::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// One result row. Columns keep the order of the select list.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<SqlValue>,
}

impl Row {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<SqlValue>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the first column with this name
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|name| name == column)
            .map(|i| &self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns.iter().map(String::as_str).zip(self.values.iter())
    }

    pub fn integer(&self, column: &str) -> DbResult<i64> {
        match self.get(column) {
            Some(SqlValue::Integer(value)) => Ok(*value),
            Some(_) => Err(DbError::ColumnType {
                column: column.to_string(),
                expected: "an integer",
            }),
            None => Err(DbError::MissingColumn(column.to_string())),
        }
    }

    pub fn text(&self, column: &str) -> DbResult<String> {
        match self.get(column) {
            Some(SqlValue::Text(value)) => Ok(value.clone()),
            Some(_) => Err(DbError::ColumnType {
                column: column.to_string(),
                expected: "text",
            }),
            None => Err(DbError::MissingColumn(column.to_string())),
        }
    }

    /// Text column that may hold NULL
    pub fn optional_text(&self, column: &str) -> DbResult<Option<String>> {
        match self.get(column) {
            Some(SqlValue::Null) => Ok(None),
            _ => self.text(column).map(Some),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (column, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{column}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// Decode a typed model from a result row
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> DbResult<Self>;
}

pub(crate) fn decode_all<T: FromRow>(rows: Vec<Row>) -> DbResult<Vec<T>> {
    rows.iter().map(T::from_row).collect()
}
