//! Errors raised by the data-access layer.
//!
//! Every database call reports failure through [`DbError`], so a caller can
//! always tell "the query failed" apart from "the query returned no rows".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// Opening the connection failed.
    #[error("failed to connect to database '{name}': {source}")]
    Connect {
        name: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement was issued while no connection was open.
    #[error("database connection is not open")]
    NotConnected,

    /// The engine rejected or failed to run a statement.
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// A result row lacks a column the caller expected.
    #[error("column '{0}' missing from result row")]
    MissingColumn(String),

    /// A result column holds a value of the wrong type.
    #[error("column '{column}' is not {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
    },
}

pub type DbResult<T> = Result<T, DbError>;
