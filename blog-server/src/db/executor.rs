use std::sync::Arc;

use rusqlite::{Connection, Params};

use super::connection::DatabaseManager;
use super::error::{DbError, DbResult};
use super::row::{Row, SqlValue};

impl DatabaseManager {
    /// Run a write statement with positional parameters.
    ///
    /// The connection is in autocommit mode, so a successful statement is
    /// committed before this returns. Returns the number of affected rows.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> DbResult<usize> {
        let result = self
            .connection()
            .and_then(|conn| conn.execute(sql, params).map_err(DbError::from));

        if let Err(e) = &result {
            tracing::error!(error = %e, "Error executing query");
        }
        result
    }

    /// Run a read statement and materialise every row, in engine order.
    pub fn fetch_all<P: Params>(&self, sql: &str, params: P) -> DbResult<Vec<Row>> {
        let result = self
            .connection()
            .and_then(|conn| read_rows(conn, sql, params).map_err(DbError::from));

        if let Err(e) = &result {
            tracing::error!(error = %e, "Error fetching data");
        }
        result
    }

    /// Row id generated by the most recent successful insert on this connection
    pub fn last_insert_id(&self) -> DbResult<i64> {
        Ok(self.connection()?.last_insert_rowid())
    }
}

fn read_rows<P: Params>(conn: &Connection, sql: &str, params: P) -> rusqlite::Result<Vec<Row>> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Arc<[String]> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows = stmt.query(params)?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let values = (0..columns.len())
            .map(|i| row.get_ref(i).map(SqlValue::from))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        out.push(Row::new(Arc::clone(&columns), values));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::count_error_events;

    fn setup_test_db() -> DatabaseManager {
        let db = DatabaseManager::open(DatabaseConfig::in_memory())
            .expect("Failed to open database");
        db.execute(
            "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT NOT NULL, score REAL)",
            [],
        )
        .expect("Failed to create table");
        db
    }

    #[test]
    fn test_execute_reports_affected_rows() {
        let db = setup_test_db();
        let inserted = db
            .execute("INSERT INTO notes (body) VALUES (?1)", ["first"])
            .expect("Failed to insert");
        assert_eq!(inserted, 1);
        assert_eq!(db.last_insert_id().expect("Failed to read id"), 1);
    }

    #[test]
    fn test_parameters_are_bound_not_interpolated() {
        let db = setup_test_db();
        let hostile = "x'); DROP TABLE notes; --";
        db.execute("INSERT INTO notes (body) VALUES (?1)", [hostile])
            .expect("Failed to insert");

        let rows = db
            .fetch_all("SELECT body FROM notes", [])
            .expect("Failed to fetch");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text("body").expect("Missing body"), hostile);
    }

    #[test]
    fn test_fetch_all_maps_columns_in_order() {
        let db = setup_test_db();
        db.execute("INSERT INTO notes (body, score) VALUES (?1, ?2)", ("a", 1.5))
            .expect("Failed to insert");
        db.execute("INSERT INTO notes (body) VALUES (?1)", ["b"])
            .expect("Failed to insert");

        let rows = db
            .fetch_all("SELECT id, body, score FROM notes ORDER BY id", [])
            .expect("Failed to fetch");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].columns(), ["id", "body", "score"]);
        assert_eq!(rows[0].get("score"), Some(&SqlValue::Real(1.5)));
        assert_eq!(rows[1].get("score"), Some(&SqlValue::Null));
        assert_eq!(rows[1].integer("id").expect("Missing id"), 2);
    }

    #[test]
    fn test_fetch_all_empty_result_is_ok() {
        let db = setup_test_db();
        let rows = db.fetch_all("SELECT * FROM notes", []).expect("Failed to fetch");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_failures_are_distinguishable_from_empty() {
        let db = setup_test_db();
        assert!(matches!(
            db.fetch_all("SELECT * FROM missing_table", []),
            Err(DbError::Query(_))
        ));
        assert!(matches!(
            db.execute("INSERT INTO notes (body) VALUES (NULL)", []),
            Err(DbError::Query(_))
        ));
    }

    #[test]
    fn test_closed_connection_reads_fail_without_panicking() {
        let mut db = setup_test_db();
        db.close();

        assert!(matches!(
            db.fetch_all("SELECT * FROM notes", []),
            Err(DbError::NotConnected)
        ));
        assert!(matches!(
            db.execute("INSERT INTO notes (body) VALUES (?1)", ["x"]),
            Err(DbError::NotConnected)
        ));
        assert!(matches!(db.last_insert_id(), Err(DbError::NotConnected)));
    }

    #[test]
    fn test_closed_connection_failures_are_logged() {
        let mut db = setup_test_db();
        db.close();

        let errors = count_error_events(|| {
            let _ = db.fetch_all("SELECT * FROM notes", []);
        });
        assert_eq!(errors, 1);

        let errors = count_error_events(|| {
            let _ = db.execute("INSERT INTO notes (body) VALUES (?1)", ["x"]);
        });
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_statement_failures_are_logged() {
        let db = setup_test_db();
        let errors = count_error_events(|| {
            let _ = db.fetch_all("SELECT * FROM missing_table", []);
        });
        assert_eq!(errors, 1);

        // Successful calls stay quiet at ERROR level
        let errors = count_error_events(|| {
            db.fetch_all("SELECT * FROM notes", []).expect("Failed to fetch");
        });
        assert_eq!(errors, 0);
    }
}
