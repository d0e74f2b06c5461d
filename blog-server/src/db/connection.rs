use rusqlite::Connection;

use super::error::{DbError, DbResult};
use super::schema::SCHEMA;
use crate::config::{DatabaseConfig, DatabaseTarget};

/// Owns at most one database connection.
///
/// The manager is its own scope guard: dropping it closes the connection, so
/// a manager obtained from [`DatabaseManager::open`] never outlives the block
/// that created it, whether that block returns early, propagates an error or
/// unwinds.
pub struct DatabaseManager {
    config: DatabaseConfig,
    conn: Option<Connection>,
}

impl DatabaseManager {
    /// Create a manager without connecting
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config, conn: None }
    }

    /// Create a manager and connect immediately
    pub fn open(config: DatabaseConfig) -> DbResult<Self> {
        let mut manager = Self::new(config);
        manager.connect()?;
        Ok(manager)
    }

    /// Open the connection described by the configuration.
    ///
    /// An already open connection is closed first.
    pub fn connect(&mut self) -> DbResult<()> {
        self.close();

        match Self::open_connection(&self.config) {
            Ok(conn) => {
                tracing::info!(
                    host = %self.config.host,
                    user = %self.config.user,
                    database = %self.config.name,
                    "Connected to database successfully"
                );
                self.conn = Some(conn);
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    database = %self.config.name,
                    error = %e,
                    "Error connecting to database"
                );
                Err(DbError::Connect {
                    name: self.config.name.clone(),
                    source: e,
                })
            }
        }
    }

    fn open_connection(config: &DatabaseConfig) -> rusqlite::Result<Connection> {
        let conn = match config.target() {
            DatabaseTarget::Memory => Connection::open_in_memory()?,
            DatabaseTarget::File(path) => Connection::open(path)?,
        };

        // SQLite leaves foreign keys unenforced unless asked, per connection
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Close the connection if one is open. Calling it again is a no-op.
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            match conn.close() {
                Ok(()) => tracing::info!("Connection closed."),
                Err((_conn, e)) => {
                    tracing::warn!(error = %e, "Error closing database connection");
                }
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Create any missing tables
    pub fn initialize_schema(&self) -> DbResult<()> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA).map_err(|e| {
            tracing::error!(error = %e, "Failed to initialize database schema");
            DbError::from(e)
        })
    }

    /// Borrow the open connection
    pub(crate) fn connection(&self) -> DbResult<&Connection> {
        self.conn.as_ref().ok_or(DbError::NotConnected)
    }
}

impl Drop for DatabaseManager {
    fn drop(&mut self) {
        self.close();
    }
}

/// Run `f` against a freshly opened connection that is closed when `f`
/// returns, whatever the outcome.
pub fn with_connection<T, F>(config: DatabaseConfig, f: F) -> DbResult<T>
where
    F: FnOnce(&DatabaseManager) -> DbResult<T>,
{
    let db = DatabaseManager::open(config)?;
    f(&db)
}
