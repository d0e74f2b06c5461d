use crate::config::DatabaseConfig;

/// Shared by every request. Each request opens its own connection from this
/// configuration and closes it before responding.
#[derive(Clone)]
pub struct AppState {
    pub database: DatabaseConfig,
}

impl AppState {
    pub fn new(database: DatabaseConfig) -> Self {
        Self { database }
    }
}
