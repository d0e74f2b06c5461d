pub mod schema;
pub mod connection;
pub mod data_manager;
pub mod error;
mod executor;
pub mod repositories;
pub mod row;
pub mod seed;

pub use connection::{with_connection, DatabaseManager};
pub use data_manager::DataManager;
pub use error::{DbError, DbResult};
pub use row::{FromRow, Row, SqlValue};

/// In-memory database with the schema applied
#[cfg(test)]
pub(crate) fn test_database() -> DatabaseManager {
    let db = DatabaseManager::open(crate::config::DatabaseConfig::in_memory())
        .expect("Failed to open test database");
    db.initialize_schema().expect("Failed to initialize schema");
    db
}

/// Number of ERROR-level events emitted on this thread while `f` runs
#[cfg(test)]
pub(crate) fn count_error_events<F: FnOnce()>(f: F) -> usize {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorCounter(Arc::clone(&count)));
    tracing::subscriber::with_default(subscriber, f);
    count.load(Ordering::SeqCst)
}
