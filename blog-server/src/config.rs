use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// SQLite in-memory database identifier
const MEMORY_DB_NAME: &str = ":memory:";

/// File extension appended to bare database names
const DB_FILE_EXTENSION: &str = "db";

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

/// Connection parameters handed to [`crate::db::DatabaseManager`].
///
/// The embedded engine only needs `name`; `host`, `user` and `password` are
/// kept so a deployment's settings file reads the same as for a networked
/// server, and `host`/`user` show up in the connect log line.
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    #[serde(default = "default_init_schema")]
    pub init_schema: bool,
}

fn default_init_schema() -> bool {
    true
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("init_schema", &self.init_schema)
            .finish()
    }
}

/// Where the database actually lives once the name has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    Memory,
    File(PathBuf),
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database (useful for testing)
    pub fn in_memory() -> Self {
        Self {
            host: "localhost".to_string(),
            user: "root".to_string(),
            password: String::new(),
            name: MEMORY_DB_NAME.to_string(),
            init_schema: true,
        }
    }

    /// Resolve the configured database name to a storage target.
    ///
    /// `:memory:` in any case or padding selects an in-memory database. A name
    /// that already looks like a path (has an extension or a separator) is
    /// used verbatim; anything else becomes `<name>.db`.
    pub fn target(&self) -> DatabaseTarget {
        let trimmed = self.name.trim();

        if trimmed.eq_ignore_ascii_case(MEMORY_DB_NAME) {
            return DatabaseTarget::Memory;
        }

        let path = PathBuf::from(trimmed);
        if path.extension().is_some() || path.components().count() > 1 {
            DatabaseTarget::File(path)
        } else {
            DatabaseTarget::File(path.with_extension(DB_FILE_EXTENSION))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub database: DatabaseConfig,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // 1. Optional settings.toml
        let config_file_name = "settings.toml";

        let current_dir_path = PathBuf::from(config_file_name);
        if current_dir_path.exists() {
            builder = builder.add_source(File::from(current_dir_path).required(false));
        }

        // Development layout: running from the workspace root
        let dev_path = PathBuf::from("blog-server").join(config_file_name);
        if dev_path.exists() {
            builder = builder.add_source(File::from(dev_path).required(false));
        }

        // 2. Defaults
        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("database.host", "localhost")?
            .set_default("database.user", "root")?
            .set_default("database.password", "root")?
            .set_default("database.name", "blogging_platform")?
            .set_default("database.init_schema", true)?;

        // 3. Environment variables (highest priority)
        let overrides = [
            ("HOST", "server.host"),
            ("PORT", "server.port"),
            ("DATABASE_HOST", "database.host"),
            ("DATABASE_USER", "database.user"),
            ("DATABASE_PASSWORD", "database.password"),
            ("DATABASE_NAME", "database.name"),
            ("DATABASE_INIT_SCHEMA", "database.init_schema"),
        ];
        for (var, key) in overrides {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        let s = builder.build()?;
        s.try_deserialize()
    }
}
