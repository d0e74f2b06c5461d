use blog_types::User;

use crate::db::row::{decode_all, FromRow, Row};
use crate::db::{DatabaseManager, DbResult};

pub struct UserRepository<'a> {
    db: &'a DatabaseManager,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseManager) -> Self {
        Self { db }
    }

    /// Insert a user and return its generated id.
    ///
    /// The password is written as given.
    pub fn create(&self, username: &str, email: &str, password: &str, bio: &str) -> DbResult<i64> {
        self.db.execute(
            "INSERT INTO users (username, email, password, bio) VALUES (?1, ?2, ?3, ?4)",
            (username, email, password, bio),
        )?;
        self.db.last_insert_id()
    }

    /// Get all users
    pub fn list_all(&self) -> DbResult<Vec<User>> {
        let rows = self.db.fetch_all(
            "SELECT id, username, email, password, bio
             FROM users
             ORDER BY id",
            [],
        )?;
        decode_all(rows)
    }
}

impl FromRow for User {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(User {
            id: row.integer("id")?,
            username: row.text("username")?,
            email: row.text("email")?,
            password: row.text("password")?,
            // Schemas not created by this crate may leave bio nullable
            bio: row.optional_text("bio")?.unwrap_or_default(),
        })
    }
}
