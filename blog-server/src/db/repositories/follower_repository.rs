use blog_types::Follower;

use crate::db::row::{decode_all, FromRow, Row};
use crate::db::{DatabaseManager, DbResult};

pub struct FollowerRepository<'a> {
    db: &'a DatabaseManager,
}

impl<'a> FollowerRepository<'a> {
    pub fn new(db: &'a DatabaseManager) -> Self {
        Self { db }
    }

    /// Record that `follower_id` follows `following_id`
    pub fn create(&self, follower_id: i64, following_id: i64) -> DbResult<()> {
        self.db.execute(
            "INSERT INTO followers (follower_id, following_id) VALUES (?1, ?2)",
            (follower_id, following_id),
        )?;
        Ok(())
    }

    pub fn list_all(&self) -> DbResult<Vec<Follower>> {
        let rows = self.db.fetch_all(
            "SELECT follower_id, following_id
             FROM followers
             ORDER BY rowid",
            [],
        )?;
        decode_all(rows)
    }
}

impl FromRow for Follower {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Follower {
            follower_id: row.integer("follower_id")?,
            following_id: row.integer("following_id")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::UserRepository;
    use crate::db::{test_database, DbError};

    #[test]
    fn test_edges_are_directed() {
        let db = test_database();
        let users = UserRepository::new(&db);
        let a = users.create("a", "a@x.com", "pw", "").expect("Failed to create user");
        let b = users.create("b", "b@x.com", "pw", "").expect("Failed to create user");

        let repo = FollowerRepository::new(&db);
        repo.create(a, b).expect("Failed to follow");
        repo.create(b, a).expect("Failed to follow back");

        let edges = repo.list_all().expect("Failed to list followers");
        assert_eq!(
            edges,
            vec![
                Follower { follower_id: a, following_id: b },
                Follower { follower_id: b, following_id: a },
            ]
        );
    }

    #[test]
    fn test_duplicate_edge_is_rejected() {
        let db = test_database();
        let users = UserRepository::new(&db);
        let a = users.create("a", "a@x.com", "pw", "").expect("Failed to create user");
        let b = users.create("b", "b@x.com", "pw", "").expect("Failed to create user");

        let repo = FollowerRepository::new(&db);
        repo.create(a, b).expect("Failed to follow");
        assert!(matches!(repo.create(a, b), Err(DbError::Query(_))));
        assert_eq!(repo.list_all().expect("Failed to list followers").len(), 1);
    }
}
