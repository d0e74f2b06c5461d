use blog_types::{Comment, CommentWithDetails};

use crate::db::row::{decode_all, FromRow, Row};
use crate::db::{DatabaseManager, DbResult};

pub struct CommentRepository<'a> {
    db: &'a DatabaseManager,
}

impl<'a> CommentRepository<'a> {
    pub fn new(db: &'a DatabaseManager) -> Self {
        Self { db }
    }

    pub fn create(&self, content: &str, post_id: i64, author_id: i64) -> DbResult<i64> {
        self.db.execute(
            "INSERT INTO comments (content, post_id, author_id) VALUES (?1, ?2, ?3)",
            (content, post_id, author_id),
        )?;
        self.db.last_insert_id()
    }

    pub fn list_all(&self) -> DbResult<Vec<Comment>> {
        let rows = self.db.fetch_all(
            "SELECT id, content, post_id, author_id
             FROM comments
             ORDER BY id",
            [],
        )?;
        decode_all(rows)
    }

    /// Comments joined with their post's title and their author's username
    pub fn list_with_details(&self) -> DbResult<Vec<CommentWithDetails>> {
        let rows = self.db.fetch_all(
            "SELECT comments.id, comments.content, comments.post_id, comments.author_id,
                    posts.title AS post_title, users.username AS author_username
             FROM comments
             JOIN posts ON comments.post_id = posts.id
             JOIN users ON comments.author_id = users.id
             ORDER BY comments.id",
            [],
        )?;
        decode_all(rows)
    }
}

impl FromRow for Comment {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Comment {
            id: row.integer("id")?,
            content: row.text("content")?,
            post_id: row.integer("post_id")?,
            author_id: row.integer("author_id")?,
        })
    }
}

impl FromRow for CommentWithDetails {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(CommentWithDetails {
            id: row.integer("id")?,
            content: row.text("content")?,
            post_id: row.integer("post_id")?,
            author_id: row.integer("author_id")?,
            post_title: row.text("post_title")?,
            author_username: row.text("author_username")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{PostRepository, UserRepository};
    use crate::db::test_database;

    #[test]
    fn test_details_name_post_and_commenter() {
        let db = test_database();
        let users = UserRepository::new(&db);
        let writer = users.create("manav", "m@x.com", "pw", "").expect("Failed to create user");
        let reader = users.create("rashmi", "r@x.com", "pw", "").expect("Failed to create user");
        let post = PostRepository::new(&db)
            .create("Night Sky", "stars", writer)
            .expect("Failed to create post");

        let repo = CommentRepository::new(&db);
        repo.create("Lovely", post, reader).expect("Failed to create comment");

        let details = repo.list_with_details().expect("Failed to list comments");
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].post_title, "Night Sky");
        assert_eq!(details[0].author_username, "rashmi");
        assert_eq!(details[0].post_id, post);
    }
}
