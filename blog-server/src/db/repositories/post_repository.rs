use blog_types::{Post, PostSummary, PostWithAuthor};

use crate::db::row::{decode_all, FromRow, Row};
use crate::db::{DatabaseManager, DbResult};

pub struct PostRepository<'a> {
    db: &'a DatabaseManager,
}

impl<'a> PostRepository<'a> {
    pub fn new(db: &'a DatabaseManager) -> Self {
        Self { db }
    }

    /// Create a new post
    pub fn create(&self, title: &str, content: &str, author_id: i64) -> DbResult<i64> {
        self.db.execute(
            "INSERT INTO posts (title, content, author_id) VALUES (?1, ?2, ?3)",
            (title, content, author_id),
        )?;
        self.db.last_insert_id()
    }

    pub fn list_all(&self) -> DbResult<Vec<Post>> {
        let rows = self.db.fetch_all(
            "SELECT id, title, content, author_id
             FROM posts
             ORDER BY id",
            [],
        )?;
        decode_all(rows)
    }

    /// Posts joined with their authors; posts without an existing author are left out
    pub fn list_with_authors(&self) -> DbResult<Vec<PostWithAuthor>> {
        let rows = self.db.fetch_all(
            "SELECT posts.id, posts.title, posts.content, posts.author_id,
                    users.username AS author_username, users.email AS author_email
             FROM posts
             JOIN users ON posts.author_id = users.id
             ORDER BY posts.id",
            [],
        )?;
        decode_all(rows)
    }

    /// Front page listing: id, title and author name
    pub fn list_summaries(&self) -> DbResult<Vec<PostSummary>> {
        let rows = self.db.fetch_all(
            "SELECT posts.id, posts.title, users.username AS author_name
             FROM posts
             JOIN users ON posts.author_id = users.id
             ORDER BY posts.id",
            [],
        )?;
        decode_all(rows)
    }
}

impl FromRow for Post {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Post {
            id: row.integer("id")?,
            title: row.text("title")?,
            content: row.text("content")?,
            author_id: row.integer("author_id")?,
        })
    }
}

impl FromRow for PostWithAuthor {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(PostWithAuthor {
            id: row.integer("id")?,
            title: row.text("title")?,
            content: row.text("content")?,
            author_id: row.integer("author_id")?,
            author_username: row.text("author_username")?,
            author_email: row.text("author_email")?,
        })
    }
}

impl FromRow for PostSummary {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(PostSummary {
            id: row.integer("id")?,
            title: row.text("title")?,
            author_name: row.text("author_name")?,
        })
    }
}
