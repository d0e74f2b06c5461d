use blog_types::{Comment, CommentWithDetails, Follower, Post, PostSummary, PostWithAuthor, User};

use super::repositories::{CommentRepository, FollowerRepository, PostRepository, UserRepository};
use super::{DatabaseManager, DbResult};

/// Named operations over the four tables.
///
/// Nothing is validated here: lengths, formats and referential integrity are
/// left to the schema's own constraints.
pub struct DataManager<'a> {
    users: UserRepository<'a>,
    posts: PostRepository<'a>,
    comments: CommentRepository<'a>,
    followers: FollowerRepository<'a>,
}

impl<'a> DataManager<'a> {
    pub fn new(db: &'a DatabaseManager) -> Self {
        Self {
            users: UserRepository::new(db),
            posts: PostRepository::new(db),
            comments: CommentRepository::new(db),
            followers: FollowerRepository::new(db),
        }
    }

    /// Insert a user; a missing bio is stored as an empty string.
    /// Returns the new user's id.
    pub fn insert_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        bio: Option<&str>,
    ) -> DbResult<i64> {
        self.users.create(username, email, password, bio.unwrap_or(""))
    }

    pub fn insert_post(&self, title: &str, content: &str, author_id: i64) -> DbResult<i64> {
        self.posts.create(title, content, author_id)
    }

    pub fn insert_comment(&self, content: &str, post_id: i64, author_id: i64) -> DbResult<i64> {
        self.comments.create(content, post_id, author_id)
    }

    pub fn insert_follower(&self, follower_id: i64, following_id: i64) -> DbResult<()> {
        self.followers.create(follower_id, following_id)
    }

    pub fn get_all_users(&self) -> DbResult<Vec<User>> {
        self.users.list_all()
    }

    pub fn get_all_posts(&self) -> DbResult<Vec<Post>> {
        self.posts.list_all()
    }

    pub fn get_all_comments(&self) -> DbResult<Vec<Comment>> {
        self.comments.list_all()
    }

    pub fn get_all_followers(&self) -> DbResult<Vec<Follower>> {
        self.followers.list_all()
    }

    pub fn get_posts_with_authors(&self) -> DbResult<Vec<PostWithAuthor>> {
        self.posts.list_with_authors()
    }

    pub fn get_comments_with_posts_and_authors(&self) -> DbResult<Vec<CommentWithDetails>> {
        self.comments.list_with_details()
    }

    pub fn get_post_summaries(&self) -> DbResult<Vec<PostSummary>> {
        self.posts.list_summaries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{count_error_events, test_database, DbError};

    fn count(db: &DatabaseManager, table: &str) -> i64 {
        let rows = db
            .fetch_all(&format!("SELECT COUNT(*) AS n FROM {table}"), [])
            .expect("Failed to count rows");
        rows[0].integer("n").expect("Missing count")
    }

    #[test]
    fn test_each_insert_adds_exactly_one_row() {
        let db = test_database();
        let data = DataManager::new(&db);

        let alice = data.insert_user("alice", "a@x.com", "pw", Some("bio")).unwrap();
        assert_eq!(count(&db, "users"), 1);
        let bob = data.insert_user("bob", "b@x.com", "pw", None).unwrap();
        assert_eq!(count(&db, "users"), 2);

        let post = data.insert_post("T", "C", alice).unwrap();
        assert_eq!(count(&db, "posts"), 1);

        data.insert_comment("nice", post, bob).unwrap();
        assert_eq!(count(&db, "comments"), 1);

        data.insert_follower(bob, alice).unwrap();
        assert_eq!(count(&db, "followers"), 1);
    }

    #[test]
    fn test_get_all_users_returns_inserted_users() {
        let db = test_database();
        let data = DataManager::new(&db);

        let alice = data.insert_user("alice", "a@x.com", "pw", Some("bio")).unwrap();
        let bob = data.insert_user("bob", "b@x.com", "secret", None).unwrap();

        let users = data.get_all_users().expect("Failed to get users");
        assert_eq!(
            users,
            vec![
                User {
                    id: alice,
                    username: "alice".to_string(),
                    email: "a@x.com".to_string(),
                    password: "pw".to_string(),
                    bio: "bio".to_string(),
                },
                User {
                    id: bob,
                    username: "bob".to_string(),
                    email: "b@x.com".to_string(),
                    password: "secret".to_string(),
                    bio: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_post_with_author_scenario() {
        let db = test_database();
        let data = DataManager::new(&db);

        let alice = data.insert_user("alice", "a@x.com", "pw", Some("bio")).unwrap();
        let post = data.insert_post("T", "C", alice).unwrap();

        let posts = data.get_posts_with_authors().expect("Failed to join posts");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, post);
        assert_eq!(posts[0].author_id, alice);
        assert_eq!(posts[0].author_username, "alice");
        assert_eq!(posts[0].author_email, "a@x.com");
        assert_eq!(posts[0].content, "C");
    }

    #[test]
    fn test_foreign_key_violation_leaves_tables_unchanged() {
        let db = test_database();
        let data = DataManager::new(&db);
        let alice = data.insert_user("alice", "a@x.com", "pw", None).unwrap();
        let post = data.insert_post("T", "C", alice).unwrap();

        assert!(matches!(data.insert_post("T", "C", alice + 100), Err(DbError::Query(_))));
        assert_eq!(count(&db, "posts"), 1);

        assert!(matches!(data.insert_comment("c", post + 100, alice), Err(DbError::Query(_))));
        assert!(matches!(data.insert_comment("c", post, alice + 100), Err(DbError::Query(_))));
        assert_eq!(count(&db, "comments"), 0);

        assert!(matches!(data.insert_follower(alice, alice + 100), Err(DbError::Query(_))));
        assert_eq!(count(&db, "followers"), 0);
    }

    #[test]
    fn test_reads_on_closed_connection_fail_cleanly() {
        let mut db = test_database();
        db.close();
        let data = DataManager::new(&db);

        assert!(matches!(data.get_all_users(), Err(DbError::NotConnected)));
        assert!(matches!(data.get_all_posts(), Err(DbError::NotConnected)));
        assert!(matches!(data.get_all_comments(), Err(DbError::NotConnected)));
        assert!(matches!(data.get_all_followers(), Err(DbError::NotConnected)));
        assert!(matches!(data.get_posts_with_authors(), Err(DbError::NotConnected)));
        assert!(matches!(
            data.get_comments_with_posts_and_authors(),
            Err(DbError::NotConnected)
        ));
        assert!(matches!(data.get_post_summaries(), Err(DbError::NotConnected)));

        let errors = count_error_events(|| {
            let _ = data.get_all_users();
            let _ = data.get_posts_with_authors();
            let _ = data.insert_user("alice", "a@x.com", "pw", None);
        });
        assert_eq!(errors, 3);
    }

    #[test]
    fn test_empty_tables_read_as_empty_not_error() {
        let db = test_database();
        let data = DataManager::new(&db);
        assert!(data.get_all_users().expect("Failed to get users").is_empty());
        assert!(data.get_comments_with_posts_and_authors().expect("Failed to join").is_empty());
    }
}
