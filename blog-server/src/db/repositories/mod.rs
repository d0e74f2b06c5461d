mod user_repository;
mod post_repository;
mod comment_repository;
mod follower_repository;

pub use user_repository::UserRepository;
pub use post_repository::PostRepository;
pub use comment_repository::CommentRepository;
pub use follower_repository::FollowerRepository;
