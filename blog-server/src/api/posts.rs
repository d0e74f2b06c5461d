use askama::Template;
use axum::extract::State;

use blog_types::PostSummary;

use super::HtmlTemplate;
use crate::db::{with_connection, DataManager, DbResult};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub posts: Vec<PostSummary>,
}

/// GET / - List every post with its author's username
///
/// A database that cannot be reached or queried yields an empty list; the
/// error only shows up in the log.
pub async fn index(State(state): State<AppState>) -> HtmlTemplate<IndexTemplate> {
    let posts = load_post_summaries(&state).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to load posts for the front page");
        Vec::new()
    });

    HtmlTemplate(IndexTemplate { posts })
}

fn load_post_summaries(state: &AppState) -> DbResult<Vec<PostSummary>> {
    with_connection(state.database.clone(), |db| {
        DataManager::new(db).get_post_summaries()
    })
}
