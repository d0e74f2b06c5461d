pub mod posts;
pub mod template;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use template::HtmlTemplate;

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(posts::index))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
