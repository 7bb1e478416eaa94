use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::session::UserSession;
use crate::state::AppState;

use super::{FeedSnapshot, FeedViewModel, SearchFilter};

#[derive(Deserialize)]
pub struct FeedQuery {
    /// Browsing works without a user; engagement over HTTP goes through the
    /// dedicated content routes instead.
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub search_term: String,
    pub category: Option<String>,
    pub author: Option<String>,
}

/// GET /api/v1/feed
///
/// One-shot aggregation over a request-scoped view-model. Stream failures
/// ride inside the snapshot rather than failing the request; a feed with a
/// dead video source is still a feed.
pub async fn handle_feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Json<FeedSnapshot> {
    let session = UserSession::new(query.user_id.unwrap_or_else(Uuid::nil));
    let filter = SearchFilter {
        search_term: query.search_term,
        category: query.category,
        author: query.author,
    };
    let vm = FeedViewModel::with_filter(session, state.repo.clone(), state.fetch_timeout(), filter);
    Json(vm.run_once().await)
}
