use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDateTime;
use potluck_core::types::Post;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::api::ErrorResponse;
use crate::auth::BearerToken;
use crate::query::QueryError;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct FeedParams {
    /// Page size. Default: 20.
    pub items: Option<i64>,
    /// Number of posts to skip. Default: 0.
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: i32,
    pub author: String,
    pub recipe_id: i32,
    pub posted_at: NaiveDateTime,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author: post.author,
            recipe_id: post.recipe_id,
            posted_at: post.posted_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/feed",
    tag = "feed",
    params(FeedParams),
    responses(
        (status = 200, description = "A page of the feed, newest first", body = [PostResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn feed(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> impl IntoResponse {
    let items = params.items.unwrap_or(20).clamp(1, 100);
    let offset = params.offset.unwrap_or(0).max(0);

    match state.feed(&token, items, offset) {
        Ok(posts) => {
            let page: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(page)).into_response()
        }
        Err(QueryError::Token(_)) | Err(QueryError::NoLoggedUser) => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Invalid or expired token".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch feed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch feed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[derive(OpenApi)]
#[openapi(paths(feed), components(schemas(PostResponse)))]
pub struct ApiDoc;
