use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use potluck_core::types::User;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::api::ErrorResponse;
use crate::auth::BearerToken;
use crate::query::QueryError;
use crate::AppState;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Recipe ids this user has posted.
    pub posts: Vec<i32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            posts: user.posts,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/me",
    tag = "users",
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn me(BearerToken(token): BearerToken, State(state): State<AppState>) -> impl IntoResponse {
    match state.current_user(&token) {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
        Err(QueryError::NoLoggedUser) | Err(QueryError::Token(_)) => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "No logged user".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to resolve current user: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to resolve current user".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[derive(OpenApi)]
#[openapi(paths(me), components(schemas(UserResponse)))]
pub struct ApiDoc;
