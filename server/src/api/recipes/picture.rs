use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::ErrorResponse;
use crate::store::{recipes, StoreError};
use crate::AppState;

fn webp_response(data: Vec<u8>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/webp")
        .body(Body::from(data))
        .unwrap()
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/picture",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe picture data", content_type = "image/webp"),
        (status = 404, description = "Recipe or picture not found", body = ErrorResponse)
    )
)]
pub async fn get_picture(
    State(state): State<AppState>,
    Path(idx): Path<i32>,
) -> impl IntoResponse {
    match recipes::fetch_picture(&state.pool, idx) {
        Ok(data) => webp_response(data),
        Err(StoreError::PictureNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Picture not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch picture: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch picture".to_string(),
                }),
            )
                .into_response()
        }
    }
}
