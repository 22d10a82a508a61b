use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use potluck_core::image::ImagePatch;
use potluck_core::types::Recipe;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::recipes::get::RecipeResponse;
use crate::api::{ErrorResponse, IngredientPayload};
use crate::auth::AuthClaims;
use crate::store::{recipes, StoreError};
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub author: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
    pub cooking_time: i32,
    pub servings: i32,
    pub ingredients: Vec<IngredientPayload>,
    /// Three-state picture update: omit to keep the stored picture, send an
    /// empty string to clear it, send base64 data to replace it.
    pub image: Option<String>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated successfully", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller does not own this recipe", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthClaims(claims): AuthClaims,
    State(state): State<AppState>,
    Path(idx): Path<i32>,
    Json(request): Json<UpdateRecipeRequest>,
) -> impl IntoResponse {
    if request.title.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Title cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let patch = match ImagePatch::from_transport(request.image.as_deref()) {
        Ok(p) => p,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid image encoding".to_string(),
                }),
            )
                .into_response()
        }
    };

    let recipe = Recipe {
        id: Some(idx),
        author: request.author,
        title: request.title,
        description: request.description,
        steps: request.steps,
        cooking_time: request.cooking_time,
        servings: request.servings,
        ingredients: request.ingredients.into_iter().map(Into::into).collect(),
    };

    match recipes::update(&state.pool, &claims.identity, &recipe, patch) {
        Ok(updated) => (StatusCode::OK, Json(RecipeResponse::from(updated))).into_response(),
        Err(StoreError::NotOwner { .. }) => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "Caller does not own this recipe".to_string(),
            }),
        )
            .into_response(),
        Err(StoreError::RecipeNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response(),
        Err(StoreError::Image(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid image data".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
