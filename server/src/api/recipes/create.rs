use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use potluck_core::image::ImagePatch;
use potluck_core::types::Recipe;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::{ErrorResponse, IngredientPayload};
use crate::auth::AuthClaims;
use crate::store::recipes;
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub author: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
    pub cooking_time: i32,
    pub servings: i32,
    pub ingredients: Vec<IngredientPayload>,
    /// Base64-encoded image data; omit for no picture.
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub id: i32,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthClaims(_claims): AuthClaims,
    State(state): State<AppState>,
    Json(request): Json<CreateRecipeRequest>,
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
        id: None,
        author: request.author,
        title: request.title,
        description: request.description,
        steps: request.steps,
        cooking_time: request.cooking_time,
        servings: request.servings,
        ingredients: request.ingredients.into_iter().map(Into::into).collect(),
    };

    match recipes::insert(&state.pool, recipe, patch) {
        Ok(saved) => (
            StatusCode::CREATED,
            Json(CreateRecipeResponse {
                id: saved.id.unwrap_or_default(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
