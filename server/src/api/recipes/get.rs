use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use potluck_core::types::Recipe;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::{ErrorResponse, IngredientPayload};
use crate::query::QueryError;
use crate::store::StoreError;
use crate::AppState;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i32,
    pub author: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
    pub cooking_time: i32,
    pub servings: i32,
    pub ingredients: Vec<IngredientPayload>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id.unwrap_or_default(),
            author: recipe.author,
            title: recipe.title,
            description: recipe.description,
            steps: recipe.steps,
            cooking_time: recipe.cooking_time,
            servings: recipe.servings,
            ingredients: recipe.ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(idx): Path<i32>,
) -> impl IntoResponse {
    match state.recipe(idx) {
        Ok(recipe) => (StatusCode::OK, Json(RecipeResponse::from(recipe))).into_response(),
        Err(QueryError::Store(StoreError::RecipeNotFound(_))) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
