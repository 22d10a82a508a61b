pub mod create;
pub mod get;
pub mod picture;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe).put(update::update_recipe),
        )
        .route("/{id}/picture", get(picture::get_picture))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        picture::get_picture,
    ),
    components(schemas(
        create::CreateRecipeRequest,
        create::CreateRecipeResponse,
        get::RecipeResponse,
        update::UpdateRecipeRequest,
    ))
)]
pub struct ApiDoc;
