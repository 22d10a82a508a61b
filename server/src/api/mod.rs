pub mod feed;
pub mod me;
pub mod recipes;

use axum::routing::get;
use axum::Router;
use potluck_core::types::Ingredient;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::AppState;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wire form of an ingredient line item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngredientPayload {
    pub name: String,
    pub quantity: f64,
    pub units: String,
}

impl From<Ingredient> for IngredientPayload {
    fn from(i: Ingredient) -> Self {
        Self {
            name: i.name,
            quantity: i.quantity,
            units: i.units,
        }
    }
}

impl From<IngredientPayload> for Ingredient {
    fn from(p: IngredientPayload) -> Self {
        Self {
            name: p.name,
            quantity: p.quantity,
            units: p.units,
        }
    }
}

/// Returns the router for all /api endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/recipes", recipes::router())
        .route("/api/me", get(me::me))
        .route("/api/feed", get(feed::feed))
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse, IngredientPayload)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    // Add security scheme
    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        recipes::ApiDoc::openapi(),
        me::ApiDoc::openapi(),
        feed::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
