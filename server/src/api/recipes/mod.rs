pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::error::AppError;
use crate::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

/// Malformed JSON is reported like any other validation failure.
fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
}

/// A recipe id that isn't an integer gets the same JSON error shape.
fn invalid_id(rejection: PathRejection) -> AppError {
    AppError::Validation(format!("Invalid recipe id: {}", rejection.body_text()))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(create::RecipeRequest, get::RecipeResponse))
)]
pub struct ApiDoc;
