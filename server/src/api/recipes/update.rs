use super::create::RecipeRequest;
use super::get::RecipeResponse;
use super::{invalid_body, invalid_id};
use crate::api::ErrorResponse;
use crate::error::AppError;
use crate::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{
    extract::{Path, State},
    Json,
};

/// Replaces every field of the recipe. Omitted optional fields are reset to
/// their defaults, and the ingredient list is rebuilt from scratch.
#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated successfully", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeResponse>, AppError> {
    let Path(id) = id.map_err(invalid_id)?;
    let Json(request) = payload.map_err(invalid_body)?;
    let draft = request.into_draft()?;

    let recipe = state.recipes.update_recipe(id, &draft)?;

    Ok(Json(recipe.into()))
}
