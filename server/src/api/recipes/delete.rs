use super::invalid_id;
use crate::api::ErrorResponse;
use crate::error::AppError;
use crate::AppState;
use axum::extract::rejection::PathRejection;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted successfully"),
        (status = 400, description = "Invalid recipe id", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id.map_err(invalid_id)?;
    state.recipes.delete_recipe(id)?;
    Ok(StatusCode::NO_CONTENT)
}
