use super::get::RecipeResponse;
use crate::api::ErrorResponse;
use crate::error::AppError;
use crate::filter::RecipeFilter;
use crate::AppState;
use axum::{extract::State, Json};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;
use utoipa::IntoParams;

/// Search criteria. Every parameter is optional; present ones are combined
/// with AND. With no parameters at all, every recipe is returned.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListRecipesParams {
    /// Filter by vegetarian status
    pub vegetarian: Option<bool>,
    /// Filter by exact number of servings
    pub servings: Option<i32>,
    /// Keep recipes containing any of these ingredients (case-insensitive,
    /// whole names). Repeat the parameter or separate names with commas.
    #[serde(default)]
    pub include_ingredients: Option<Vec<String>>,
    /// `includeIngredients[]` spelling, merged into `include_ingredients`.
    #[serde(default, rename = "includeIngredients[]")]
    #[param(ignore)]
    pub include_ingredients_brackets: Option<Vec<String>>,
    /// Drop recipes containing any of these ingredients (case-insensitive,
    /// whole names). Takes precedence over includeIngredients.
    #[serde(default)]
    pub exclude_ingredients: Option<Vec<String>>,
    #[serde(default, rename = "excludeIngredients[]")]
    #[param(ignore)]
    pub exclude_ingredients_brackets: Option<Vec<String>>,
    /// Keep recipes whose instructions contain this text (case-sensitive)
    pub content_instructions: Option<String>,
}

impl ListRecipesParams {
    pub fn into_filter(self) -> RecipeFilter {
        RecipeFilter {
            vegetarian: self.vegetarian,
            servings: self.servings,
            include_ingredients: fold_names(merge(
                self.include_ingredients,
                self.include_ingredients_brackets,
            )),
            exclude_ingredients: fold_names(merge(
                self.exclude_ingredients,
                self.exclude_ingredients_brackets,
            )),
            content: self.content_instructions,
        }
    }
}

/// Present if either spelling of the parameter was given.
fn merge(plain: Option<Vec<String>>, brackets: Option<Vec<String>>) -> Option<Vec<String>> {
    match (plain, brackets) {
        (Some(mut plain), Some(brackets)) => {
            plain.extend(brackets);
            Some(plain)
        }
        (plain, brackets) => plain.or(brackets),
    }
}

/// Split comma-separated values and lowercase each name. A parameter that
/// was given but holds no names stays present as an empty list.
fn fold_names(values: Option<Vec<String>>) -> Option<Vec<String>> {
    values.map(|values| {
        values
            .iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_lowercase)
            .collect()
    })
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Matching recipes", body = Vec<RecipeResponse>),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    params: Result<Query<ListRecipesParams>, QueryRejection>,
) -> Result<Json<Vec<RecipeResponse>>, AppError> {
    let Query(params) =
        params.map_err(|e| AppError::Validation(format!("Invalid query parameters: {}", e)))?;
    let filter = params.into_filter();

    let recipes = state.recipes.list_recipes(&filter)?;

    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}
