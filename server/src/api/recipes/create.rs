use super::get::RecipeResponse;
use super::invalid_body;
use crate::api::ErrorResponse;
use crate::error::AppError;
use crate::models::RecipeDraft;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

pub const MAX_TITLE_LENGTH: usize = 255;

/// Body for both creating and replacing a recipe.
///
/// Required fields are optional here so that a missing field is reported
/// with the same message as an empty one.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    /// Required, at most 255 characters
    #[schema(max_length = 255)]
    pub title: Option<String>,
    pub description: Option<String>,
    /// Required, at least one ingredient name
    pub ingredients: Option<Vec<String>>,
    /// Required
    pub instructions: Option<String>,
    /// Defaults to false
    pub vegetarian: Option<bool>,
    /// Defaults to 1
    #[schema(minimum = 1)]
    pub servings: Option<i32>,
}

impl RecipeRequest {
    /// Validate the request and fill in defaults.
    pub fn into_draft(self) -> Result<RecipeDraft, AppError> {
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(invalid("Title is required")),
        };
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(invalid("Title must not exceed 255 characters"));
        }

        let ingredients = match self.ingredients {
            Some(ingredients) if !ingredients.is_empty() => ingredients,
            _ => return Err(invalid("At least one ingredient is required")),
        };
        if ingredients.iter().any(|name| name.trim().is_empty()) {
            return Err(invalid("Ingredient names cannot be blank"));
        }

        let instructions = match self.instructions {
            Some(instructions) if !instructions.trim().is_empty() => instructions,
            _ => return Err(invalid("Instructions are required")),
        };

        let servings = self.servings.unwrap_or(1);
        if servings < 1 {
            return Err(invalid("Servings must be at least 1"));
        }

        Ok(RecipeDraft {
            title,
            description: self.description,
            ingredients,
            instructions,
            vegetarian: self.vegetarian.unwrap_or(false),
            servings,
        })
    }
}

fn invalid(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let draft = request.into_draft()?;

    let recipe = state.recipes.create_recipe(&draft)?;

    Ok((StatusCode::CREATED, Json(RecipeResponse::from(recipe))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RecipeRequest {
        RecipeRequest {
            title: Some("Pancakes".to_string()),
            description: None,
            ingredients: Some(vec!["Flour".to_string(), "Milk".to_string()]),
            instructions: Some("Whisk and fry".to_string()),
            vegetarian: None,
            servings: None,
        }
    }

    fn message(request: RecipeRequest) -> String {
        match request.into_draft() {
            Err(AppError::Validation(message)) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let draft = valid().into_draft().unwrap();
        assert!(!draft.vegetarian);
        assert_eq!(draft.servings, 1);
        assert_eq!(draft.description, None);
    }

    #[test]
    fn test_keeps_values_verbatim() {
        let draft = RecipeRequest {
            title: Some(" Pancakes ".to_string()),
            vegetarian: Some(true),
            servings: Some(3),
            ..valid()
        }
        .into_draft()
        .unwrap();
        assert_eq!(draft.title, " Pancakes ");
        assert!(draft.vegetarian);
        assert_eq!(draft.servings, 3);
        assert_eq!(draft.ingredients, vec!["Flour", "Milk"]);
    }

    #[test]
    fn test_title_boundary() {
        let at_limit = RecipeRequest {
            title: Some("a".repeat(MAX_TITLE_LENGTH)),
            ..valid()
        };
        assert!(at_limit.into_draft().is_ok());

        let over = RecipeRequest {
            title: Some("a".repeat(MAX_TITLE_LENGTH + 1)),
            ..valid()
        };
        assert_eq!(message(over), "Title must not exceed 255 characters");
    }

    #[test]
    fn test_negative_servings() {
        let request = RecipeRequest {
            servings: Some(-2),
            ..valid()
        };
        assert_eq!(message(request), "Servings must be at least 1");
    }

    #[test]
    fn test_missing_instructions() {
        let request = RecipeRequest {
            instructions: None,
            ..valid()
        };
        assert_eq!(message(request), "Instructions are required");
    }
}
