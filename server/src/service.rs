use crate::error::AppError;
use crate::filter::RecipeFilter;
use crate::models::{Recipe, RecipeDraft};
use crate::store::RecipeStore;
use std::sync::Arc;

/// Request-level recipe operations on top of a [`RecipeStore`].
///
/// Operations that address a recipe by id resolve it first, so a missing
/// recipe surfaces as [`AppError::NotFound`] before anything is written.
#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    pub fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe, AppError> {
        self.store.create(draft)
    }

    pub fn get_recipe(&self, id: i64) -> Result<Recipe, AppError> {
        self.store.get_by_id(id)
    }

    pub fn get_all_recipes(&self) -> Result<Vec<Recipe>, AppError> {
        self.store.get_all()
    }

    pub fn update_recipe(&self, id: i64, draft: &RecipeDraft) -> Result<Recipe, AppError> {
        let existing = self.get_recipe(id)?;
        self.store.update(existing.id, draft)
    }

    pub fn delete_recipe(&self, id: i64) -> Result<(), AppError> {
        let existing = self.get_recipe(id)?;
        self.store.delete(existing.id)
    }

    pub fn search_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, AppError> {
        self.store.search(filter)
    }

    /// List recipes, taking the plain list-all path when no criterion is
    /// present at all.
    pub fn list_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, AppError> {
        if filter.is_unconstrained() {
            self.get_all_recipes()
        } else {
            self.search_recipes(filter)
        }
    }
}
