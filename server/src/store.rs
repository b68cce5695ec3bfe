//! Persistence for the recipe aggregate.
//!
//! A [`Recipe`] is stored as one `recipes` row plus one `ingredients` row per
//! ingredient name. Every mutation runs in a single transaction so a recipe
//! is never observable without its ingredients.

use crate::db::DbPool;
use crate::error::AppError;
use crate::filter::RecipeFilter;
use crate::models::{
    IngredientRow, NewIngredient, NewRecipe, Recipe, RecipeChanges, RecipeDraft, RecipeRow,
};
use crate::schema::{ingredients, recipes};
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

pub trait RecipeStore: Send + Sync {
    /// Persist a new recipe, assigning its id and both timestamps.
    fn create(&self, draft: &RecipeDraft) -> Result<Recipe, AppError>;

    fn get_by_id(&self, id: i64) -> Result<Recipe, AppError>;

    /// Every recipe, in insertion order.
    fn get_all(&self) -> Result<Vec<Recipe>, AppError>;

    /// Overwrite every editable field and replace the ingredient list.
    fn update(&self, id: i64, draft: &RecipeDraft) -> Result<Recipe, AppError>;

    /// Remove the recipe and all of its ingredients.
    fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Recipes matching every present criterion, in insertion order.
    fn search(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, AppError>;
}

pub struct DbRecipeStore {
    pool: DbPool,
}

impl DbRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl RecipeStore for DbRecipeStore {
    fn create(&self, draft: &RecipeDraft) -> Result<Recipe, AppError> {
        let _span = tracing::info_span!("db.query", op = "create_recipe").entered();
        let mut conn = self.pool.get()?;
        let now = Utc::now().naive_utc();

        let recipe = conn.transaction::<_, AppError, _>(|conn| {
            let new_recipe = NewRecipe {
                title: &draft.title,
                description: draft.description.as_deref(),
                instructions: &draft.instructions,
                vegetarian: draft.vegetarian,
                servings: draft.servings,
                created_at: now,
                updated_at: now,
            };

            let recipe_id: i64 = diesel::insert_into(recipes::table)
                .values(&new_recipe)
                .returning(recipes::id)
                .get_result(conn)?;

            insert_ingredients(conn, recipe_id, &draft.ingredients)?;

            load_recipe(conn, recipe_id)?.ok_or(AppError::NotFound(recipe_id))
        })?;

        tracing::info!(recipe_id = recipe.id, "created recipe");
        Ok(recipe)
    }

    fn get_by_id(&self, id: i64) -> Result<Recipe, AppError> {
        let _span = tracing::info_span!("db.query", op = "get_recipe").entered();
        let mut conn = self.pool.get()?;

        load_recipe(&mut conn, id)?.ok_or(AppError::NotFound(id))
    }

    fn get_all(&self) -> Result<Vec<Recipe>, AppError> {
        let _span = tracing::info_span!("db.query", op = "list_recipes").entered();
        let mut conn = self.pool.get()?;

        let rows: Vec<RecipeRow> = recipes::table
            .order(recipes::id.asc())
            .select(RecipeRow::as_select())
            .load(&mut conn)?;

        Ok(attach_ingredients(&mut conn, rows)?)
    }

    fn update(&self, id: i64, draft: &RecipeDraft) -> Result<Recipe, AppError> {
        let _span = tracing::info_span!("db.query", op = "update_recipe").entered();
        let mut conn = self.pool.get()?;
        let now = Utc::now().naive_utc();

        let recipe = conn.transaction::<_, AppError, _>(|conn| {
            let changes = RecipeChanges {
                title: &draft.title,
                description: draft.description.as_deref(),
                instructions: &draft.instructions,
                vegetarian: draft.vegetarian,
                servings: draft.servings,
                updated_at: now,
            };

            let updated = diesel::update(recipes::table.find(id))
                .set(&changes)
                .execute(conn)?;
            if updated == 0 {
                return Err(AppError::NotFound(id));
            }

            // Replace rather than diff: every update gets fresh ingredient rows.
            diesel::delete(ingredients::table.filter(ingredients::recipe_id.eq(id)))
                .execute(conn)?;
            insert_ingredients(conn, id, &draft.ingredients)?;

            load_recipe(conn, id)?.ok_or(AppError::NotFound(id))
        })?;

        tracing::info!(recipe_id = id, "updated recipe");
        Ok(recipe)
    }

    fn delete(&self, id: i64) -> Result<(), AppError> {
        let _span = tracing::info_span!("db.query", op = "delete_recipe").entered();
        let mut conn = self.pool.get()?;

        conn.transaction::<_, AppError, _>(|conn| {
            diesel::delete(ingredients::table.filter(ingredients::recipe_id.eq(id)))
                .execute(conn)?;

            let deleted = diesel::delete(recipes::table.find(id)).execute(conn)?;
            if deleted == 0 {
                return Err(AppError::NotFound(id));
            }

            Ok(())
        })?;

        tracing::info!(recipe_id = id, "deleted recipe");
        Ok(())
    }

    fn search(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, AppError> {
        let _span = tracing::info_span!("db.query", op = "search_recipes").entered();
        let mut conn = self.pool.get()?;

        let rows: Vec<RecipeRow> = filter
            .apply(recipes::table.into_boxed())
            .order(recipes::id.asc())
            .load(&mut conn)?;

        tracing::debug!(?filter, matches = rows.len(), "searched recipes");
        Ok(attach_ingredients(&mut conn, rows)?)
    }
}

fn insert_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    names: &[String],
) -> QueryResult<()> {
    if names.is_empty() {
        return Ok(());
    }

    let rows: Vec<NewIngredient> = names
        .iter()
        .map(|name| NewIngredient { name, recipe_id })
        .collect();

    diesel::insert_into(ingredients::table)
        .values(&rows)
        .execute(conn)?;

    Ok(())
}

fn load_recipe(conn: &mut SqliteConnection, id: i64) -> QueryResult<Option<Recipe>> {
    let row: Option<RecipeRow> = recipes::table
        .find(id)
        .select(RecipeRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };

    let ingredients: Vec<IngredientRow> = IngredientRow::belonging_to(&row)
        .order(ingredients::id.asc())
        .select(IngredientRow::as_select())
        .load(conn)?;

    Ok(Some(Recipe::from_rows(row, ingredients)))
}

fn attach_ingredients(
    conn: &mut SqliteConnection,
    rows: Vec<RecipeRow>,
) -> QueryResult<Vec<Recipe>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ingredients: Vec<IngredientRow> = IngredientRow::belonging_to(&rows)
        .order(ingredients::id.asc())
        .select(IngredientRow::as_select())
        .load(conn)?;

    Ok(ingredients
        .grouped_by(&rows)
        .into_iter()
        .zip(rows)
        .map(|(ingredients, row)| Recipe::from_rows(row, ingredients))
        .collect())
}
