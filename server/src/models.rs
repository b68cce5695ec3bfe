use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecipeRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub instructions: String,
    pub vegetarian: bool,
    pub servings: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub instructions: &'a str,
    pub vegetarian: bool,
    pub servings: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full replacement of a recipe's columns. `None` writes NULL.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(treat_none_as_null = true)]
pub struct RecipeChanges<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub instructions: &'a str,
    pub vegetarian: bool,
    pub servings: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(RecipeRow, foreign_key = recipe_id))]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IngredientRow {
    pub id: i64,
    pub name: String,
    pub recipe_id: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub name: &'a str,
    pub recipe_id: i64,
}

/// A recipe together with the names of the ingredients it owns.
///
/// The store assembles this from the `recipes` and `ingredients` tables;
/// ingredient names keep their insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub vegetarian: bool,
    pub servings: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Recipe {
    pub fn from_rows(row: RecipeRow, ingredients: Vec<IngredientRow>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            ingredients: ingredients.into_iter().map(|i| i.name).collect(),
            instructions: row.instructions,
            vegetarian: row.vegetarian,
            servings: row.servings,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Every user-editable field of a recipe, with defaults already applied.
///
/// Used for both creation and full-replace updates.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub vegetarian: bool,
    pub servings: i32,
}
