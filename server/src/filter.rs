//! Search criteria for recipe listing and their translation into SQL.
//!
//! Every criterion is optional and they combine with AND. An absent
//! criterion adds nothing to the query. Ingredient criteria compare whole,
//! lowercased names; the instructions criterion is a case-sensitive
//! substring test.

use crate::schema::{ingredients, recipes};
use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use diesel::sqlite::Sqlite;

define_sql_function! {
    /// Unicode lowercase fold matching `str::to_lowercase`. SQLite's own
    /// `lower()` folds ASCII only. Registered on every pooled connection in
    /// [`crate::db`].
    fn unicode_lower(x: Text) -> Text;
}

define_sql_function! {
    /// SQLite `instr()`: 1-based position of `needle` in `haystack`, 0 if absent.
    /// Unlike `LIKE`, the comparison is case-sensitive.
    fn instr(haystack: Text, needle: Text) -> Integer;
}

pub type BoxedRecipeQuery<'a> = recipes::BoxedQuery<'a, Sqlite>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    /// Keep recipes whose vegetarian flag equals this value.
    pub vegetarian: Option<bool>,
    /// Keep recipes with exactly this many servings.
    pub servings: Option<i32>,
    /// Keep recipes owning at least one of these ingredients. Names must
    /// already be lowercased. An empty list matches everything.
    pub include_ingredients: Option<Vec<String>>,
    /// Drop recipes owning any of these ingredients. Names must already be
    /// lowercased. An empty list drops nothing.
    pub exclude_ingredients: Option<Vec<String>>,
    /// Keep recipes whose instructions contain this text.
    pub content: Option<String>,
}

impl RecipeFilter {
    /// True when no criterion is present at all. Present-but-empty lists
    /// still count as present.
    pub fn is_unconstrained(&self) -> bool {
        self.vegetarian.is_none()
            && self.servings.is_none()
            && self.include_ingredients.is_none()
            && self.exclude_ingredients.is_none()
            && self.content.is_none()
    }

    /// Narrow `query` to the recipes matching every present criterion.
    ///
    /// Ingredient criteria are `IN` / `NOT IN` subselects over
    /// `ingredients.recipe_id` rather than joins, so a recipe can never be
    /// returned twice. Exclusion is an independent veto and wins over
    /// inclusion.
    pub fn apply<'a>(&'a self, mut query: BoxedRecipeQuery<'a>) -> BoxedRecipeQuery<'a> {
        if let Some(vegetarian) = self.vegetarian {
            query = query.filter(recipes::vegetarian.eq(vegetarian));
        }

        if let Some(servings) = self.servings {
            query = query.filter(recipes::servings.eq(servings));
        }

        if let Some(names) = non_empty(&self.include_ingredients) {
            query = query.filter(
                recipes::id.eq_any(
                    ingredients::table
                        .filter(unicode_lower(ingredients::name).eq_any(names))
                        .select(ingredients::recipe_id),
                ),
            );
        }

        if let Some(names) = non_empty(&self.exclude_ingredients) {
            query = query.filter(
                recipes::id.ne_all(
                    ingredients::table
                        .filter(unicode_lower(ingredients::name).eq_any(names))
                        .select(ingredients::recipe_id),
                ),
            );
        }

        if let Some(content) = self.content.as_deref() {
            query = query.filter(instr(recipes::instructions, content).gt(0));
        }

        query
    }
}

fn non_empty(names: &Option<Vec<String>>) -> Option<&[String]> {
    names.as_deref().filter(|names| !names.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;

    fn sql_for(filter: &RecipeFilter) -> String {
        let query = filter.apply(recipes::table.into_boxed());
        debug_query::<Sqlite, _>(&query).to_string()
    }

    #[test]
    fn test_default_is_unconstrained() {
        assert!(RecipeFilter::default().is_unconstrained());
    }

    #[test]
    fn test_empty_list_is_still_a_constraint_for_dispatch() {
        let filter = RecipeFilter {
            include_ingredients: Some(vec![]),
            ..Default::default()
        };
        assert!(!filter.is_unconstrained());
    }

    #[test]
    fn test_each_field_counts_as_constraint() {
        let filters = [
            RecipeFilter {
                vegetarian: Some(false),
                ..Default::default()
            },
            RecipeFilter {
                servings: Some(2),
                ..Default::default()
            },
            RecipeFilter {
                exclude_ingredients: Some(vec!["egg".to_string()]),
                ..Default::default()
            },
            RecipeFilter {
                content: Some(String::new()),
                ..Default::default()
            },
        ];
        for filter in filters {
            assert!(!filter.is_unconstrained(), "{:?}", filter);
        }
    }

    #[test]
    fn test_no_criteria_adds_no_where_clause() {
        let sql = sql_for(&RecipeFilter::default());
        assert!(!sql.contains("WHERE"), "{}", sql);
    }

    #[test]
    fn test_empty_ingredient_lists_add_no_where_clause() {
        let sql = sql_for(&RecipeFilter {
            include_ingredients: Some(vec![]),
            exclude_ingredients: Some(vec![]),
            ..Default::default()
        });
        assert!(!sql.contains("WHERE"), "{}", sql);
    }

    #[test]
    fn test_exclude_uses_not_in_subselect() {
        let sql = sql_for(&RecipeFilter {
            exclude_ingredients: Some(vec!["beef".to_string()]),
            ..Default::default()
        });
        assert!(sql.contains("NOT IN"), "{}", sql);
        assert!(sql.contains("unicode_lower("), "{}", sql);
    }

    #[test]
    fn test_content_is_bound_not_interpolated() {
        let sql = sql_for(&RecipeFilter {
            content: Some("'; DROP TABLE recipes; --".to_string()),
            ..Default::default()
        });
        let (statement, binds) = sql.split_once("-- binds:").unwrap();
        assert!(statement.contains("instr("), "{}", sql);
        assert!(!statement.contains("DROP"), "{}", sql);
        assert!(binds.contains("DROP TABLE"), "{}", sql);
    }
}
