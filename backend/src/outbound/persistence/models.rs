//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{categories, ingredients, recipe_categories, recipes, steps};

/// Row struct for reading from the categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub is_default: bool,
}

/// Row struct for reading from the recipes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub difficulty: String,
    pub cooking_time_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new recipe headers.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub difficulty: &'a str,
    pub cooking_time_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset overwriting a recipe's scalar fields on replacement.
///
/// `created_at` is never part of a replacement.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeUpdate<'a> {
    pub title: &'a str,
    pub difficulty: &'a str,
    pub cooking_time_minutes: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub recipe_id: i64,
    pub quantity: String,
    pub unit: String,
    pub name: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ingredients)]
pub(crate) struct NewIngredientRow<'a> {
    pub recipe_id: i64,
    pub quantity: &'a str,
    pub unit: &'a str,
    pub name: &'a str,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = steps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StepRow {
    pub recipe_id: i64,
    pub step_number: i32,
    pub instruction: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = steps)]
pub(crate) struct NewStepRow<'a> {
    pub recipe_id: i64,
    pub step_number: i32,
    pub instruction: &'a str,
}

/// Association joined with its category: `(recipe_id, position, category)`.
pub(crate) type RecipeCategoryRow = (i64, i32, CategoryRow);

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipe_categories)]
pub(crate) struct NewRecipeCategoryRow {
    pub recipe_id: i64,
    pub category_id: i64,
    pub position: i32,
}
