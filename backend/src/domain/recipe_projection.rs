//! Read models derived from the recipe aggregate.
//!
//! Projections never trust storage iteration order: ingredients are sorted by
//! position and steps by number every time a detail view is built. Both views
//! are pure functions of the aggregate.

use chrono::{DateTime, Utc};

use super::{Category, CategoryId, Difficulty, Recipe, RecipeId};

/// Category as shown alongside a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub id: CategoryId,
    pub name: String,
    pub is_default: bool,
}

impl From<&Category> for CategoryView {
    fn from(value: &Category) -> Self {
        Self {
            id: value.id(),
            name: value.name().to_owned(),
            is_default: value.is_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientView {
    pub position: u32,
    pub quantity: String,
    pub unit: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub number: u32,
    pub instruction: String,
}

/// Full recipe including ordered ingredients and steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetail {
    pub id: RecipeId,
    pub title: String,
    pub difficulty: Difficulty,
    pub cooking_time_minutes: u32,
    pub ingredients: Vec<IngredientView>,
    pub steps: Vec<StepView>,
    pub categories: Vec<CategoryView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing entry without ingredients or steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub difficulty: Difficulty,
    pub cooking_time_minutes: u32,
    pub categories: Vec<CategoryView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn category_views(recipe: &Recipe) -> Vec<CategoryView> {
    recipe.categories().iter().map(CategoryView::from).collect()
}

impl From<&Recipe> for RecipeDetail {
    fn from(recipe: &Recipe) -> Self {
        let mut ingredients: Vec<IngredientView> = recipe
            .ingredients()
            .iter()
            .map(|ingredient| IngredientView {
                position: ingredient.position(),
                quantity: ingredient.quantity().to_owned(),
                unit: ingredient.unit().to_owned(),
                name: ingredient.name().to_owned(),
            })
            .collect();
        ingredients.sort_by_key(|ingredient| ingredient.position);

        let mut steps: Vec<StepView> = recipe
            .steps()
            .iter()
            .map(|step| StepView {
                number: step.number(),
                instruction: step.instruction().to_owned(),
            })
            .collect();
        steps.sort_by_key(|step| step.number);

        Self {
            id: recipe.id(),
            title: recipe.title().to_owned(),
            difficulty: recipe.difficulty(),
            cooking_time_minutes: recipe.cooking_time_minutes(),
            ingredients,
            steps,
            categories: category_views(recipe),
            created_at: recipe.created_at(),
            updated_at: recipe.updated_at(),
        }
    }
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id(),
            title: recipe.title().to_owned(),
            difficulty: recipe.difficulty(),
            cooking_time_minutes: recipe.cooking_time_minutes(),
            categories: category_views(recipe),
            created_at: recipe.created_at(),
            updated_at: recipe.updated_at(),
        }
    }
}
