//! Port for recipe persistence.
//!
//! Every method is one unit of work: adapters either apply all of a
//! mutation's writes (recipe row, ingredients, steps and category
//! associations) or none of them. Ownership is always part of the lookup, so
//! a recipe owned by someone else behaves exactly like a missing one.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{CategoryId, NewRecipe, Recipe, RecipeId, RecipeQueryPlan, RecipeReplacement, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "recipe repository query failed: {message}",
        /// An association referenced a category that does not exist.
        MissingCategory { category_id: CategoryId } =>
            "category {category_id} does not exist",
    }
}

/// Port for reading and writing recipe aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Count every match of the plan's predicate and return the requested
    /// window in plan order.
    ///
    /// Both reads happen in the same unit of work.
    async fn find_page(&self, plan: &RecipeQueryPlan) -> Result<Page<Recipe>, RecipeRepositoryError>;

    /// Load one recipe with its children if `owner` owns it.
    async fn find_owned(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Insert a recipe, its children and category associations.
    async fn create(&self, recipe: &NewRecipe) -> Result<RecipeId, RecipeRepositoryError>;

    /// Swap every child row and association of an owned recipe and overwrite
    /// its scalar fields.
    ///
    /// Returns `false` when the recipe no longer exists for the owner.
    async fn replace(&self, replacement: &RecipeReplacement) -> Result<bool, RecipeRepositoryError>;

    /// Delete an owned recipe together with its children and associations.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<bool, RecipeRepositoryError>;
}
