//! Driving port for recipe reads.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Error, RecipeDetail, RecipeFilter, RecipeId, RecipeSummary, UserId};

/// Domain use-case port for listing and fetching the caller's recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeQuery: Send + Sync {
    /// List one page of the filter owner's recipes.
    async fn list(&self, filter: &RecipeFilter) -> Result<Page<RecipeSummary>, Error>;

    /// Fetch one recipe; missing and foreign recipes are both not-found.
    async fn get(&self, owner: &UserId, id: RecipeId) -> Result<RecipeDetail, Error>;
}
