//! Driving port for recipe mutations.
//!
//! Inbound adapters validate the request body into a [`RecipeDraft`] and hand
//! it over together with the authenticated caller. The owner never comes from
//! the body.

use async_trait::async_trait;

use crate::domain::{Error, RecipeDraft, RecipeId, UserId};

/// Request to create a recipe for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecipeRequest {
    pub owner: UserId,
    pub draft: RecipeDraft,
}

/// Request to replace the content of one of the caller's recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecipeRequest {
    pub owner: UserId,
    pub id: RecipeId,
    pub draft: RecipeDraft,
}

/// Domain use-case port for creating, replacing and deleting recipes.
///
/// Create and update check referenced categories before touching storage.
/// Missing and foreign recipes surface as the same not-found error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCommand: Send + Sync {
    /// Create a recipe and return its new id.
    async fn create(&self, request: CreateRecipeRequest) -> Result<RecipeId, Error>;

    /// Replace every field and child of an owned recipe; returns the
    /// unchanged id.
    async fn update(&self, request: UpdateRecipeRequest) -> Result<RecipeId, Error>;

    /// Delete an owned recipe.
    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<(), Error>;
}
