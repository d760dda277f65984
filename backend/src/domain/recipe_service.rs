//! Recipe domain services.
//!
//! [`RecipeCommandService`] is the mutation pipeline. It builds the ordered
//! content through the shared construction routine, which rejects drafts
//! that would break the stored-recipe invariants, then checks ownership and
//! referenced categories before handing one atomic unit of work to the
//! repository. [`RecipeQueryService`] composes listing plans and projects
//! stored aggregates.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, CreateRecipeRequest, RecipeCommand, RecipeQuery,
    RecipeRepository, RecipeRepositoryError, UpdateRecipeRequest,
};
use crate::domain::{
    CategoryId, Error, NewRecipe, RecipeContent, RecipeDetail, RecipeFilter, RecipeId,
    RecipeQueryPlan, RecipeReplacement, RecipeSummary, UserId,
};

/// Message shared by missing and foreign recipes.
pub const RECIPE_NOT_FOUND: &str = "Recipe not found";
/// Message for a request naming an unknown category.
pub const INVALID_CATEGORY: &str = "Invalid category ID";

pub(crate) fn recipe_not_found() -> Error {
    Error::not_found(RECIPE_NOT_FOUND)
}

pub(crate) fn missing_category(id: CategoryId) -> Error {
    Error::not_found(INVALID_CATEGORY).with_details(json!({
        "categoryIds": format!("Category with ID {id} does not exist"),
    }))
}

pub(crate) fn map_recipe_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
        RecipeRepositoryError::MissingCategory { category_id } => missing_category(category_id),
    }
}

pub(crate) fn map_category_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("category repository unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category repository error: {message}"))
        }
    }
}

/// Recipe mutation service implementing [`RecipeCommand`].
#[derive(Clone)]
pub struct RecipeCommandService<R, C> {
    recipes: Arc<R>,
    categories: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<R, C> RecipeCommandService<R, C> {
    /// Create a service over the given repositories and clock.
    pub fn new(recipes: Arc<R>, categories: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            recipes,
            categories,
            clock,
        }
    }
}

impl<R, C> RecipeCommandService<R, C>
where
    R: RecipeRepository,
    C: CategoryRepository,
{
    /// Fail with the first requested id, in request order, that the
    /// catalogue does not know.
    async fn ensure_categories_exist(&self, ids: &[CategoryId]) -> Result<(), Error> {
        let found = self
            .categories
            .find_by_ids(ids)
            .await
            .map_err(map_category_error)?;
        match ids
            .iter()
            .find(|id| !found.iter().any(|category| category.id() == **id))
        {
            Some(missing) => Err(missing_category(*missing)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R, C> RecipeCommand for RecipeCommandService<R, C>
where
    R: RecipeRepository,
    C: CategoryRepository,
{
    async fn create(&self, request: CreateRecipeRequest) -> Result<RecipeId, Error> {
        let CreateRecipeRequest { owner, draft } = request;
        let content = RecipeContent::try_from_draft(draft)?;
        self.ensure_categories_exist(content.category_ids()).await?;

        let recipe = NewRecipe {
            owner,
            content,
            created_at: self.clock.utc(),
        };
        let id = self
            .recipes
            .create(&recipe)
            .await
            .map_err(map_recipe_error)?;
        info!(user_id = %recipe.owner, recipe_id = %id, "recipe created");
        Ok(id)
    }

    async fn update(&self, request: UpdateRecipeRequest) -> Result<RecipeId, Error> {
        let UpdateRecipeRequest { owner, id, draft } = request;
        let content = RecipeContent::try_from_draft(draft)?;
        let existing = self
            .recipes
            .find_owned(&owner, id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(recipe_not_found)?;
        self.ensure_categories_exist(content.category_ids()).await?;

        let replacement = RecipeReplacement {
            id,
            owner,
            content,
            updated_at: self.clock.utc().max(existing.created_at()),
        };
        let replaced = self
            .recipes
            .replace(&replacement)
            .await
            .map_err(map_recipe_error)?;
        if !replaced {
            return Err(recipe_not_found());
        }
        info!(
            user_id = %replacement.owner,
            recipe_id = %id,
            ingredients = replacement.content.ingredients().len(),
            steps = replacement.content.steps().len(),
            "recipe replaced"
        );
        Ok(id)
    }

    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<(), Error> {
        let deleted = self
            .recipes
            .delete(owner, id)
            .await
            .map_err(map_recipe_error)?;
        if !deleted {
            return Err(recipe_not_found());
        }
        info!(user_id = %owner, recipe_id = %id, "recipe deleted");
        Ok(())
    }
}

/// Recipe read service implementing [`RecipeQuery`].
#[derive(Clone)]
pub struct RecipeQueryService<R> {
    recipes: Arc<R>,
}

impl<R> RecipeQueryService<R> {
    pub fn new(recipes: Arc<R>) -> Self {
        Self { recipes }
    }
}

#[async_trait]
impl<R> RecipeQuery for RecipeQueryService<R>
where
    R: RecipeRepository,
{
    async fn list(&self, filter: &RecipeFilter) -> Result<Page<RecipeSummary>, Error> {
        let plan = RecipeQueryPlan::from_filter(filter);
        let page = self
            .recipes
            .find_page(&plan)
            .await
            .map_err(map_recipe_error)?;
        debug!(
            user_id = %filter.owner(),
            clauses = plan.predicate().clauses().len(),
            total = page.meta().total_items,
            "recipes listed"
        );
        Ok(page.map(|recipe| RecipeSummary::from(&recipe)))
    }

    async fn get(&self, owner: &UserId, id: RecipeId) -> Result<RecipeDetail, Error> {
        self.recipes
            .find_owned(owner, id)
            .await
            .map_err(map_recipe_error)?
            .map(|recipe| RecipeDetail::from(&recipe))
            .ok_or_else(recipe_not_found)
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
