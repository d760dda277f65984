//! Process-local recipe store used when no database is configured.
//!
//! `InMemoryRecipeStore` implements both repository ports over one mutex so
//! each port call is atomic, mirroring the transactional guarantees of the
//! Diesel adapters. Contents vanish with the process.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::Page;

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, RecipeRepository, RecipeRepositoryError,
    default_categories,
};
use crate::domain::{
    Category, CategoryId, NewRecipe, Recipe, RecipeContent, RecipeId, RecipeParts,
    RecipeQueryPlan, RecipeReplacement, UserId,
};

#[derive(Debug)]
struct StoreState {
    next_id: i64,
    recipes: BTreeMap<i64, Recipe>,
    categories: Vec<Category>,
}

impl StoreState {
    /// Resolve association targets in content order, failing on the first
    /// unknown id.
    fn resolve_categories(&self, content: &RecipeContent) -> Result<Vec<Category>, CategoryId> {
        content
            .category_ids()
            .iter()
            .map(|id| {
                self.categories
                    .iter()
                    .find(|category| category.id() == *id)
                    .cloned()
                    .ok_or(*id)
            })
            .collect()
    }
}

/// In-memory implementation of the recipe and category repository ports.
#[derive(Debug)]
pub struct InMemoryRecipeStore {
    state: Mutex<StoreState>,
}

impl Default for InMemoryRecipeStore {
    fn default() -> Self {
        Self::with_categories(default_categories())
    }
}

impl InMemoryRecipeStore {
    /// Create an empty store seeded with the default category catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with a custom category catalogue.
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            state: Mutex::new(StoreState {
                next_id: 1,
                recipes: BTreeMap::new(),
                categories,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

fn build_recipe(
    id: RecipeId,
    owner: &UserId,
    content: &RecipeContent,
    categories: Vec<Category>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
) -> Recipe {
    Recipe::from_parts(RecipeParts {
        id,
        owner: owner.clone(),
        title: content.title().to_owned(),
        difficulty: content.difficulty(),
        cooking_time_minutes: content.cooking_time_minutes(),
        ingredients: content.ingredients().to_vec(),
        steps: content.steps().to_vec(),
        categories,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeStore {
    async fn find_page(&self, plan: &RecipeQueryPlan) -> Result<Page<Recipe>, RecipeRepositoryError> {
        let state = self.lock().map_err(RecipeRepositoryError::query)?;
        let mut matches: Vec<&Recipe> = state
            .recipes
            .values()
            .filter(|recipe| plan.predicate().matches(recipe))
            .collect();
        matches.sort_by(|left, right| plan.compare(left, right));

        let total = u64::try_from(matches.len())
            .map_err(|_| RecipeRepositoryError::query("recipe count exceeds u64 range"))?;
        let items = plan
            .page()
            .window()
            .slice(&matches)
            .iter()
            .map(|recipe| (*recipe).clone())
            .collect();
        Ok(Page::new(items, plan.page(), total))
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let state = self.lock().map_err(RecipeRepositoryError::query)?;
        Ok(state
            .recipes
            .get(&id.get())
            .filter(|recipe| recipe.owner() == owner)
            .cloned())
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<RecipeId, RecipeRepositoryError> {
        let mut state = self.lock().map_err(RecipeRepositoryError::query)?;
        let categories = state
            .resolve_categories(&recipe.content)
            .map_err(RecipeRepositoryError::missing_category)?;
        let id = RecipeId::new(state.next_id)
            .map_err(|err| RecipeRepositoryError::query(err.to_string()))?;
        state.next_id += 1;
        let stored = build_recipe(
            id,
            &recipe.owner,
            &recipe.content,
            categories,
            recipe.created_at,
            recipe.created_at,
        );
        state.recipes.insert(id.get(), stored);
        Ok(id)
    }

    async fn replace(&self, replacement: &RecipeReplacement) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.lock().map_err(RecipeRepositoryError::query)?;
        let categories = state
            .resolve_categories(&replacement.content)
            .map_err(RecipeRepositoryError::missing_category)?;
        let Some(existing) = state
            .recipes
            .get_mut(&replacement.id.get())
            .filter(|recipe| *recipe.owner() == replacement.owner)
        else {
            return Ok(false);
        };
        *existing = build_recipe(
            replacement.id,
            &replacement.owner,
            &replacement.content,
            categories,
            existing.created_at(),
            replacement.updated_at,
        );
        Ok(true)
    }

    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.lock().map_err(RecipeRepositoryError::query)?;
        let owned = state
            .recipes
            .get(&id.get())
            .is_some_and(|recipe| recipe.owner() == owner);
        if owned {
            state.recipes.remove(&id.get());
        }
        Ok(owned)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRecipeStore {
    async fn find_by_ids(
        &self,
        ids: &[CategoryId],
    ) -> Result<Vec<Category>, CategoryRepositoryError> {
        let state = self.lock().map_err(CategoryRepositoryError::query)?;
        Ok(state
            .categories
            .iter()
            .filter(|category| ids.contains(&category.id()))
            .cloned()
            .collect())
    }

    async fn list_by_name(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let state = self.lock().map_err(CategoryRepositoryError::query)?;
        let mut categories = state.categories.clone();
        categories.sort_by(|left, right| {
            left.name()
                .cmp(right.name())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(categories)
    }
}
