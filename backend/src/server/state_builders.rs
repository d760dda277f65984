//! Builders wiring recipe services to a storage backend.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use recipe_notebook::domain::ports::{CategoryRepository, FixtureLoginService, RecipeRepository};
use recipe_notebook::domain::{CategoryQueryService, RecipeCommandService, RecipeQueryService};
use recipe_notebook::inbound::http::state::{HttpState, HttpStatePorts};
use recipe_notebook::outbound::memory::InMemoryRecipeStore;
use recipe_notebook::outbound::persistence::{DieselCategoryRepository, DieselRecipeRepository};

use super::ServerConfig;

/// Wire services over the given repositories.
fn ports_over<R, C>(recipes: Arc<R>, categories: Arc<C>) -> HttpStatePorts
where
    R: RecipeRepository + 'static,
    C: CategoryRepository + 'static,
{
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        recipes: Arc::new(RecipeCommandService::new(
            recipes.clone(),
            categories.clone(),
            Arc::new(DefaultClock),
        )),
        recipes_query: Arc::new(RecipeQueryService::new(recipes)),
        categories: Arc::new(CategoryQueryService::new(categories)),
    }
}

/// Build HTTP state over PostgreSQL when a pool is configured, otherwise over
/// a process-local store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("serving recipes from PostgreSQL");
            ports_over(
                Arc::new(DieselRecipeRepository::new(pool.clone())),
                Arc::new(DieselCategoryRepository::new(pool.clone())),
            )
        }
        None => {
            info!("no database configured; recipes are kept in memory");
            let store = Arc::new(InMemoryRecipeStore::new());
            ports_over(store.clone(), store)
        }
    };
    web::Data::new(HttpState::new(ports))
}
