//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CategoryQuery, LoginService, RecipeCommand, RecipeQuery};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub recipes: Arc<dyn RecipeCommand>,
    pub recipes_query: Arc<dyn RecipeQuery>,
    pub categories: Arc<dyn CategoryQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub recipes: Arc<dyn RecipeCommand>,
    pub recipes_query: Arc<dyn RecipeQuery>,
    pub categories: Arc<dyn CategoryQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use recipe_notebook::domain::ports::FixtureLoginService;
    /// use recipe_notebook::domain::{
    ///     CategoryQueryService, RecipeCommandService, RecipeQueryService,
    /// };
    /// use recipe_notebook::inbound::http::state::{HttpState, HttpStatePorts};
    /// use recipe_notebook::outbound::memory::InMemoryRecipeStore;
    ///
    /// let store = Arc::new(InMemoryRecipeStore::new());
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService),
    ///     recipes: Arc::new(RecipeCommandService::new(
    ///         store.clone(),
    ///         store.clone(),
    ///         Arc::new(DefaultClock),
    ///     )),
    ///     recipes_query: Arc::new(RecipeQueryService::new(store.clone())),
    ///     categories: Arc::new(CategoryQueryService::new(store)),
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            recipes,
            recipes_query,
            categories,
        } = ports;
        Self {
            login,
            recipes,
            recipes_query,
            categories,
        }
    }
}
