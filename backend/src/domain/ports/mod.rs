//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`RecipeCommand`, `RecipeQuery`, `CategoryQuery`,
//! `LoginService`) are called by inbound adapters. Driven ports
//! (`RecipeRepository`, `CategoryRepository`) are implemented by storage
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod category_query;
mod category_repository;
mod login_service;
mod recipe_command;
mod recipe_query;
mod recipe_repository;

#[cfg(test)]
pub use category_query::MockCategoryQuery;
pub use category_query::CategoryQuery;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{
    CategoryRepository, CategoryRepositoryError, DEFAULT_CATEGORY_NAMES, default_categories,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use recipe_command::MockRecipeCommand;
pub use recipe_command::{CreateRecipeRequest, RecipeCommand, UpdateRecipeRequest};
#[cfg(test)]
pub use recipe_query::MockRecipeQuery;
pub use recipe_query::RecipeQuery;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
