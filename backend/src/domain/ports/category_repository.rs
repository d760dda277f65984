//! Port for the read-only category catalogue.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "category repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "category repository query failed: {message}",
    }
}

/// Port for category lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Return the categories among `ids` that exist, in any order.
    async fn find_by_ids(&self, ids: &[CategoryId]) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Return the whole catalogue sorted by name.
    async fn list_by_name(&self) -> Result<Vec<Category>, CategoryRepositoryError>;
}

/// Default catalogue seeded by the initial migration.
pub const DEFAULT_CATEGORY_NAMES: [&str; 6] =
    ["Breakfast", "Dessert", "Dinner", "Drinks", "Lunch", "Snacks"];

/// Build the default catalogue with ids `1..=6` in seed order.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORY_NAMES
        .iter()
        .zip(1_i64..)
        .filter_map(|(name, id)| {
            CategoryId::new(id)
                .ok()
                .map(|id| Category::new(id, *name, true))
        })
        .collect()
}
