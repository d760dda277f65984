//! Driving port for the category catalogue.

use async_trait::async_trait;

use crate::domain::{CategoryView, Error};

/// Domain use-case port listing every category.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryQuery: Send + Sync {
    /// All categories sorted by name.
    async fn list_categories(&self) -> Result<Vec<CategoryView>, Error>;
}
