//! Category catalogue service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::recipe_service::map_category_error;
use crate::domain::ports::{CategoryQuery, CategoryRepository};
use crate::domain::{CategoryView, Error};

/// Catalogue service implementing [`CategoryQuery`].
#[derive(Clone)]
pub struct CategoryQueryService<C> {
    categories: Arc<C>,
}

impl<C> CategoryQueryService<C> {
    pub fn new(categories: Arc<C>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl<C> CategoryQuery for CategoryQueryService<C>
where
    C: CategoryRepository,
{
    async fn list_categories(&self) -> Result<Vec<CategoryView>, Error> {
        let categories = self
            .categories
            .list_by_name()
            .await
            .map_err(map_category_error)?;
        Ok(categories.iter().map(CategoryView::from).collect())
    }
}
