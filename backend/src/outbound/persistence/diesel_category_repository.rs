//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{Category, CategoryId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::collect_rows;
use super::models::CategoryRow;
use super::pool::{DbPool, PoolError};
use super::schema::categories;

/// Diesel-backed implementation of the `CategoryRepository` port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CategoryRepositoryError {
    map_basic_pool_error(error, CategoryRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CategoryRepositoryError {
    map_basic_diesel_error(
        error,
        CategoryRepositoryError::query,
        CategoryRepositoryError::connection,
    )
}

fn row_to_category(row: CategoryRow) -> Result<Category, String> {
    let id = CategoryId::new(row.id).map_err(|e| e.to_string())?;
    Ok(Category::new(id, row.name, row.is_default))
}

fn rows_to_categories(rows: Vec<CategoryRow>) -> Result<Vec<Category>, CategoryRepositoryError> {
    collect_rows(
        rows.into_iter().map(row_to_category),
        CategoryRepositoryError::query,
    )
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn find_by_ids(
        &self,
        ids: &[CategoryId],
    ) -> Result<Vec<Category>, CategoryRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .filter(categories::id.eq_any(&ids))
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_categories(rows)
    }

    async fn list_by_name(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .order_by((categories::name.asc(), categories::id.asc()))
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_categories(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rows_convert_into_categories() {
        let rows = vec![CategoryRow {
            id: 3,
            name: "Dinner".to_owned(),
            is_default: true,
        }];
        let categories = rows_to_categories(rows).expect("valid rows");
        let names: Vec<&str> = categories.iter().map(Category::name).collect();
        assert_eq!(names, ["Dinner"]);
    }

    #[rstest]
    fn non_positive_ids_are_query_errors() {
        let rows = vec![CategoryRow {
            id: 0,
            name: "Broken".to_owned(),
            is_default: false,
        }];
        let error = rows_to_categories(rows).expect_err("id must be rejected");
        assert!(matches!(error, CategoryRepositoryError::Query { .. }));
    }
}
