//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.
//!
//! Every port method runs inside one transaction. Listing translates the
//! domain query plan into one boxed boolean expression (ownership ANDed with
//! each clause) that is reused for the count and the page window, so the
//! total always describes the rows being paged. Replacement and deletion
//! issue explicit deletes for ingredient, step and association rows.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use pagination::Page;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    Category, CategoryId, Difficulty, Ingredient, NewRecipe, Recipe, RecipeClause, RecipeContent,
    RecipeId, RecipeParts, RecipePredicate, RecipeQueryPlan, RecipeReplacement, SortDirection,
    SortField, Step, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::{collect_rows, column_to_u32, contains_pattern, u32_to_column};
use super::models::{
    CategoryRow, IngredientRow, NewIngredientRow, NewRecipeCategoryRow, NewRecipeRow, NewStepRow,
    RecipeCategoryRow, RecipeRow, RecipeUpdate, StepRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{categories, ingredients, recipe_categories, recipes, steps};

/// Diesel-backed implementation of the `RecipeRepository` port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failures raised inside a transaction closure.
#[derive(Debug, thiserror::Error)]
enum TxError {
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),
    #[error("category {0} does not exist")]
    MissingCategory(CategoryId),
    #[error("{0}")]
    Conversion(String),
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    map_basic_pool_error(error, RecipeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    map_basic_diesel_error(
        error,
        RecipeRepositoryError::query,
        RecipeRepositoryError::connection,
    )
}

fn map_tx_error(error: TxError) -> RecipeRepositoryError {
    match error {
        TxError::Diesel(error) => map_diesel_error(error),
        TxError::MissingCategory(id) => RecipeRepositoryError::missing_category(id),
        TxError::Conversion(message) => RecipeRepositoryError::query(message),
    }
}

// ---------------------------------------------------------------------------
// Query plan translation
// ---------------------------------------------------------------------------

type RecipeCondition = Box<dyn BoxableExpression<recipes::table, Pg, SqlType = Bool>>;

fn clause_condition(clause: &RecipeClause) -> RecipeCondition {
    match clause {
        RecipeClause::InAnyCategory(ids) => {
            let ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();
            Box::new(
                recipes::id.eq_any(
                    recipe_categories::table
                        .filter(recipe_categories::category_id.eq_any(ids))
                        .select(recipe_categories::recipe_id),
                ),
            )
        }
        RecipeClause::DifficultyIs(difficulty) => {
            Box::new(recipes::difficulty.eq(difficulty.as_str()))
        }
        RecipeClause::TitleContains(term) => Box::new(recipes::title.ilike(contains_pattern(term))),
    }
}

/// Ownership first, then every clause, folded by AND.
fn predicate_condition(predicate: &RecipePredicate) -> RecipeCondition {
    let owner: RecipeCondition = Box::new(recipes::user_id.eq(*predicate.owner().as_uuid()));
    predicate
        .clauses()
        .iter()
        .fold(owner, |acc, clause| Box::new(acc.and(clause_condition(clause))))
}

/// Matching rows in plan order; the id tie-break keeps pages stable.
fn ordered(plan: &RecipeQueryPlan) -> recipes::BoxedQuery<'static, Pg> {
    let query = recipes::table
        .filter(predicate_condition(plan.predicate()))
        .into_boxed();
    let sort = plan.sort();
    let query = match (sort.field, sort.direction) {
        (SortField::Title, SortDirection::Asc) => query.order_by(recipes::title.asc()),
        (SortField::Title, SortDirection::Desc) => query.order_by(recipes::title.desc()),
        (SortField::CookingTime, SortDirection::Asc) => {
            query.order_by(recipes::cooking_time_minutes.asc())
        }
        (SortField::CookingTime, SortDirection::Desc) => {
            query.order_by(recipes::cooking_time_minutes.desc())
        }
        (SortField::CreatedAt, SortDirection::Asc) => query.order_by(recipes::created_at.asc()),
        (SortField::CreatedAt, SortDirection::Desc) => query.order_by(recipes::created_at.desc()),
        (SortField::UpdatedAt, SortDirection::Asc) => query.order_by(recipes::updated_at.asc()),
        (SortField::UpdatedAt, SortDirection::Desc) => query.order_by(recipes::updated_at.desc()),
    };
    query.then_order_by(recipes::id.asc())
}

// ---------------------------------------------------------------------------
// Row-to-domain converters
// ---------------------------------------------------------------------------

fn row_to_category(row: CategoryRow) -> Result<Category, String> {
    let id = CategoryId::new(row.id).map_err(|e| e.to_string())?;
    Ok(Category::new(id, row.name, row.is_default))
}

fn row_to_ingredient(row: IngredientRow) -> Result<Ingredient, String> {
    Ok(Ingredient::new(
        column_to_u32(row.sort_order, "ingredients.sort_order")?,
        row.quantity,
        row.unit,
        row.name,
    ))
}

fn row_to_step(row: StepRow) -> Result<Step, String> {
    Ok(Step::new(
        column_to_u32(row.step_number, "steps.step_number")?,
        row.instruction,
    ))
}

/// Child rows for a set of recipes, grouped by recipe id.
#[derive(Default)]
struct Children {
    ingredients: HashMap<i64, Vec<IngredientRow>>,
    steps: HashMap<i64, Vec<StepRow>>,
    categories: HashMap<i64, Vec<CategoryRow>>,
}

async fn load_children(conn: &mut AsyncPgConnection, ids: &[i64]) -> QueryResult<Children> {
    let mut children = Children::default();
    if ids.is_empty() {
        return Ok(children);
    }

    let ingredient_rows: Vec<IngredientRow> = ingredients::table
        .filter(ingredients::recipe_id.eq_any(ids))
        .select(IngredientRow::as_select())
        .load(conn)
        .await?;
    for row in ingredient_rows {
        children.ingredients.entry(row.recipe_id).or_default().push(row);
    }

    let step_rows: Vec<StepRow> = steps::table
        .filter(steps::recipe_id.eq_any(ids))
        .select(StepRow::as_select())
        .load(conn)
        .await?;
    for row in step_rows {
        children.steps.entry(row.recipe_id).or_default().push(row);
    }

    let category_rows: Vec<RecipeCategoryRow> = recipe_categories::table
        .inner_join(categories::table)
        .filter(recipe_categories::recipe_id.eq_any(ids))
        .order_by((recipe_categories::recipe_id, recipe_categories::position))
        .select((
            recipe_categories::recipe_id,
            recipe_categories::position,
            CategoryRow::as_select(),
        ))
        .load(conn)
        .await?;
    for (recipe_id, _position, category) in category_rows {
        children.categories.entry(recipe_id).or_default().push(category);
    }

    Ok(children)
}

fn assemble(row: RecipeRow, children: &mut Children) -> Result<Recipe, String> {
    let id = RecipeId::new(row.id).map_err(|e| e.to_string())?;
    let difficulty = Difficulty::from_canonical(&row.difficulty)
        .ok_or_else(|| format!("recipe {id} has unknown difficulty {}", row.difficulty))?;
    let ingredients = children.ingredients.remove(&row.id).unwrap_or_default();
    let steps = children.steps.remove(&row.id).unwrap_or_default();
    let categories = children.categories.remove(&row.id).unwrap_or_default();

    Ok(Recipe::from_parts(RecipeParts {
        id,
        owner: UserId::from_uuid(row.user_id),
        title: row.title,
        difficulty,
        cooking_time_minutes: column_to_u32(
            row.cooking_time_minutes,
            "recipes.cooking_time_minutes",
        )?,
        ingredients: collect_rows(ingredients.into_iter().map(row_to_ingredient), |e| e)?,
        steps: collect_rows(steps.into_iter().map(row_to_step), |e| e)?,
        categories: collect_rows(categories.into_iter().map(row_to_category), |e| e)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn assemble_all(rows: Vec<RecipeRow>, mut children: Children) -> Result<Vec<Recipe>, TxError> {
    collect_rows(
        rows.into_iter().map(|row| assemble(row, &mut children)),
        TxError::Conversion,
    )
}

// ---------------------------------------------------------------------------
// Write helpers
// ---------------------------------------------------------------------------

/// Fail with the first association target, in content order, missing from
/// the catalogue.
async fn ensure_categories(
    conn: &mut AsyncPgConnection,
    content: &RecipeContent,
) -> Result<(), TxError> {
    if content.category_ids().is_empty() {
        return Ok(());
    }
    let requested: Vec<i64> = content.category_ids().iter().map(|id| id.get()).collect();
    let existing: Vec<i64> = categories::table
        .filter(categories::id.eq_any(&requested))
        .select(categories::id)
        .load(conn)
        .await?;
    match content
        .category_ids()
        .iter()
        .find(|id| !existing.contains(&id.get()))
    {
        Some(missing) => Err(TxError::MissingCategory(*missing)),
        None => Ok(()),
    }
}

/// Association inserts can only trip the `category_id` foreign key, since the
/// recipe row was written in the same transaction. A category removed after
/// `ensure_categories` therefore surfaces as a missing reference.
fn map_association_error(error: diesel::result::Error, content: &RecipeContent) -> TxError {
    match violated_category(&error, content) {
        Some(id) => TxError::MissingCategory(id),
        None => TxError::Diesel(error),
    }
}

fn violated_category(
    error: &diesel::result::Error,
    content: &RecipeContent,
) -> Option<CategoryId> {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) = error else {
        return None;
    };
    let mut requested = content.category_ids().iter().copied();
    match info.details().and_then(violating_key) {
        Some(raw) => requested.find(|id| id.get() == raw),
        None => requested.next(),
    }
}

/// Offending key from a PostgreSQL detail such as
/// `Key (category_id)=(42) is not present in table "categories".`
fn violating_key(details: &str) -> Option<i64> {
    let (_, rest) = details.split_once(")=(")?;
    let (value, _) = rest.split_once(')')?;
    value.parse().ok()
}

async fn insert_children(
    conn: &mut AsyncPgConnection,
    recipe_id: i64,
    content: &RecipeContent,
) -> Result<(), TxError> {
    let ingredient_rows = content
        .ingredients()
        .iter()
        .map(|ingredient| {
            Ok(NewIngredientRow {
                recipe_id,
                quantity: ingredient.quantity(),
                unit: ingredient.unit(),
                name: ingredient.name(),
                sort_order: u32_to_column(ingredient.position(), "ingredients.sort_order")?,
            })
        })
        .collect::<Result<Vec<_>, String>>()
        .map_err(TxError::Conversion)?;
    diesel::insert_into(ingredients::table)
        .values(&ingredient_rows)
        .execute(conn)
        .await?;

    let step_rows = content
        .steps()
        .iter()
        .map(|step| {
            Ok(NewStepRow {
                recipe_id,
                step_number: u32_to_column(step.number(), "steps.step_number")?,
                instruction: step.instruction(),
            })
        })
        .collect::<Result<Vec<_>, String>>()
        .map_err(TxError::Conversion)?;
    diesel::insert_into(steps::table)
        .values(&step_rows)
        .execute(conn)
        .await?;

    let association_rows = content
        .category_ids()
        .iter()
        .zip(1_i32..)
        .map(|(category_id, position)| NewRecipeCategoryRow {
            recipe_id,
            category_id: category_id.get(),
            position,
        })
        .collect::<Vec<_>>();
    if !association_rows.is_empty() {
        diesel::insert_into(recipe_categories::table)
            .values(&association_rows)
            .execute(conn)
            .await
            .map_err(|error| map_association_error(error, content))?;
    }
    Ok(())
}

async fn delete_children(conn: &mut AsyncPgConnection, recipe_id: i64) -> QueryResult<()> {
    diesel::delete(ingredients::table.filter(ingredients::recipe_id.eq(recipe_id)))
        .execute(conn)
        .await?;
    diesel::delete(steps::table.filter(steps::recipe_id.eq(recipe_id)))
        .execute(conn)
        .await?;
    diesel::delete(recipe_categories::table.filter(recipe_categories::recipe_id.eq(recipe_id)))
        .execute(conn)
        .await?;
    Ok(())
}

type OwnedRecipe = diesel::dsl::Filter<
    diesel::dsl::Filter<recipes::table, diesel::dsl::Eq<recipes::id, i64>>,
    diesel::dsl::Eq<recipes::user_id, Uuid>,
>;

fn owned_recipe(owner: Uuid, id: i64) -> OwnedRecipe {
    recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::user_id.eq(owner))
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn find_page(&self, plan: &RecipeQueryPlan) -> Result<Page<Recipe>, RecipeRepositoryError> {
        let window = plan.page().window();
        let offset = i64::try_from(window.offset())
            .map_err(|_| RecipeRepositoryError::query("page offset exceeds i64 range"))?;
        let limit = i64::from(window.limit());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (total, recipes) = conn
            .build_transaction()
            .read_only()
            .run(|conn| {
                async move {
                    let total: i64 = recipes::table
                        .filter(predicate_condition(plan.predicate()))
                        .select(count_star())
                        .get_result(conn)
                        .await?;
                    let rows: Vec<RecipeRow> =
                        ordered(plan).offset(offset).limit(limit).load(conn).await?;
                    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
                    let children = load_children(conn, &ids).await?;
                    Ok::<_, TxError>((total, assemble_all(rows, children)?))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_tx_error)?;

        let total = u64::try_from(total)
            .map_err(|_| RecipeRepositoryError::query("negative recipe count"))?;
        debug!(total, returned = recipes.len(), "recipe page loaded");
        Ok(Page::new(recipes, plan.page(), total))
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let owner = *owner.as_uuid();
        let recipe_id = id.get();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.build_transaction()
            .read_only()
            .run(|conn| {
                async move {
                    let row: Option<RecipeRow> = owned_recipe(owner, recipe_id)
                        .select(RecipeRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(row) = row else {
                        return Ok::<_, TxError>(None);
                    };
                    let children = load_children(conn, &[recipe_id]).await?;
                    Ok::<_, TxError>(assemble_all(vec![row], children)?.pop())
                }
                .scope_boxed()
            })
            .await
            .map_err(map_tx_error)
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<RecipeId, RecipeRepositoryError> {
        let content = &recipe.content;
        let header = NewRecipeRow {
            user_id: *recipe.owner.as_uuid(),
            title: content.title(),
            difficulty: content.difficulty().as_str(),
            cooking_time_minutes: u32_to_column(
                content.cooking_time_minutes(),
                "recipes.cooking_time_minutes",
            )
            .map_err(RecipeRepositoryError::query)?,
            created_at: recipe.created_at,
            updated_at: recipe.created_at,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: i64 = conn
            .transaction(|conn| {
                async move {
                    ensure_categories(conn, content).await?;
                    let id: i64 = diesel::insert_into(recipes::table)
                        .values(&header)
                        .returning(recipes::id)
                        .get_result(conn)
                        .await?;
                    insert_children(conn, id, content).await?;
                    Ok::<_, TxError>(id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_tx_error)?;

        RecipeId::new(id).map_err(|e| RecipeRepositoryError::query(e.to_string()))
    }

    async fn replace(&self, replacement: &RecipeReplacement) -> Result<bool, RecipeRepositoryError> {
        let content = &replacement.content;
        let owner = *replacement.owner.as_uuid();
        let recipe_id = replacement.id.get();
        let changes = RecipeUpdate {
            title: content.title(),
            difficulty: content.difficulty().as_str(),
            cooking_time_minutes: u32_to_column(
                content.cooking_time_minutes(),
                "recipes.cooking_time_minutes",
            )
            .map_err(RecipeRepositoryError::query)?,
            updated_at: replacement.updated_at,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                ensure_categories(conn, content).await?;
                let updated = diesel::update(owned_recipe(owner, recipe_id))
                    .set(&changes)
                    .execute(conn)
                    .await?;
                if updated == 0 {
                    return Ok(false);
                }
                delete_children(conn, recipe_id).await?;
                insert_children(conn, recipe_id, content).await?;
                Ok::<_, TxError>(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let owner = *owner.as_uuid();
        let recipe_id = id.get();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let owned: Option<i64> = owned_recipe(owner, recipe_id)
                    .select(recipes::id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                if owned.is_none() {
                    return Ok(false);
                }
                delete_children(conn, recipe_id).await?;
                diesel::delete(owned_recipe(owner, recipe_id))
                    .execute(conn)
                    .await?;
                Ok::<_, TxError>(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }
}
