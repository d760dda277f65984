//! Recipe and category DTOs for the HTTP adapter.
//!
//! Request DTOs keep every field optional so that missing values reach the
//! domain validator and come back as field-keyed messages rather than a
//! generic deserialisation failure.

use pagination::{Page, PageMeta};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    CategoryView, IngredientSubmission, IngredientView, RecipeDetail, RecipeId, RecipeListParams,
    RecipeSubmission, RecipeSummary, StepSubmission, StepView,
};

/// One ingredient line in a recipe request.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRequest {
    #[schema(example = "2", max_length = 20)]
    pub quantity: Option<String>,
    #[schema(example = "cups", max_length = 20)]
    pub unit: Option<String>,
    #[schema(example = "flour", max_length = 50)]
    pub name: Option<String>,
}

/// One step in a recipe request.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepRequest {
    #[schema(example = "Whisk the eggs", max_length = 500)]
    pub instruction: Option<String>,
}

/// Body of `POST /api/v1/recipes` and `PUT /api/v1/recipes/{id}`.
///
/// Array order defines ingredient positions and step numbers.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[schema(example = "Pancakes", max_length = 100)]
    pub title: Option<String>,
    #[schema(example = "EASY")]
    pub difficulty: Option<String>,
    #[schema(example = 20, minimum = 1)]
    pub cooking_time_minutes: Option<i64>,
    #[schema(example = json!([1, 5]))]
    pub category_ids: Option<Vec<i64>>,
    #[schema(min_items = 1)]
    pub ingredients: Option<Vec<IngredientRequest>>,
    #[schema(min_items = 2)]
    pub steps: Option<Vec<StepRequest>>,
}

impl From<IngredientRequest> for IngredientSubmission {
    fn from(value: IngredientRequest) -> Self {
        Self {
            quantity: value.quantity,
            unit: value.unit,
            name: value.name,
        }
    }
}

impl From<StepRequest> for StepSubmission {
    fn from(value: StepRequest) -> Self {
        Self {
            instruction: value.instruction,
        }
    }
}

impl From<RecipeRequest> for RecipeSubmission {
    fn from(value: RecipeRequest) -> Self {
        Self {
            title: value.title,
            difficulty: value.difficulty,
            cooking_time_minutes: value.cooking_time_minutes,
            category_ids: value.category_ids,
            ingredients: value
                .ingredients
                .map(|items| items.into_iter().map(Into::into).collect()),
            steps: value
                .steps
                .map(|items| items.into_iter().map(Into::into).collect()),
        }
    }
}

/// Query string of `GET /api/v1/recipes`.
///
/// Values stay raw strings; the domain filter reports each malformed one.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RecipeListQuery {
    /// Zero-based page number (default 0).
    #[param(example = "0")]
    pub page: Option<String>,
    /// Page size between 1 and 100 (default 20).
    #[param(example = "20")]
    pub size: Option<String>,
    /// `title`, `cookingTimeMinutes`, `createdAt` or `updatedAt`.
    #[param(example = "title")]
    pub sort: Option<String>,
    /// `asc` or `desc`, case-insensitive.
    #[param(example = "asc")]
    pub direction: Option<String>,
    /// Comma-separated category ids; a recipe matches if it has any.
    #[param(example = "1,5")]
    pub category_ids: Option<String>,
    /// `EASY`, `MEDIUM` or `HARD`, case-insensitive.
    pub difficulty: Option<String>,
    /// Case-insensitive title substring.
    pub search: Option<String>,
}

impl From<RecipeListQuery> for RecipeListParams {
    fn from(value: RecipeListQuery) -> Self {
        Self {
            page: value.page,
            size: value.size,
            sort: value.sort,
            direction: value.direction,
            category_ids: value.category_ids,
            difficulty: value.difficulty,
            search: value.search,
        }
    }
}

/// Category as shown on recipes and in the catalogue.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    #[schema(example = 5)]
    pub id: i64,
    #[schema(example = "Lunch")]
    pub name: String,
    pub is_default: bool,
}

impl From<CategoryView> for CategoryResponse {
    fn from(value: CategoryView) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            is_default: value.is_default,
        }
    }
}

/// Ingredient line with its 1-based position.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientResponse {
    pub sort_order: u32,
    pub quantity: String,
    pub unit: String,
    pub name: String,
}

impl From<IngredientView> for IngredientResponse {
    fn from(value: IngredientView) -> Self {
        Self {
            sort_order: value.position,
            quantity: value.quantity,
            unit: value.unit,
            name: value.name,
        }
    }
}

/// Step with its 1-based number.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepResponse {
    pub step_number: u32,
    pub instruction: String,
}

impl From<StepView> for StepResponse {
    fn from(value: StepView) -> Self {
        Self {
            step_number: value.number,
            instruction: value.instruction,
        }
    }
}

/// Full recipe with ordered ingredients and steps.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetailResponse {
    pub id: i64,
    pub title: String,
    #[schema(example = "MEDIUM")]
    pub difficulty: String,
    pub cooking_time_minutes: u32,
    pub categories: Vec<CategoryResponse>,
    pub ingredients: Vec<IngredientResponse>,
    pub steps: Vec<StepResponse>,
    #[schema(example = "2026-03-01T09:00:00+00:00")]
    pub created_at: String,
    pub updated_at: String,
}

impl From<RecipeDetail> for RecipeDetailResponse {
    fn from(value: RecipeDetail) -> Self {
        Self {
            id: value.id.get(),
            title: value.title,
            difficulty: value.difficulty.as_str().to_owned(),
            cooking_time_minutes: value.cooking_time_minutes,
            categories: value.categories.into_iter().map(Into::into).collect(),
            ingredients: value.ingredients.into_iter().map(Into::into).collect(),
            steps: value.steps.into_iter().map(Into::into).collect(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Recipe as listed on a page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummaryResponse {
    pub id: i64,
    pub title: String,
    pub difficulty: String,
    pub cooking_time_minutes: u32,
    pub categories: Vec<CategoryResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<RecipeSummary> for RecipeSummaryResponse {
    fn from(value: RecipeSummary) -> Self {
        Self {
            id: value.id.get(),
            title: value.title,
            difficulty: value.difficulty.as_str().to_owned(),
            cooking_time_minutes: value.cooking_time_minutes,
            categories: value.categories.into_iter().map(Into::into).collect(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Page metadata returned next to listed recipes.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_recipes: u64,
    pub page_size: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<PageMeta> for PaginationResponse {
    fn from(value: PageMeta) -> Self {
        Self {
            current_page: value.current_page,
            total_pages: value.total_pages,
            total_recipes: value.total_items,
            page_size: value.page_size,
            has_next: value.has_next,
            has_previous: value.has_previous,
        }
    }
}

/// Response of `GET /api/v1/recipes`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeListResponse {
    pub recipes: Vec<RecipeSummaryResponse>,
    pub pagination: PaginationResponse,
}

impl From<Page<RecipeSummary>> for RecipeListResponse {
    fn from(value: Page<RecipeSummary>) -> Self {
        let (items, meta) = value.into_parts();
        Self {
            recipes: items.into_iter().map(Into::into).collect(),
            pagination: meta.into(),
        }
    }
}

/// Id of a created or replaced recipe.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeIdResponse {
    #[schema(example = 42)]
    pub id: i64,
}

impl From<RecipeId> for RecipeIdResponse {
    fn from(value: RecipeId) -> Self {
        Self { id: value.get() }
    }
}
