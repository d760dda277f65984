//! Domain primitives, aggregates and services.
//!
//! Purpose: model recipes, their owned children and the category catalogue
//! independently of HTTP and SQL. Adapters reach the domain only through the
//! ports in [`ports`].
//!
//! Public surface:
//! - `Recipe`, `RecipeContent`, `RecipeDraft`: the aggregate, its ordered
//!   content and the validated request body.
//! - `RecipeFilter`, `RecipeQueryPlan`: listing validation and composition.
//! - `RecipeDetail`, `RecipeSummary`: read projections.
//! - `RecipeCommandService`, `RecipeQueryService`, `CategoryQueryService`:
//!   driving port implementations.
//! - `Error`, `ErrorCode`, `FieldErrors`: transport-agnostic failures.

pub mod auth;
pub mod category_service;
pub mod error;
pub mod field_errors;
pub mod ports;
pub mod recipe;
pub mod recipe_filter;
pub mod recipe_projection;
pub mod recipe_query_plan;
pub mod recipe_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::category_service::CategoryQueryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::field_errors::{FieldErrors, VALIDATION_FAILED};
pub use self::recipe::{
    Category, CategoryId, Difficulty, Ingredient, IngredientDraft, IngredientSubmission,
    NewRecipe, NonPositiveId, ParseDifficultyError, Recipe, RecipeContent, RecipeDraft, RecipeId,
    RecipeParts, RecipeReplacement, RecipeSubmission, Step, StepSubmission,
};
pub use self::recipe_filter::{
    ParseSortDirectionError, RecipeFilter, RecipeListParams, RecipeSort, SortDirection, SortField,
};
pub use self::recipe_projection::{
    CategoryView, IngredientView, RecipeDetail, RecipeSummary, StepView,
};
pub use self::recipe_query_plan::{RecipeClause, RecipePredicate, RecipeQueryPlan};
pub use self::recipe_service::{
    INVALID_CATEGORY, RECIPE_NOT_FOUND, RecipeCommandService, RecipeQueryService,
};
pub use self::trace_id::TraceId;
pub use self::user::{UserId, UserValidationError};
