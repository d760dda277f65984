//! Recipe HTTP handlers.
//!
//! ```text
//! GET    /api/v1/recipes?page=0&size=20&sort=title&direction=asc
//! GET    /api/v1/recipes/{id}
//! POST   /api/v1/recipes
//! PUT    /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! ```
//!
//! Every handler resolves the caller from the session first; the owner is
//! never read from the request.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::warn;

use crate::domain::ports::{CreateRecipeRequest, UpdateRecipeRequest};
use crate::domain::{
    Error, RECIPE_NOT_FOUND, RecipeDraft, RecipeFilter, RecipeId, RecipeListParams,
    RecipeSubmission, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::recipes_dto::{
    RecipeDetailResponse, RecipeIdResponse, RecipeListQuery, RecipeListResponse, RecipeRequest,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Non-positive ids can never exist, so they read as not found.
fn parse_recipe_id(raw: i64) -> Result<RecipeId, Error> {
    RecipeId::new(raw).map_err(|_| Error::not_found(RECIPE_NOT_FOUND))
}

fn parse_draft(owner: &UserId, body: RecipeRequest) -> Result<RecipeDraft, Error> {
    RecipeDraft::try_from_submission(&RecipeSubmission::from(body)).map_err(|errors| {
        warn!(user_id = %owner, violations = errors.len(), "recipe body rejected");
        Error::from(errors)
    })
}

/// List the caller's recipes with filters, sorting and pagination.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    params(RecipeListQuery),
    responses(
        (
            status = 200,
            description = "One page of the caller's recipes",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = RecipeListResponse
        ),
        (status = 400, description = "Invalid listing parameters", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RecipeListQuery>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let params = RecipeListParams::from(query.into_inner());
    let filter = RecipeFilter::build(user_id, &params).map_err(|errors| {
        warn!(violations = errors.len(), "recipe listing parameters rejected");
        Error::from(errors)
    })?;
    let page = state.recipes_query.list(&filter).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(RecipeListResponse::from(page)))
}

/// Fetch one of the caller's recipes with ordered ingredients and steps.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe detail", body = RecipeDetailResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id = parse_recipe_id(path.into_inner())?;
    let detail = state.recipes_query.get(&user_id, id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(RecipeDetailResponse::from(detail)))
}

/// Create a recipe owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeRequest,
    responses(
        (
            status = 201,
            description = "Recipe created",
            headers(("Location" = String, description = "URL of the new recipe")),
            body = RecipeIdResponse
        ),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown category", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = parse_draft(&owner, payload.into_inner())?;
    let id = state
        .recipes
        .create(CreateRecipeRequest { owner, draft })
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/v1/recipes/{id}")))
        .json(RecipeIdResponse::from(id)))
}

/// Replace the full content of one of the caller's recipes.
#[utoipa::path(
    put,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe replaced", body = RecipeIdResponse),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Recipe or category not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[put("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeIdResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_recipe_id(path.into_inner())?;
    let draft = parse_draft(&owner, payload.into_inner())?;
    let id = state
        .recipes
        .update(UpdateRecipeRequest { owner, id, draft })
        .await?;
    Ok(web::Json(RecipeIdResponse::from(id)))
}

/// Delete one of the caller's recipes with its ingredients and steps.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_recipe_id(path.into_inner())?;
    state.recipes.delete(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
