//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every recipe, category, login and health endpoint
//! together with the request and response DTOs. The error envelope is
//! described by [`ErrorSchema`] so the domain `Error` stays free of utoipa.
//!
//! Swagger UI serves the document in debug builds; the `openapi-dump` binary
//! prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::recipes_dto::{
    CategoryResponse, IngredientRequest, IngredientResponse, PaginationResponse,
    RecipeDetailResponse, RecipeIdResponse, RecipeListResponse, RecipeRequest,
    RecipeSummaryResponse, StepRequest, StepResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe notebook API",
        description = "Owner-scoped recipe management with a shared category catalogue.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        RecipeRequest,
        IngredientRequest,
        StepRequest,
        RecipeIdResponse,
        RecipeDetailResponse,
        RecipeSummaryResponse,
        RecipeListResponse,
        PaginationResponse,
        IngredientResponse,
        StepResponse,
        CategoryResponse,
    )),
    tags(
        (name = "users", description = "Session login"),
        (name = "recipes", description = "Recipes owned by the caller"),
        (name = "categories", description = "Shared category catalogue"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
