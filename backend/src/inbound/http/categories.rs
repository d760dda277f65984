//! Category catalogue handler.
//!
//! ```text
//! GET /api/v1/categories
//! ```

use actix_web::{HttpResponse, get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::recipes_dto::CategoryResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// List every category sorted by name.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Category catalogue", body = [CategoryResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let categories: Vec<CategoryResponse> = state
        .categories
        .list_categories()
        .await?
        .into_iter()
        .map(CategoryResponse::from)
        .collect();
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(categories))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test as actix_test};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::MockCategoryQuery;
    use crate::domain::{CategoryId, CategoryView, Error};
    use crate::inbound::http::test_utils::{login_cookie, state_with};

    #[actix_web::test]
    async fn returns_catalogue_in_service_order() {
        let mut query = MockCategoryQuery::new();
        query.expect_list_categories().times(1).returning(|| {
            Ok(["Breakfast", "Dessert"]
                .into_iter()
                .zip(1_i64..)
                .map(|(name, id)| CategoryView {
                    id: CategoryId::new(id).expect("positive"),
                    name: name.to_owned(),
                    is_default: true,
                })
                .collect())
        });
        let state = state_with(|ports| ports.categories = Arc::new(query));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .configure(crate::inbound::http::test_utils::with_login_route)
                .service(web::scope("/api/v1").service(list_categories)),
        )
        .await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/categories")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body[0]["name"], "Breakfast");
        assert_eq!(body[1]["id"], 2);
    }

    #[actix_web::test]
    async fn store_outage_is_service_unavailable() {
        let mut query = MockCategoryQuery::new();
        query
            .expect_list_categories()
            .returning(|| Err(Error::service_unavailable("database unavailable")));
        let state = state_with(|ports| ports.categories = Arc::new(query));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .configure(crate::inbound::http::test_utils::with_login_route)
                .service(web::scope("/api/v1").service(list_categories)),
        )
        .await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/categories")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
