//! Tests for the recipe handlers.
//!
//! Most cases run the real services over the in-memory store so request
//! parsing, ownership and pagination are exercised end to end; mocks cover
//! failures the store cannot produce.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::MockRecipeQuery;
use crate::inbound::http::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::inbound::http::test_utils::{
    login_cookie, login_cookie_as, state_with, test_session_middleware, with_login_route,
};

const OTHER_OWNER: &str = "9b2e6c1a-3d4f-4a5b-8c7d-6e5f4a3b2c1d";

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(test_session_middleware())
        .configure(with_login_route)
        .service(
            web::scope("/api/v1")
                .service(list_recipes)
                .service(get_recipe)
                .service(create_recipe)
                .service(update_recipe)
                .service(delete_recipe),
        )
}

fn recipe_body(title: &str) -> Value {
    json!({
        "title": title,
        "difficulty": "EASY",
        "cookingTimeMinutes": 15,
        "categoryIds": [1],
        "ingredients": [
            {"quantity": "2", "unit": "pcs", "name": "egg"},
            {"quantity": "1", "unit": "tbsp", "name": "butter"}
        ],
        "steps": [
            {"instruction": "Whisk the eggs"},
            {"instruction": "Cook in butter"}
        ]
    })
}

async fn read_json(response: actix_web::dev::ServiceResponse) -> Value {
    let bytes = actix_test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[rstest]
#[case(actix_test::TestRequest::get().uri("/api/v1/recipes"))]
#[case(actix_test::TestRequest::get().uri("/api/v1/recipes/1"))]
#[case(actix_test::TestRequest::post().uri("/api/v1/recipes").set_json(recipe_body("Eggs")))]
#[case(actix_test::TestRequest::put().uri("/api/v1/recipes/1").set_json(recipe_body("Eggs")))]
#[case(actix_test::TestRequest::delete().uri("/api/v1/recipes/1"))]
#[actix_web::test]
async fn every_route_requires_a_session(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(test_app(state_with(|_| {}))).await;

    let response = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn create_returns_location_and_detail_is_ordered() {
    let app = actix_test::init_service(test_app(state_with(|_| {}))).await;
    let cookie = login_cookie(&app).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(cookie.clone())
            .set_json(recipe_body("Scrambled eggs"))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let location = created
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("Location header");
    let id = read_json(created).await["id"].as_i64().expect("numeric id");
    assert_eq!(location, format!("/api/v1/recipes/{id}"));

    let detail = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&location)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(detail.status(), StatusCode::OK);
    assert!(detail.headers().contains_key(header::CACHE_CONTROL));
    let body = read_json(detail).await;
    assert_eq!(body["title"], "Scrambled eggs");
    assert_eq!(body["ingredients"][0]["sortOrder"], 1);
    assert_eq!(body["ingredients"][1]["name"], "butter");
    assert_eq!(body["steps"][1]["stepNumber"], 2);
    assert_eq!(body["categories"][0]["name"], "Breakfast");
}

#[actix_web::test]
async fn invalid_body_lists_every_field_error() {
    let app = actix_test::init_service(test_app(state_with(|_| {}))).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(cookie)
            .set_json(json!({"title": "  ", "steps": [{"instruction": "Only one"}]}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["title"], "Title is required");
    assert_eq!(body["details"]["steps"], "At least two steps are required");
    assert_eq!(body["details"]["difficulty"], "Difficulty is required");
}

#[actix_web::test]
async fn malformed_json_is_an_invalid_request() {
    let app = actix_test::init_service(test_app(state_with(|_| {}))).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(cookie)
            .insert_header(header::ContentType::json())
            .set_payload("{\"title\": ")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Malformed request body");
}

#[actix_web::test]
async fn unknown_category_is_not_found_with_details() {
    let app = actix_test::init_service(test_app(state_with(|_| {}))).await;
    let cookie = login_cookie(&app).await;
    let mut body = recipe_body("Mystery");
    body["categoryIds"] = json!([1, 99]);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Invalid category ID");
    assert_eq!(
        body["details"]["categoryIds"],
        "Category with ID 99 does not exist"
    );
}

#[actix_web::test]
async fn listing_paginates_and_reports_metadata() {
    let app = actix_test::init_service(test_app(state_with(|_| {}))).await;
    let cookie = login_cookie(&app).await;
    for title in ["Cake", "Apple pie", "Bread"] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/recipes")
                .cookie(cookie.clone())
                .set_json(recipe_body(title))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/recipes?page=1&size=2&sort=title&direction=ASC")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["recipes"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["recipes"][0]["title"], "Cake");
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["totalRecipes"], 3);
    assert_eq!(body["pagination"]["hasNext"], false);
    assert_eq!(body["pagination"]["hasPrevious"], true);
}

#[actix_web::test]
async fn invalid_listing_parameters_are_reported_per_field() {
    let app = actix_test::init_service(test_app(state_with(|_| {}))).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/recipes?size=0&sort=calories&categoryIds=1,x")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["details"]["size"], "Page size must be between 1 and 100");
    assert_eq!(
        body["details"]["sort"],
        "Must be one of: title, cookingTimeMinutes, createdAt, updatedAt"
    );
    assert_eq!(
        body["details"]["categoryIds"],
        "Category IDs must be valid numbers"
    );
}

#[actix_web::test]
async fn other_owners_recipes_read_as_not_found() {
    let app = actix_test::init_service(test_app(state_with(|_| {}))).await;
    let owner = login_cookie(&app).await;
    let stranger = login_cookie_as(&app, OTHER_OWNER).await;
    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(owner)
            .set_json(recipe_body("Private"))
            .to_request(),
    )
    .await;
    let id = read_json(created).await["id"].as_i64().expect("numeric id");
    let uri = format!("/api/v1/recipes/{id}");

    for request in [
        actix_test::TestRequest::get().uri(&uri),
        actix_test::TestRequest::put()
            .uri(&uri)
            .set_json(recipe_body("Hijacked")),
        actix_test::TestRequest::delete().uri(&uri),
    ] {
        let response =
            actix_test::call_service(&app, request.cookie(stranger.clone()).to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json(response).await;
        assert_eq!(body["message"], "Recipe not found");
    }

    let listing = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/recipes")
            .cookie(stranger)
            .to_request(),
    )
    .await;
    let body = read_json(listing).await;
    assert_eq!(body["pagination"]["totalRecipes"], 0);
}

#[actix_web::test]
async fn update_replaces_content_and_delete_removes_it() {
    let app = actix_test::init_service(test_app(state_with(|_| {}))).await;
    let cookie = login_cookie(&app).await;
    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(cookie.clone())
            .set_json(recipe_body("Draft"))
            .to_request(),
    )
    .await;
    let id = read_json(created).await["id"].as_i64().expect("numeric id");
    let uri = format!("/api/v1/recipes/{id}");

    let mut replacement = recipe_body("Final");
    replacement["ingredients"] = json!([{"quantity": "3", "unit": "cups", "name": "rice"}]);
    replacement["categoryIds"] = json!([3, 5]);
    let updated = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&uri)
            .cookie(cookie.clone())
            .set_json(replacement)
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(read_json(updated).await["id"], id);

    let detail = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&uri)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    let body = read_json(detail).await;
    assert_eq!(body["title"], "Final");
    assert_eq!(body["ingredients"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["categories"].as_array().map(Vec::len), Some(2));

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&uri)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("/api/v1/recipes/0", StatusCode::NOT_FOUND)]
#[case("/api/v1/recipes/-4", StatusCode::NOT_FOUND)]
#[case("/api/v1/recipes/abc", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn path_ids_are_checked_before_lookup(#[case] uri: &str, #[case] status: StatusCode) {
    let app = actix_test::init_service(test_app(state_with(|_| {}))).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(uri)
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), status);
}

#[actix_web::test]
async fn listing_outage_is_service_unavailable() {
    let mut query = MockRecipeQuery::new();
    query
        .expect_list()
        .times(1)
        .returning(|_| Err(Error::service_unavailable("recipe repository unavailable")));
    let state = state_with(|ports| ports.recipes_query = Arc::new(query));
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/recipes")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json(response).await;
    assert_eq!(body["code"], "service_unavailable");
}
