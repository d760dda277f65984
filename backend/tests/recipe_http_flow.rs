//! End-to-end HTTP flow: login, create, read, list, replace and delete a
//! recipe through the public handlers over the in-memory store.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use recipe_notebook::Trace;
use recipe_notebook::domain::ports::{CreateRecipeRequest, RecipeCommand};
use recipe_notebook::domain::{
    CategoryId, Difficulty, IngredientDraft, RecipeDraft, TRACE_ID_HEADER, UserId,
};
use recipe_notebook::inbound::http::categories::list_categories;
use recipe_notebook::inbound::http::error::{
    json_error_handler, path_error_handler, query_error_handler,
};
use recipe_notebook::inbound::http::recipes::{
    create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe,
};
use recipe_notebook::inbound::http::users::login;
use recipe_notebook::test_support::InMemoryHarness;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn harness() -> InMemoryHarness {
    let start = Utc
        .with_ymd_and_hms(2026, 4, 2, 18, 0, 0)
        .single()
        .expect("valid start time");
    InMemoryHarness::new(start)
}

fn app(
    harness: &InMemoryHarness,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(harness.http_state()))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session)
                .service(login)
                .service(list_recipes)
                .service(get_recipe)
                .service(create_recipe)
                .service(update_recipe)
                .service(delete_recipe)
                .service(list_categories),
        )
}

async fn log_in<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"username": "admin", "password": "password"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

async fn body(response: ServiceResponse) -> Value {
    let bytes = actix_test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[rstest]
#[actix_web::test]
async fn recipe_lifecycle_round_trips_through_http(harness: InMemoryHarness) {
    let app = actix_test::init_service(app(&harness)).await;
    let cookie = log_in(&app).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(cookie.clone())
            .set_json(json!({
                "title": "  Pancakes  ",
                "difficulty": "EASY",
                "cookingTimeMinutes": 20,
                "categoryIds": [1, 2],
                "ingredients": [
                    {"quantity": "200", "unit": "g", "name": "flour"},
                    {"quantity": "300", "unit": "ml", "name": "milk"}
                ],
                "steps": [
                    {"instruction": "Whisk"},
                    {"instruction": "Rest"},
                    {"instruction": "Fry"}
                ]
            }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert!(created.headers().contains_key(TRACE_ID_HEADER));
    let id = body(created).await["id"].as_i64().expect("id");

    let detail = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/recipes/{id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(detail.status(), StatusCode::OK);
    let detail = body(detail).await;
    assert_eq!(detail["title"], "Pancakes");
    assert_eq!(detail["steps"][2]["instruction"], "Fry");
    assert_eq!(detail["steps"][2]["stepNumber"], 3);
    assert_eq!(detail["createdAt"], "2026-04-02T18:00:00+00:00");

    harness.clock.advance_seconds(120);
    let replaced = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/recipes/{id}"))
            .cookie(cookie.clone())
            .set_json(json!({
                "title": "Crepes",
                "difficulty": "medium",
                "cookingTimeMinutes": 25,
                "categoryIds": [2],
                "ingredients": [{"quantity": "2", "unit": "pcs", "name": "egg"}],
                "steps": [{"instruction": "Mix"}, {"instruction": "Fry thin"}]
            }))
            .to_request(),
    )
    .await;
    assert_eq!(replaced.status(), StatusCode::BAD_REQUEST);
    let rejected = body(replaced).await;
    assert_eq!(
        rejected["details"]["difficulty"],
        "Difficulty must be EASY, MEDIUM, or HARD"
    );

    let replaced = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/recipes/{id}"))
            .cookie(cookie.clone())
            .set_json(json!({
                "title": "Crepes",
                "difficulty": "MEDIUM",
                "cookingTimeMinutes": 25,
                "categoryIds": [2],
                "ingredients": [{"quantity": "2", "unit": "pcs", "name": "egg"}],
                "steps": [{"instruction": "Mix"}, {"instruction": "Fry thin"}]
            }))
            .to_request(),
    )
    .await;
    assert_eq!(replaced.status(), StatusCode::OK);

    let listing = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/recipes?difficulty=medium&search=CREP&categoryIds=2")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(listing.status(), StatusCode::OK);
    let listing = body(listing).await;
    assert_eq!(listing["recipes"][0]["title"], "Crepes");
    assert_eq!(listing["recipes"][0]["updatedAt"], "2026-04-02T18:02:00+00:00");
    assert_eq!(listing["pagination"]["totalRecipes"], 1);

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/recipes/{id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[actix_web::test]
async fn foreign_and_missing_recipes_share_one_error_shape(harness: InMemoryHarness) {
    let app = actix_test::init_service(app(&harness)).await;
    let cookie = log_in(&app).await;
    let foreign = harness
        .commands
        .create(CreateRecipeRequest {
            owner: UserId::random(),
            draft: RecipeDraft {
                title: "Someone else's".to_owned(),
                difficulty: Difficulty::Easy,
                cooking_time_minutes: 5,
                category_ids: vec![CategoryId::new(1).expect("positive id")],
                ingredients: vec![IngredientDraft {
                    quantity: "1".to_owned(),
                    unit: "pc".to_owned(),
                    name: "apple".to_owned(),
                }],
                instructions: vec!["Wash".to_owned(), "Eat".to_owned()],
            },
        })
        .await
        .expect("foreign recipe created");

    let mut shapes = Vec::new();
    for id in [foreign.get(), 424_242] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/recipes/{id}"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let mut payload = body(response).await;
        if let Some(object) = payload.as_object_mut() {
            object.remove("traceId");
        }
        shapes.push(payload);
    }

    assert_eq!(shapes[0], shapes[1]);
    assert_eq!(shapes[0], json!({"code": "not_found", "message": "Recipe not found"}));
}

#[rstest]
#[actix_web::test]
async fn categories_and_errors_carry_trace_headers(harness: InMemoryHarness) {
    let app = actix_test::init_service(app(&harness)).await;

    let anonymous = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/categories")
            .to_request(),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    let header_trace = anonymous
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace header");
    assert_eq!(body(anonymous).await["traceId"], header_trace);

    let cookie = log_in(&app).await;
    let catalogue = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/categories")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(catalogue.status(), StatusCode::OK);
    assert_eq!(
        catalogue
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok()),
        Some("private, no-cache, must-revalidate")
    );
    let names: Vec<Value> = body(catalogue)
        .await
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|category| category["name"].clone())
        .collect();
    assert_eq!(names.first(), Some(&json!("Breakfast")));
    assert_eq!(names.len(), 6);
}
