//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test as actix_test, web};
use mockable::DefaultClock;

use crate::domain::ports::{FIXTURE_USER_ID, FixtureLoginService};
use crate::domain::{CategoryQueryService, Error, RecipeCommandService, RecipeQueryService, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryRecipeStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// State wired to a fresh in-memory store; `configure` may swap any port.
pub fn state_with(configure: impl FnOnce(&mut HttpStatePorts)) -> HttpState {
    let store = Arc::new(InMemoryRecipeStore::new());
    let mut ports = HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        recipes: Arc::new(RecipeCommandService::new(
            store.clone(),
            store.clone(),
            Arc::new(DefaultClock),
        )),
        recipes_query: Arc::new(RecipeQueryService::new(store.clone())),
        categories: Arc::new(CategoryQueryService::new(store)),
    };
    configure(&mut ports);
    HttpState::new(ports)
}

/// Register `POST /test-login/{user_id}`, which stores the owner in the
/// session without going through credentials.
pub fn with_login_route(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/test-login/{user_id}",
        web::post().to(
            |session: SessionContext, path: web::Path<String>| async move {
                let user_id = UserId::new(path.into_inner())
                    .map_err(|err| Error::invalid_request(err.to_string()))?;
                session.persist_user(&user_id)?;
                Ok::<_, Error>(HttpResponse::Ok().finish())
            },
        ),
    );
}

/// Session cookie for `user_id`, obtained through [`with_login_route`].
pub async fn login_cookie_as<S, B>(app: &S, user_id: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/test-login/{user_id}"))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "test login failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Session cookie for the fixture owner.
pub async fn login_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    login_cookie_as(app, FIXTURE_USER_ID).await
}
