//! Driving port for authenticating recipe owners.
//!
//! The identity provider is opaque to the recipe core: inbound adapters call
//! this port with credentials and only ever see the resulting [`UserId`].

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Owner id issued to the development login.
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Development authenticator accepting `admin` / `password`.
///
/// The accepted login always maps to [`FIXTURE_USER_ID`] so recipes created
/// in one session are visible in the next.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() == "admin" && credentials.password() == "password" {
            UserId::new(FIXTURE_USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
