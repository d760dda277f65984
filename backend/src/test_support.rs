//! Test utilities shared by unit tests and the `tests/` suites.
//!
//! Compiled for `cfg(test)` and when the `test-support` feature is enabled.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::FixtureLoginService;
use crate::domain::{CategoryQueryService, RecipeCommandService, RecipeQueryService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryRecipeStore;

/// Clock whose time only moves when told to.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Services and HTTP state sharing one in-memory store and clock.
pub struct InMemoryHarness {
    pub store: Arc<InMemoryRecipeStore>,
    pub clock: Arc<MutableClock>,
    pub commands: Arc<RecipeCommandService<InMemoryRecipeStore, InMemoryRecipeStore>>,
    pub queries: Arc<RecipeQueryService<InMemoryRecipeStore>>,
    pub categories: Arc<CategoryQueryService<InMemoryRecipeStore>>,
}

impl InMemoryHarness {
    /// Fresh store seeded with the default categories, clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        let store = Arc::new(InMemoryRecipeStore::new());
        let clock = Arc::new(MutableClock::new(now));
        let commands = Arc::new(RecipeCommandService::new(
            store.clone(),
            store.clone(),
            clock.clone(),
        ));
        Self {
            queries: Arc::new(RecipeQueryService::new(store.clone())),
            categories: Arc::new(CategoryQueryService::new(store.clone())),
            store,
            clock,
            commands,
        }
    }

    /// HTTP state over the harness services with the development login.
    pub fn http_state(&self) -> HttpState {
        HttpState::new(HttpStatePorts {
            login: Arc::new(FixtureLoginService),
            recipes: self.commands.clone(),
            recipes_query: self.queries.clone(),
            categories: self.categories.clone(),
        })
    }
}
