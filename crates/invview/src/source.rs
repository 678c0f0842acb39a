#![forbid(unsafe_code)]

//! Where search results come from.
//!
//! The screen only talks to [`InventorySource`]. [`MockSource`] is the shipped
//! implementation: it waits a fixed delay and returns the static batch from
//! [`catalog`](crate::catalog), plus a profile whose id and presence come from
//! an injected random generator.

use std::fmt;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use thiserror::Error;
use tracing::debug;

use crate::catalog::mock_inventory;
use crate::item::Item;
use crate::profile::Profile;
use crate::state::{FetchOutcome, FetchRequest, SearchResults};

/// Errors a source can report for a search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("player `{0}` was not found")]
    NotFound(String),
    #[error("temporary failure: {0}")]
    Transient(String),
}

/// Provider of profiles and inventories by username.
///
/// Calls may block; the screen runs them on a background task.
pub trait InventorySource: Send + Sync {
    fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError>;
    fn fetch_inventory(&self, username: &str) -> Result<Vec<Item>, FetchError>;
}

/// Run the calls a request asks for and package the outcome.
pub fn resolve(source: &dyn InventorySource, request: &FetchRequest) -> FetchOutcome {
    let profile = if request.with_profile {
        Some(source.fetch_profile(&request.username)?)
    } else {
        None
    };
    let items = source.fetch_inventory(&request.username)?;
    Ok(SearchResults {
        username: request.username.clone(),
        items,
        profile,
    })
}

/// Range of generated user ids.
const USER_ID_MIN: u64 = 1_000_000;
const USER_ID_MAX: u64 = 999_999_999;

/// In-memory source returning canned data after a delay.
pub struct MockSource {
    latency: Duration,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl fmt::Debug for MockSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockSource")
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

impl MockSource {
    pub fn new(latency: Duration, rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            latency,
            rng: Mutex::new(rng),
        }
    }

    /// Reproducible profiles for a given seed.
    pub fn seeded(latency: Duration, seed: u64) -> Self {
        Self::new(latency, Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn from_entropy(latency: Duration) -> Self {
        Self::new(latency, Box::new(StdRng::from_entropy()))
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl InventorySource for MockSource {
    fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError> {
        let (user_id, online) = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            (
                rng.gen_range(USER_ID_MIN..=USER_ID_MAX),
                rng.gen_bool(0.5),
            )
        };
        debug!(target: "invview.source", username, user_id, online, "mock profile");
        Ok(Profile {
            username: username.to_owned(),
            display_name: username.to_owned(),
            user_id,
            status: "Building something awesome".to_owned(),
            joined: "March 2019".to_owned(),
            friends: 156,
            followers: 1_337,
            following: 89,
            online,
            avatar: "🧑‍🚀".to_owned(),
        })
    }

    fn fetch_inventory(&self, username: &str) -> Result<Vec<Item>, FetchError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        let items = mock_inventory();
        debug!(target: "invview.source", username, count = items.len(), "mock inventory");
        Ok(items)
    }
}
