//! Contract for the remote data service.
//!
//! The service is reached through [`RemoteClient`]; any backend that can
//! establish an anonymous session and store ingredients, recipes and
//! preferences can sit behind it. Every call is a single attempt: retry
//! policy belongs to the caller.

mod http;
mod memory;

pub use http::{HttpRemoteClient, DEFAULT_TIMEOUT};
pub use memory::{InMemoryRemote, RemoteCall};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Ingredient, Recipe, UserPreferences};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed payload: {0}")]
    Decode(String),

    #[error("Remote service not configured. Add remote.server_url to config.")]
    NotConfigured,
}

/// Anonymous identity handed out by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub token: String,
}

#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Idempotent; an anonymous identity is acceptable.
    async fn establish_session(&self) -> Result<Session, RemoteError>;

    async fn load_ingredients(&self, session: &Session) -> Result<Vec<Ingredient>, RemoteError>;

    async fn save_ingredient(
        &self,
        session: &Session,
        ingredient: &Ingredient,
    ) -> Result<(), RemoteError>;

    async fn delete_ingredient(&self, session: &Session, id: Uuid) -> Result<(), RemoteError>;

    async fn load_recipes(&self, session: &Session) -> Result<Vec<Recipe>, RemoteError>;

    async fn save_recipe(&self, session: &Session, recipe: &Recipe) -> Result<(), RemoteError>;

    async fn load_preferences(
        &self,
        session: &Session,
    ) -> Result<Option<UserPreferences>, RemoteError>;

    async fn save_preferences(
        &self,
        session: &Session,
        preferences: &UserPreferences,
    ) -> Result<(), RemoteError>;
}
