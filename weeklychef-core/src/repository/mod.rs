//! Authoritative in-memory snapshot of the fridge and recipe collections.
//!
//! Every mutation is applied to memory first, then saved to the
//! [`LocalStore`], then (only when online) queued for the remote service.
//! Remote failures land in the status error slot and never roll back local
//! state.

mod writer;

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::catalog::{sample_ingredients, RecipeCatalog};
use crate::matching::{self, Recommendations};
use crate::models::{Ingredient, IngredientCategory, Recipe, RecipeCategory, UserPreferences};
use crate::remote::{RemoteClient, RemoteError, Session};
use crate::store::LocalStore;
use writer::{RemoteWrite, RemoteWriter};

/// Ingredients expiring within this many days count as "expiring soon".
pub const EXPIRING_SOON_DAYS: i64 = 3;

/// Observable side effects of repository operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryStatus {
    pub loading: bool,
    /// Latest failure only; each new failure overwrites the previous one.
    pub error: Option<String>,
    pub online: bool,
}

struct RemoteSnapshot {
    ingredients: Vec<Ingredient>,
    recipes: Vec<Recipe>,
    preferences: Option<UserPreferences>,
}

pub struct InventoryRepository {
    ingredients: Vec<Ingredient>,
    recipes: Vec<Recipe>,
    preferences: UserPreferences,
    catalog: RecipeCatalog,
    local: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteClient>,
    session: Option<Session>,
    status: Arc<watch::Sender<RepositoryStatus>>,
    writer: RemoteWriter,
}

impl InventoryRepository {
    /// Creates an empty, offline repository. Must be called from within a
    /// Tokio runtime because it spawns the remote writer task.
    pub fn new(
        local: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteClient>,
        catalog: RecipeCatalog,
    ) -> Self {
        let (status, _) = watch::channel(RepositoryStatus::default());
        let status = Arc::new(status);
        let writer = RemoteWriter::spawn(remote.clone(), status.clone());

        Self {
            ingredients: Vec::new(),
            recipes: Vec::new(),
            preferences: UserPreferences::default(),
            catalog,
            local,
            remote,
            session: None,
            status,
            writer,
        }
    }

    // ========== Connectivity ==========

    /// Loads state from the remote service, or from local fallbacks when the
    /// remote path fails at any step. Never fails; see [`Self::status`].
    pub async fn bootstrap(&mut self) {
        self.status.send_modify(|s| s.loading = true);

        match self.load_remote().await {
            Ok((session, snapshot)) => {
                tracing::info!(
                    "Loaded {} ingredient(s) and {} recipe(s) from remote",
                    snapshot.ingredients.len(),
                    snapshot.recipes.len()
                );
                self.session = Some(session);
                let remote_preferences = self.apply_remote_snapshot(snapshot);
                self.status.send_modify(|s| {
                    s.loading = false;
                    s.online = true;
                    s.error = None;
                });
                self.persist_ingredients();
                if remote_preferences {
                    self.persist_preferences();
                }
            }
            Err(e) => {
                tracing::warn!("Remote unavailable, using local data: {}", e);
                self.session = None;
                self.load_local_fallback();
                self.status.send_modify(|s| {
                    s.loading = false;
                    s.online = false;
                    s.error = Some(e.to_string());
                });
            }
        }
    }

    pub async fn retry_connection(&mut self) {
        self.bootstrap().await;
    }

    /// Re-uploads every local ingredient, then reloads from the remote.
    /// No-op while offline.
    ///
    /// On failure the in-memory collections are kept and the repository
    /// goes offline.
    pub async fn resync(&mut self) {
        let session = match (&self.session, self.is_online()) {
            (Some(session), true) => session.clone(),
            _ => {
                tracing::debug!("Resync skipped while offline");
                return;
            }
        };

        self.status.send_modify(|s| s.loading = true);
        // Earlier queued writes must land before the bulk upload.
        self.writer.flush().await;

        match self.upload_and_reload(&session).await {
            Ok(snapshot) => {
                tracing::info!(
                    "Resynced {} ingredient(s) and {} recipe(s)",
                    snapshot.ingredients.len(),
                    snapshot.recipes.len()
                );
                let remote_preferences = self.apply_remote_snapshot(snapshot);
                self.status.send_modify(|s| {
                    s.loading = false;
                    s.error = None;
                });
                self.persist_ingredients();
                if remote_preferences {
                    self.persist_preferences();
                }
            }
            Err(e) => {
                tracing::warn!("Resync failed: {}", e);
                self.session = None;
                self.status.send_modify(|s| {
                    s.loading = false;
                    s.online = false;
                    s.error = Some(e.to_string());
                });
            }
        }
    }

    /// Last write wins; there is no conflict detection.
    async fn upload_and_reload(&self, session: &Session) -> Result<RemoteSnapshot, RemoteError> {
        for ingredient in &self.ingredients {
            self.remote.save_ingredient(session, ingredient).await?;
        }
        self.load_snapshot(session).await
    }

    async fn load_remote(&self) -> Result<(Session, RemoteSnapshot), RemoteError> {
        let session = self.remote.establish_session().await?;
        let snapshot = self.load_snapshot(&session).await?;
        Ok((session, snapshot))
    }

    async fn load_snapshot(&self, session: &Session) -> Result<RemoteSnapshot, RemoteError> {
        let ingredients = self.remote.load_ingredients(session).await?;
        let recipes = self.remote.load_recipes(session).await?;
        let preferences = self.remote.load_preferences(session).await?;
        Ok(RemoteSnapshot {
            ingredients,
            recipes,
            preferences,
        })
    }

    /// Returns true when the remote held preferences, which then need
    /// mirroring to the local store.
    fn apply_remote_snapshot(&mut self, snapshot: RemoteSnapshot) -> bool {
        self.ingredients = snapshot
            .ingredients
            .into_iter()
            .map(Ingredient::normalized)
            .collect();
        self.recipes = if snapshot.recipes.is_empty() {
            tracing::debug!("Remote catalog empty, using bundled recipes");
            self.catalog.to_vec()
        } else {
            snapshot.recipes
        };
        match snapshot.preferences {
            Some(preferences) => {
                self.preferences = preferences;
                true
            }
            None => {
                self.preferences = self.local_preferences();
                false
            }
        }
    }

    fn load_local_fallback(&mut self) {
        self.ingredients = match self.local.load_ingredients() {
            Ok(Some(ingredients)) => ingredients,
            Ok(None) => {
                tracing::info!("No local snapshot, using sample ingredients");
                sample_ingredients(Utc::now())
            }
            Err(e) => {
                tracing::warn!("Failed to load local snapshot: {}", e);
                sample_ingredients(Utc::now())
            }
        };
        self.recipes = self.catalog.to_vec();
        self.preferences = self.local_preferences();
    }

    fn local_preferences(&self) -> UserPreferences {
        match self.local.load_preferences() {
            Ok(Some(preferences)) => preferences,
            Ok(None) => UserPreferences::default(),
            Err(e) => {
                tracing::warn!("Failed to load local preferences: {}", e);
                UserPreferences::default()
            }
        }
    }

    // ========== Mutations ==========

    /// Returns the id of the stored ingredient.
    pub fn add_ingredient(&mut self, ingredient: Ingredient) -> Uuid {
        let ingredient = ingredient.normalized();
        let id = ingredient.id();
        self.ingredients.push(ingredient.clone());
        self.persist_ingredients();
        self.submit(RemoteWrite::SaveIngredient(ingredient));
        id
    }

    /// Replaces the ingredient with the same id. Returns false (and changes
    /// nothing) when no such ingredient exists.
    pub fn update_ingredient(&mut self, ingredient: Ingredient) -> bool {
        let ingredient = ingredient.normalized();
        let Some(slot) = self
            .ingredients
            .iter_mut()
            .find(|i| i.id() == ingredient.id())
        else {
            return false;
        };
        *slot = ingredient.clone();
        self.persist_ingredients();
        self.submit(RemoteWrite::SaveIngredient(ingredient));
        true
    }

    /// Returns the removed ingredient, if it existed.
    pub fn remove_ingredient(&mut self, id: Uuid) -> Option<Ingredient> {
        let index = self.ingredients.iter().position(|i| i.id() == id)?;
        let removed = self.ingredients.remove(index);
        self.persist_ingredients();
        self.submit(RemoteWrite::DeleteIngredient(id));
        Some(removed)
    }

    /// Adds exactly one like. Returns the new count, or `None` for an unknown id.
    pub fn like_recipe(&mut self, id: Uuid) -> Option<u32> {
        let recipe = self.recipes.iter_mut().find(|r| r.id == id)?;
        let likes = recipe.like();
        let recipe = recipe.clone();
        self.submit(RemoteWrite::SaveRecipe(recipe));
        Some(likes)
    }

    pub fn set_preferences(&mut self, preferences: UserPreferences) {
        self.preferences = preferences.clone();
        self.persist_preferences();
        self.submit(RemoteWrite::SavePreferences(preferences));
    }

    fn persist_preferences(&self) {
        if let Err(e) = self.local.save_preferences(&self.preferences) {
            tracing::warn!("Failed to save preferences locally: {}", e);
            self.record_error(e.to_string());
        }
    }

    fn persist_ingredients(&self) {
        if let Err(e) = self.local.save_ingredients(&self.ingredients) {
            tracing::warn!("Failed to save ingredients locally: {}", e);
            self.record_error(e.to_string());
        }
    }

    fn submit(&self, write: RemoteWrite) {
        match (&self.session, self.is_online()) {
            (Some(session), true) => self.writer.submit(session.clone(), write),
            _ => tracing::debug!("Offline, remote write skipped"),
        }
    }

    fn record_error(&self, message: String) {
        self.status.send_modify(|s| s.error = Some(message));
    }

    /// Waits until every queued remote write has had its single attempt.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    // ========== Status ==========

    pub fn status(&self) -> RepositoryStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RepositoryStatus> {
        self.status.subscribe()
    }

    pub fn is_online(&self) -> bool {
        self.status.borrow().online
    }

    // ========== Queries ==========

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn ingredient(&self, id: Uuid) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id() == id)
    }

    pub fn recipe(&self, id: Uuid) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Case-insensitive exact name lookup.
    pub fn find_recipe(&self, name: &str) -> Option<&Recipe> {
        let name = name.trim().to_lowercase();
        self.recipes.iter().find(|r| r.name.to_lowercase() == name)
    }

    pub fn ingredients_by_category(&self, category: IngredientCategory) -> Vec<&Ingredient> {
        self.ingredients
            .iter()
            .filter(|i| i.category == category)
            .collect()
    }

    pub fn recipes_by_category(&self, category: RecipeCategory) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Case-insensitive search over recipe name, description and tags.
    pub fn search_recipes(&self, text: &str) -> Vec<&Recipe> {
        let needle = text.trim().to_lowercase();
        self.recipes
            .iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle)
                    || r.description.to_lowercase().contains(&needle)
                    || r.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn expiring_ingredients(&self) -> Vec<&Ingredient> {
        self.expiring_ingredients_at(Utc::now())
    }

    /// Ingredients with 0 to 3 whole days left. Already expired ones are excluded.
    pub fn expiring_ingredients_at(&self, now: DateTime<Utc>) -> Vec<&Ingredient> {
        self.ingredients
            .iter()
            .filter(|i| {
                matches!(
                    i.days_until_expiration_at(now),
                    Some(days) if (0..=EXPIRING_SOON_DAYS).contains(&days)
                )
            })
            .collect()
    }

    pub fn expired_ingredients_at(&self, now: DateTime<Utc>) -> Vec<&Ingredient> {
        self.ingredients
            .iter()
            .filter(|i| i.is_expired_at(now))
            .collect()
    }

    pub fn recommendations(&self) -> Recommendations<'_> {
        matching::bucket(&self.ingredients, &self.recipes)
    }
}
