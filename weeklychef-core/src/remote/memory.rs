use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

use super::{RemoteClient, RemoteError, Session};
use crate::models::{Ingredient, Recipe, UserPreferences};

/// A call observed by [`InMemoryRemote`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    EstablishSession,
    LoadIngredients,
    SaveIngredient(Uuid),
    DeleteIngredient(Uuid),
    LoadRecipes,
    SaveRecipe(Uuid),
    LoadPreferences,
    SavePreferences,
}

#[derive(Debug, Default)]
struct State {
    ingredients: Vec<Ingredient>,
    recipes: Vec<Recipe>,
    preferences: Option<UserPreferences>,
    calls: Vec<RemoteCall>,
}

/// Process-local remote service with switchable failures.
///
/// Failed calls are still recorded in the call log.
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    state: Mutex<State>,
    fail_auth: AtomicBool,
    fail_loads: AtomicBool,
    fail_decode: AtomicBool,
    fail_writes: AtomicBool,
    latency: Mutex<Option<Duration>>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        let remote = Self::default();
        remote.lock().recipes = recipes;
        remote
    }

    pub fn with_ingredients(self, ingredients: Vec<Ingredient>) -> Self {
        self.lock().ingredients = ingredients;
        self
    }

    pub fn set_fail_auth(&self, fail: bool) {
        self.fail_auth.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Loads succeed at the transport level but return a malformed payload.
    pub fn set_fail_decode(&self, fail: bool) {
        self.fail_decode.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delay applied before every call completes.
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.lock().unwrap_or_else(|e| e.into_inner()) = latency;
    }

    pub fn ingredients(&self) -> Vec<Ingredient> {
        self.lock().ingredients.clone()
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.lock().recipes.clone()
    }

    pub fn preferences(&self) -> Option<UserPreferences> {
        self.lock().preferences.clone()
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.lock().calls.clone()
    }

    /// Calls that modify remote state.
    pub fn writes(&self) -> Vec<RemoteCall> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    RemoteCall::SaveIngredient(_)
                        | RemoteCall::DeleteIngredient(_)
                        | RemoteCall::SaveRecipe(_)
                        | RemoteCall::SavePreferences
                )
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn enter(&self, call: RemoteCall) {
        let latency = *self.latency.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }
        self.lock().calls.push(call);
    }

    fn check_load(&self) -> Result<(), RemoteError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(RemoteError::Network("remote unavailable".to_string()));
        }
        if self.fail_decode.load(Ordering::SeqCst) {
            return Err(RemoteError::Decode("unexpected end of payload".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), RemoteError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RemoteError::Network("write rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteClient for InMemoryRemote {
    async fn establish_session(&self) -> Result<Session, RemoteError> {
        self.enter(RemoteCall::EstablishSession).await;
        if self.fail_auth.load(Ordering::SeqCst) {
            return Err(RemoteError::Auth("anonymous sign-in refused".to_string()));
        }
        Ok(Session {
            user_id: "anonymous".to_string(),
            token: "memory-token".to_string(),
        })
    }

    async fn load_ingredients(&self, _session: &Session) -> Result<Vec<Ingredient>, RemoteError> {
        self.enter(RemoteCall::LoadIngredients).await;
        self.check_load()?;
        Ok(self.ingredients())
    }

    async fn save_ingredient(
        &self,
        _session: &Session,
        ingredient: &Ingredient,
    ) -> Result<(), RemoteError> {
        self.enter(RemoteCall::SaveIngredient(ingredient.id())).await;
        self.check_write()?;

        let mut state = self.lock();
        match state
            .ingredients
            .iter_mut()
            .find(|i| i.id() == ingredient.id())
        {
            Some(existing) => *existing = ingredient.clone(),
            None => state.ingredients.push(ingredient.clone()),
        }
        Ok(())
    }

    async fn delete_ingredient(&self, _session: &Session, id: Uuid) -> Result<(), RemoteError> {
        self.enter(RemoteCall::DeleteIngredient(id)).await;
        self.check_write()?;
        self.lock().ingredients.retain(|i| i.id() != id);
        Ok(())
    }

    async fn load_recipes(&self, _session: &Session) -> Result<Vec<Recipe>, RemoteError> {
        self.enter(RemoteCall::LoadRecipes).await;
        self.check_load()?;
        Ok(self.recipes())
    }

    async fn save_recipe(&self, _session: &Session, recipe: &Recipe) -> Result<(), RemoteError> {
        self.enter(RemoteCall::SaveRecipe(recipe.id)).await;
        self.check_write()?;

        let mut state = self.lock();
        match state.recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(existing) => *existing = recipe.clone(),
            None => state.recipes.push(recipe.clone()),
        }
        Ok(())
    }

    async fn load_preferences(
        &self,
        _session: &Session,
    ) -> Result<Option<UserPreferences>, RemoteError> {
        self.enter(RemoteCall::LoadPreferences).await;
        self.check_load()?;
        Ok(self.preferences())
    }

    async fn save_preferences(
        &self,
        _session: &Session,
        preferences: &UserPreferences,
    ) -> Result<(), RemoteError> {
        self.enter(RemoteCall::SavePreferences).await;
        self.check_write()?;
        self.lock().preferences = Some(preferences.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IngredientCategory;

    async fn session(remote: &InMemoryRemote) -> Session {
        remote.establish_session().await.unwrap()
    }

    #[tokio::test]
    async fn test_save_ingredient_upserts_by_id() {
        let remote = InMemoryRemote::new();
        let s = session(&remote).await;

        let egg = Ingredient::new("鸡蛋", 6.0, "个", IngredientCategory::Dairy);
        remote.save_ingredient(&s, &egg).await.unwrap();
        remote
            .save_ingredient(&s, &egg.clone().with_quantity(2.0))
            .await
            .unwrap();

        let stored = remote.ingredients();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].quantity, 2.0);
    }

    #[tokio::test]
    async fn test_delete_missing_ingredient_is_ok() {
        let remote = InMemoryRemote::new();
        let s = session(&remote).await;
        remote.delete_ingredient(&s, Uuid::new_v4()).await.unwrap();
        assert!(remote.ingredients().is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_switchable() {
        let remote = InMemoryRemote::new();
        remote.set_fail_auth(true);
        assert!(matches!(
            remote.establish_session().await,
            Err(RemoteError::Auth(_))
        ));

        remote.set_fail_auth(false);
        let s = session(&remote).await;
        remote.set_fail_loads(true);
        assert!(remote.load_recipes(&s).await.is_err());

        remote.set_fail_writes(true);
        let egg = Ingredient::new("鸡蛋", 1.0, "", IngredientCategory::Dairy);
        assert!(remote.save_ingredient(&s, &egg).await.is_err());
        assert!(remote.ingredients().is_empty());
        assert_eq!(remote.writes(), vec![RemoteCall::SaveIngredient(egg.id())]);
    }

    #[tokio::test]
    async fn test_decode_failure_on_loads() {
        let remote = InMemoryRemote::new();
        let s = session(&remote).await;
        remote.set_fail_decode(true);

        assert!(matches!(
            remote.load_ingredients(&s).await,
            Err(RemoteError::Decode(_))
        ));
        assert!(matches!(
            remote.load_preferences(&s).await,
            Err(RemoteError::Decode(_))
        ));

        remote.set_fail_decode(false);
        assert!(remote.load_recipes(&s).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_preferences_start_absent() {
        let remote = InMemoryRemote::new();
        let s = session(&remote).await;
        assert!(remote.load_preferences(&s).await.unwrap().is_none());

        remote
            .save_preferences(&s, &UserPreferences::default())
            .await
            .unwrap();
        assert_eq!(
            remote.load_preferences(&s).await.unwrap(),
            Some(UserPreferences::default())
        );
    }
}
