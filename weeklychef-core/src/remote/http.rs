//! JSON-over-HTTP implementation of [`RemoteClient`].
//!
//! Endpoints, relative to the server URL:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | session | `POST /session/anonymous` |
//! | ingredients | `GET /ingredients`, `PUT /ingredients/{id}`, `DELETE /ingredients/{id}` |
//! | recipes | `GET /recipes`, `PUT /recipes/{id}` |
//! | preferences | `GET /preferences` (404 = none), `PUT /preferences` |
//!
//! Authenticated requests carry `Authorization: Bearer <token>`.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

use super::{RemoteClient, RemoteError, Session};
use crate::models::{Ingredient, Recipe, UserPreferences};

/// Per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpRemoteClient {
    server_url: Option<String>,
    http: reqwest::Client,
}

impl HttpRemoteClient {
    /// A client without a server URL fails every session attempt with
    /// [`RemoteError::NotConfigured`].
    pub fn new(server_url: Option<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        Ok(Self {
            server_url: server_url.map(|url| normalize_base_url(&url)),
            http,
        })
    }

    pub fn server_url(&self) -> Option<&str> {
        self.server_url.as_deref()
    }

    fn url(&self, path: &str) -> Result<String, RemoteError> {
        let base = self.server_url.as_ref().ok_or(RemoteError::NotConfigured)?;
        Ok(format!("{}{}", base, path))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
    ) -> Result<T, RemoteError> {
        let response = self
            .http
            .get(self.url(path)?)
            .bearer_auth(&session.token)
            .send()
            .await
            .map_err(transport_error)?;

        decode(check_status(response)?).await
    }

    async fn put_json<B: serde::Serialize + ?Sized>(
        &self,
        session: &Session,
        path: &str,
        body: &B,
    ) -> Result<(), RemoteError> {
        let response = self
            .http
            .put(self.url(path)?)
            .bearer_auth(&session.token)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response).map(|_| ())
    }
}

/// Accepts bare hosts and strips trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

fn transport_error(e: reqwest::Error) -> RemoteError {
    if e.is_decode() {
        RemoteError::Decode(e.to_string())
    } else {
        RemoteError::Network(e.to_string())
    }
}

fn status_error(status: StatusCode) -> Option<RemoteError> {
    if status.is_success() {
        None
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Some(RemoteError::Auth(format!("Server returned status {}", status)))
    } else {
        Some(RemoteError::Network(format!(
            "Server returned status {}",
            status
        )))
    }
}

fn check_status(response: Response) -> Result<Response, RemoteError> {
    match status_error(response.status()) {
        Some(err) => Err(err),
        None => Ok(response),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| RemoteError::Decode(e.to_string()))
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn establish_session(&self) -> Result<Session, RemoteError> {
        let url = self.url("/session/anonymous")?;

        let response = self
            .http
            .post(url)
            .send()
            .await
            .map_err(|e| RemoteError::Auth(e.to_string()))?;

        let response = match status_error(response.status()) {
            Some(err) => return Err(RemoteError::Auth(err.to_string())),
            None => response,
        };

        decode(response).await
    }

    async fn load_ingredients(&self, session: &Session) -> Result<Vec<Ingredient>, RemoteError> {
        self.get_json(session, "/ingredients").await
    }

    async fn save_ingredient(
        &self,
        session: &Session,
        ingredient: &Ingredient,
    ) -> Result<(), RemoteError> {
        let path = format!("/ingredients/{}", ingredient.id());
        self.put_json(session, &path, ingredient).await
    }

    async fn delete_ingredient(&self, session: &Session, id: Uuid) -> Result<(), RemoteError> {
        let response = self
            .http
            .delete(self.url(&format!("/ingredients/{}", id))?)
            .bearer_auth(&session.token)
            .send()
            .await
            .map_err(transport_error)?;

        // Deleting something already gone is not a failure.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        check_status(response).map(|_| ())
    }

    async fn load_recipes(&self, session: &Session) -> Result<Vec<Recipe>, RemoteError> {
        self.get_json(session, "/recipes").await
    }

    async fn save_recipe(&self, session: &Session, recipe: &Recipe) -> Result<(), RemoteError> {
        let path = format!("/recipes/{}", recipe.id);
        self.put_json(session, &path, recipe).await
    }

    async fn load_preferences(
        &self,
        session: &Session,
    ) -> Result<Option<UserPreferences>, RemoteError> {
        let response = self
            .http
            .get(self.url("/preferences")?)
            .bearer_auth(&session.token)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(check_status(response)?).await.map(Some)
    }

    async fn save_preferences(
        &self,
        session: &Session,
        preferences: &UserPreferences,
    ) -> Result<(), RemoteError> {
        self.put_json(session, "/preferences", preferences).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> HttpRemoteClient {
        HttpRemoteClient::new(Some(url.to_string()), DEFAULT_TIMEOUT).unwrap()
    }

    #[test]
    fn test_url_with_scheme() {
        let c = client("https://chef.example.com/");
        assert_eq!(
            c.url("/ingredients").unwrap(),
            "https://chef.example.com/ingredients"
        );
    }

    #[test]
    fn test_url_bare_host() {
        let c = client("localhost:8080");
        assert_eq!(c.url("/recipes").unwrap(), "http://localhost:8080/recipes");
    }

    #[test]
    fn test_unconfigured_client_has_no_url() {
        let c = HttpRemoteClient::new(None, DEFAULT_TIMEOUT).unwrap();
        assert!(c.server_url().is_none());
        assert_eq!(c.url("/ingredients"), Err(RemoteError::NotConfigured));
    }

    #[tokio::test]
    async fn test_unconfigured_session_fails_without_io() {
        let c = HttpRemoteClient::new(None, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            c.establish_session().await,
            Err(RemoteError::NotConfigured)
        );
    }

    #[test]
    fn test_status_mapping() {
        assert!(status_error(StatusCode::OK).is_none());
        assert!(status_error(StatusCode::NO_CONTENT).is_none());
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED),
            Some(RemoteError::Auth(_))
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN),
            Some(RemoteError::Auth(_))
        ));
        assert!(matches!(
            status_error(StatusCode::SERVICE_UNAVAILABLE),
            Some(RemoteError::Network(_))
        ));
    }
}
