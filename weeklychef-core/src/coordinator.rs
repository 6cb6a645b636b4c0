//! Connectivity state machine driving the [`InventoryRepository`].
//!
//! ```text
//! Uninitialized --start--> Bootstrapping --> Online | Offline
//! Offline --retry_connection--> Bootstrapping
//! Online --resync--> Online (or Offline if the reload fails)
//! ```

use std::fmt;
use thiserror::Error;
use tokio::sync::watch;

use crate::repository::InventoryRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Uninitialized,
    Bootstrapping,
    Online,
    Offline,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncState::Uninitialized => write!(f, "uninitialized"),
            SyncState::Bootstrapping => write!(f, "bootstrapping"),
            SyncState::Online => write!(f, "online"),
            SyncState::Offline => write!(f, "offline"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("Cannot {event} while {from}")]
    InvalidTransition { from: SyncState, event: &'static str },
}

pub struct SyncCoordinator {
    repository: InventoryRepository,
    state: watch::Sender<SyncState>,
}

impl SyncCoordinator {
    pub fn new(repository: InventoryRepository) -> Self {
        let (state, _) = watch::channel(SyncState::Uninitialized);
        Self { repository, state }
    }

    pub fn state(&self) -> SyncState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    pub fn repository(&self) -> &InventoryRepository {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut InventoryRepository {
        &mut self.repository
    }

    pub fn into_repository(self) -> InventoryRepository {
        self.repository
    }

    /// First bootstrap. Only valid from `Uninitialized`.
    pub async fn start(&mut self) -> Result<SyncState, CoordinatorError> {
        self.require_state(SyncState::Uninitialized, "start")?;
        Ok(self.bootstrap().await)
    }

    /// Re-runs the bootstrap. Only valid from `Offline`.
    pub async fn retry_connection(&mut self) -> Result<SyncState, CoordinatorError> {
        self.require_state(SyncState::Offline, "retry connection")?;
        Ok(self.bootstrap().await)
    }

    /// Upload and reload while online; does nothing while offline.
    pub async fn resync(&mut self) -> Result<SyncState, CoordinatorError> {
        match self.state() {
            SyncState::Online => {
                self.repository.resync().await;
                if !self.repository.is_online() {
                    self.transition(SyncState::Offline);
                }
                Ok(self.state())
            }
            SyncState::Offline => Ok(SyncState::Offline),
            from => Err(CoordinatorError::InvalidTransition {
                from,
                event: "resync",
            }),
        }
    }

    async fn bootstrap(&mut self) -> SyncState {
        self.transition(SyncState::Bootstrapping);
        self.repository.bootstrap().await;

        let next = if self.repository.is_online() {
            SyncState::Online
        } else {
            SyncState::Offline
        };
        self.transition(next);
        next
    }

    fn require_state(
        &self,
        required: SyncState,
        event: &'static str,
    ) -> Result<(), CoordinatorError> {
        let from = self.state();
        if from == required {
            Ok(())
        } else {
            Err(CoordinatorError::InvalidTransition { from, event })
        }
    }

    fn transition(&self, next: SyncState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            tracing::debug!("Sync state {} -> {}", previous, next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecipeCatalog;
    use crate::remote::InMemoryRemote;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn coordinator(remote: Arc<InMemoryRemote>) -> SyncCoordinator {
        let repository = InventoryRepository::new(
            Arc::new(MemoryStore::new()),
            remote,
            RecipeCatalog::bundled(),
        );
        SyncCoordinator::new(repository)
    }

    #[tokio::test]
    async fn test_start_online() {
        let mut c = coordinator(Arc::new(InMemoryRemote::new()));
        assert_eq!(c.state(), SyncState::Uninitialized);
        assert_eq!(c.start().await, Ok(SyncState::Online));
        assert_eq!(c.state(), SyncState::Online);
    }

    #[tokio::test]
    async fn test_start_offline_then_retry() {
        let remote = Arc::new(InMemoryRemote::new());
        remote.set_fail_auth(true);
        let mut c = coordinator(remote.clone());

        assert_eq!(c.start().await, Ok(SyncState::Offline));
        assert_eq!(c.retry_connection().await, Ok(SyncState::Offline));

        remote.set_fail_auth(false);
        assert_eq!(c.retry_connection().await, Ok(SyncState::Online));
        assert!(c.repository().status().error.is_none());
    }

    #[tokio::test]
    async fn test_start_twice_is_invalid() {
        let mut c = coordinator(Arc::new(InMemoryRemote::new()));
        c.start().await.unwrap();
        assert_eq!(
            c.start().await,
            Err(CoordinatorError::InvalidTransition {
                from: SyncState::Online,
                event: "start",
            })
        );
    }

    #[tokio::test]
    async fn test_retry_only_from_offline() {
        let mut c = coordinator(Arc::new(InMemoryRemote::new()));
        assert!(c.retry_connection().await.is_err());
        c.start().await.unwrap();
        assert!(c.retry_connection().await.is_err());
    }

    #[tokio::test]
    async fn test_resync_before_start_is_invalid() {
        let mut c = coordinator(Arc::new(InMemoryRemote::new()));
        let err = c.resync().await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot resync while uninitialized");
    }

    #[tokio::test]
    async fn test_resync_online_stays_online() {
        let mut c = coordinator(Arc::new(InMemoryRemote::new()));
        c.start().await.unwrap();
        assert_eq!(c.resync().await, Ok(SyncState::Online));
    }

    #[tokio::test]
    async fn test_resync_offline_is_noop() {
        let remote = Arc::new(InMemoryRemote::new());
        remote.set_fail_auth(true);
        let mut c = coordinator(remote.clone());
        c.start().await.unwrap();
        let calls = remote.calls().len();

        assert_eq!(c.resync().await, Ok(SyncState::Offline));
        assert_eq!(remote.calls().len(), calls);
    }

    #[tokio::test]
    async fn test_resync_failure_drops_to_offline() {
        let remote = Arc::new(InMemoryRemote::new());
        let mut c = coordinator(remote.clone());
        c.start().await.unwrap();

        remote.set_fail_loads(true);
        assert_eq!(c.resync().await, Ok(SyncState::Offline));
        assert!(c.retry_connection().await.is_ok());
    }

    #[tokio::test]
    async fn test_state_is_published() {
        let mut c = coordinator(Arc::new(InMemoryRemote::new()));
        let mut rx = c.subscribe_state();
        c.start().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SyncState::Online);
    }
}
