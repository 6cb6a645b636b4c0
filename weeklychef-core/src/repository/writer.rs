use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use uuid::Uuid;

use super::RepositoryStatus;
use crate::models::{Ingredient, Recipe, UserPreferences};
use crate::remote::{RemoteClient, RemoteError, Session};

#[derive(Debug)]
pub(crate) enum RemoteWrite {
    SaveIngredient(Ingredient),
    DeleteIngredient(Uuid),
    SaveRecipe(Recipe),
    SavePreferences(UserPreferences),
}

impl RemoteWrite {
    fn describe(&self) -> String {
        match self {
            RemoteWrite::SaveIngredient(i) => format!("save ingredient {}", i.id()),
            RemoteWrite::DeleteIngredient(id) => format!("delete ingredient {}", id),
            RemoteWrite::SaveRecipe(r) => format!("save recipe {}", r.id),
            RemoteWrite::SavePreferences(_) => "save preferences".to_string(),
        }
    }
}

enum Job {
    Write(Session, RemoteWrite),
    Flush(oneshot::Sender<()>),
}

/// Background task that applies best-effort remote writes one at a time.
///
/// Jobs run in submission order with a single attempt each. A failure is
/// written to the shared error slot and the job is dropped.
#[derive(Debug, Clone)]
pub(crate) struct RemoteWriter {
    tx: mpsc::UnboundedSender<Job>,
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Job::Write(_, write) => write!(f, "Write({})", write.describe()),
            Job::Flush(_) => write!(f, "Flush"),
        }
    }
}

impl RemoteWriter {
    /// Must be called from within a Tokio runtime.
    pub(crate) fn spawn(
        remote: Arc<dyn RemoteClient>,
        status: Arc<watch::Sender<RepositoryStatus>>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(remote, status, rx));
        Self { tx }
    }

    pub(crate) fn submit(&self, session: Session, write: RemoteWrite) {
        if let Err(e) = self.tx.send(Job::Write(session, write)) {
            tracing::warn!("Remote writer stopped, dropping {:?}", e.0);
        }
    }

    /// Resolves once every write submitted before this call has been attempted.
    pub(crate) async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Job::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }
}

async fn run(
    remote: Arc<dyn RemoteClient>,
    status: Arc<watch::Sender<RepositoryStatus>>,
    mut rx: mpsc::UnboundedReceiver<Job>,
) {
    while let Some(job) = rx.recv().await {
        match job {
            Job::Write(session, write) => {
                let description = write.describe();
                match apply(remote.as_ref(), &session, write).await {
                    Ok(()) => tracing::debug!("Remote write ok: {}", description),
                    Err(e) => {
                        tracing::warn!("Remote write failed ({}): {}", description, e);
                        status.send_modify(|s| s.error = Some(e.to_string()));
                    }
                }
            }
            Job::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}

async fn apply(
    remote: &dyn RemoteClient,
    session: &Session,
    write: RemoteWrite,
) -> Result<(), RemoteError> {
    match write {
        RemoteWrite::SaveIngredient(ingredient) => {
            remote.save_ingredient(session, &ingredient).await
        }
        RemoteWrite::DeleteIngredient(id) => remote.delete_ingredient(session, id).await,
        RemoteWrite::SaveRecipe(recipe) => remote.save_recipe(session, &recipe).await,
        RemoteWrite::SavePreferences(preferences) => {
            remote.save_preferences(session, &preferences).await
        }
    }
}
