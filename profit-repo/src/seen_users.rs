//! Greeting store persisted as a JSON array of user ids.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use profit_types::{SeenUsersStore, StoreError, UserId};

/// Set of greeted users, mirrored to a file on every change.
///
/// A missing or unreadable file starts an empty set. Failing to write the
/// file is logged and otherwise ignored: the worst case is greeting a user
/// twice after a restart.
pub struct JsonSeenUsersStore {
    path: PathBuf,
    users: Mutex<HashSet<UserId>>,
}

impl JsonSeenUsersStore {
    /// Opens the store, loading any users already recorded at `path`.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let users = load(&path).await;
        tracing::debug!(path = %path.display(), count = users.len(), "Loaded seen users");
        Self {
            path,
            users: Mutex::new(users),
        }
    }

    /// Number of users recorded.
    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.lock().await.is_empty()
    }

    async fn save(&self, users: &HashSet<UserId>) -> Result<(), StoreError> {
        let mut sorted: Vec<UserId> = users.iter().copied().collect();
        sorted.sort();
        let json =
            serde_json::to_vec(&sorted).map_err(|e| StoreError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }
}

async fn load(path: &Path) -> HashSet<UserId> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return HashSet::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Cannot read seen users file");
            return HashSet::new();
        }
    };

    match serde_json::from_str::<Vec<UserId>>(&raw) {
        Ok(users) => users.into_iter().collect(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed seen users file");
            HashSet::new()
        }
    }
}

#[async_trait]
impl SeenUsersStore for JsonSeenUsersStore {
    async fn mark_seen(&self, user_id: UserId) -> Result<bool, StoreError> {
        let mut users = self.users.lock().await;
        if !users.insert(user_id) {
            return Ok(false);
        }

        match self.save(&users).await {
            Ok(()) => {}
            Err(StoreError::Io(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist seen users");
            }
            Err(e) => return Err(e),
        }
        Ok(true)
    }
}
