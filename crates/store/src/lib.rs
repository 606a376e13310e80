pub mod error;

use error::{Error, Result};
use std::{io::ErrorKind, path::PathBuf};
use tokio::sync::Mutex;

pub use model::Snapshot;

/// Key under which a session snapshot is stored by default.
pub const STATE_KEY: &str = "quiz.state.v1";

/// Persistence gateway for a single session snapshot.
///
/// Persistence is best-effort: callers log failures and carry on.
#[allow(async_fn_in_trait)]
pub trait Store {
    /// Replaces any previously saved snapshot.
    async fn save(&self, snapshot: &Snapshot) -> Result<()>;
    /// Retrieves the last saved snapshot. Missing and corrupt snapshots both yield `None`.
    async fn load(&self) -> Option<Snapshot>;
    /// Removes the saved snapshot, if any.
    async fn clear(&self) -> Result<()>;
}

fn decode(bytes: &[u8]) -> Option<Snapshot> {
    match serde_json::from_slice(bytes) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            log::warn!("ignoring saved session: {}", Error::from(err));
            None
        }
    }
}

fn encode(snapshot: &Snapshot) -> Result<Vec<u8>> {
    serde_json::to_vec(snapshot).map_err(|_| Error::Encode)
}

/// Stores the snapshot as a JSON file.
pub struct FileStore(PathBuf);

impl From<PathBuf> for FileStore {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self(PathBuf::from(format!("{STATE_KEY}.json")))
    }
}

impl FileStore {
    pub fn path(&self) -> &std::path::Path {
        &self.0
    }
}

impl Store for FileStore {
    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let bytes = encode(snapshot)?;

        // Write to a sibling first so that a crash never leaves a half-written snapshot behind.
        let mut staging = self.0.clone().into_os_string();
        staging.push(".tmp");
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &self.0).await?;

        log::debug!("saved session to {}", self.0.display());
        Ok(())
    }

    async fn load(&self) -> Option<Snapshot> {
        let bytes = match tokio::fs::read(&self.0).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("no saved session at {}", self.0.display());
                return None;
            }
            Err(err) => {
                log::warn!("cannot read saved session at {}: {err}", self.0.display());
                return None;
            }
        };
        decode(&bytes)
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.0).await {
            Ok(()) => {
                log::debug!("cleared session at {}", self.0.display());
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Keeps the encoded snapshot in memory. Handy for ephemeral sessions and tests.
#[derive(Default)]
pub struct MemoryStore(Mutex<Option<Vec<u8>>>);

impl Store for MemoryStore {
    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let bytes = encode(snapshot)?;
        *self.0.lock().await = Some(bytes);
        Ok(())
    }

    async fn load(&self) -> Option<Snapshot> {
        let guard = self.0.lock().await;
        decode(guard.as_deref()?)
    }

    async fn clear(&self) -> Result<()> {
        self.0.lock().await.take();
        Ok(())
    }
}
