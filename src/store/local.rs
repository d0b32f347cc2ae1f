use std::{fmt::Debug, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::core::user::UserRecord;

/// Storage interface for the local user list.
///
/// The whole ordered list lives under a single slot: the store reads it,
/// mutates it, and overwrites it. That read-modify-write is not atomic across
/// concurrent callers; the crate accepts the resulting race at its scale.
#[async_trait]
pub trait UserStore: Debug {
    /// Load the full record list. An uninitialized store loads as empty.
    async fn load(&self) -> Result<Vec<UserRecord>>;

    /// Overwrite the full record list.
    async fn save(&self, users: Vec<UserRecord>) -> Result<()>;
}

/// A local in-memory store. Records do not survive the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    store: Arc<Mutex<Vec<UserRecord>>>,
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn load(&self) -> Result<Vec<UserRecord>> {
        Ok(self.store.try_lock()?.clone())
    }

    async fn save(&self, users: Vec<UserRecord>) -> Result<()> {
        *self.store.try_lock()? = users;

        Ok(())
    }
}

/// A file-backed store: one JSON array of records in one file.
///
/// No schema version and no migration path; a missing or empty file loads as
/// the empty list, so first use initializes the store implicitly.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl UserStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<UserRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e).context("unable to read the user store file"),
        };

        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).context("user store file is not a valid record list")
    }

    async fn save(&self, users: Vec<UserRecord>) -> Result<()> {
        let json = serde_json::to_vec(&users).context("unable to serialize user records")?;

        tokio::fs::write(&self.path, json)
            .await
            .context("unable to write the user store file")
    }
}
