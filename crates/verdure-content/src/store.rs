use opendal::services::{Fs, Memory};
use opendal::Operator;
use tracing::debug;

use crate::error::ContentError;

/// Backend-agnostic blob store for plant photos, powered by Apache OpenDAL.
///
/// The journal only ever holds the path-like keys; the bytes live here.
pub struct ContentStore {
    op: Operator,
}

impl ContentStore {
    /// Store backed by the local filesystem.
    pub fn new_fs(root_path: &str) -> Result<Self, ContentError> {
        let mut builder = Fs::default();
        builder.root(root_path);
        let op = Operator::new(builder)?.finish();
        Ok(Self { op })
    }

    /// Store backed by in-memory storage (for tests).
    pub fn new_memory() -> Result<Self, ContentError> {
        let op = Operator::new(Memory::default())?.finish();
        Ok(Self { op })
    }

    /// Store from any OpenDAL Operator.
    pub fn from_operator(op: Operator) -> Self {
        Self { op }
    }

    /// Write a blob under `key`, replacing any previous content.
    pub async fn put(&self, key: &str, data: &[u8]) -> Result<(), ContentError> {
        self.op.write(key, data.to_vec()).await?;
        debug!(key, bytes = data.len(), "artifact stored");
        Ok(())
    }

    /// Read the blob under `key`.
    pub async fn get(&self, key: &str) -> Result<Vec<u8>, ContentError> {
        let data = self.op.read(key).await?;
        Ok(data.to_vec())
    }

    pub async fn exists(&self, key: &str) -> Result<bool, ContentError> {
        Ok(self.op.is_exist(key).await?)
    }

    pub async fn delete(&self, key: &str) -> Result<(), ContentError> {
        self.op.delete(key).await?;
        Ok(())
    }
}
