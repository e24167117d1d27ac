use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use certmint_common::{ContentId, Result};

use crate::FileStore;

/// In-memory content-addressed store for tests and mock deployments.
///
/// Ids are truncated sha256 digests: genuinely content-addressed, and short
/// enough that an on-chain pointer carrying two of them stays inside the
/// ledger metadata ceiling, like the entity-style file ids the hosted
/// service assigns.
pub struct MemoryFileStore {
    files: Arc<Mutex<HashMap<ContentId, Vec<u8>>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn address(bytes: &[u8]) -> ContentId {
        let digest = Sha256::digest(bytes);
        ContentId(format!("f{}", hex::encode(&digest[..10])))
    }
}

impl Default for MemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn put(&self, bytes: Vec<u8>, _content_type: &str) -> Result<ContentId> {
        let id = Self::address(&bytes);
        self.files.lock().await.insert(id.clone(), bytes);
        Ok(id)
    }

    async fn fetch(&self, id: &ContentId) -> Result<Option<Vec<u8>>> {
        Ok(self.files.lock().await.get(id).cloned())
    }
}
