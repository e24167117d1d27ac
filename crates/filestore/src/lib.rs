//! Content-addressed file storage
//!
//! Certificate assets live in an append-only storage network, addressed by
//! opaque content ids the service assigns. Writes go through the service
//! API; reads go through its public gateway, credential-free, which is what
//! lets the verification path run without platform secrets.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use certmint_common::{ContentId, Result};

pub use http::HttpFileStore;
pub use memory::MemoryFileStore;

#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store bytes, returning the service-assigned content id.
    /// Failures surface as `AssetUpload`; a retry allocates fresh ids, so
    /// no partial state survives a failed attempt.
    async fn put(&self, bytes: Vec<u8>, content_type: &str) -> Result<ContentId>;

    /// Fetch previously stored bytes through the public read path.
    /// `Ok(None)` for unknown ids; errors only for transport faults.
    async fn fetch(&self, id: &ContentId) -> Result<Option<Vec<u8>>>;
}
