use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use certmint_common::{ContentId, Error, Result};

use crate::FileStore;

/// Client for the hosted storage service: uploads through its API, reads
/// through its public gateway.
pub struct HttpFileStore {
    api_url: String,
    gateway_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    cid: String,
}

impl HttpFileStore {
    pub fn new(api_url: impl Into<String>, gateway_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            gateway_url: gateway_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl FileStore for HttpFileStore {
    async fn put(&self, bytes: Vec<u8>, content_type: &str) -> Result<ContentId> {
        let url = format!("{}/upload", self.api_url);

        debug!("Uploading {} bytes ({}) to {}", bytes.len(), content_type, url);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| Error::AssetUpload(format!("upload request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::AssetUpload(format!(
                "storage service returned status {}",
                response.status()
            )));
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| Error::AssetUpload(format!("failed to parse upload response: {e}")))?;

        if upload.cid.is_empty() {
            return Err(Error::AssetUpload("storage service returned an empty content id".into()));
        }

        Ok(ContentId(upload.cid))
    }

    async fn fetch(&self, id: &ContentId) -> Result<Option<Vec<u8>>> {
        let url = format!("{}/{}", self.gateway_url, id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("gateway request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Error::Storage(format!(
                "gateway returned status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Storage(format!("failed to read gateway body: {e}")))?;

        Ok(Some(bytes.to_vec()))
    }
}
