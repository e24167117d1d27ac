//! Public mirror node reads
//!
//! The mirror API is credential-free and read-only; the verification path
//! depends on nothing else. Not-found is a domain answer (`Ok(None)`), not
//! an error; errors are reserved for transport faults.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use certmint_common::{AccountId, Error, Result, TokenId};

/// Ownership and raw metadata for one NFT, as reported by the mirror
#[derive(Debug, Clone)]
pub struct MirrorNftInfo {
    pub token_id: TokenId,
    pub serial: u64,
    pub owner: AccountId,
    /// On-chain metadata bytes, base64-encoded as the mirror returns them
    pub metadata_base64: String,
}

#[async_trait]
pub trait MirrorReader: Send + Sync {
    async fn nft_info(&self, token_id: TokenId, serial: u64) -> Result<Option<MirrorNftInfo>>;
}

/// REST mirror client (`/api/v1/tokens/{token}/nfts/{serial}`)
pub struct RestMirrorClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct NftInfoResponse {
    account_id: String,
    metadata: String,
}

impl RestMirrorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn nft_info_url(&self, token_id: TokenId, serial: u64) -> String {
        format!(
            "{}/api/v1/tokens/{}/nfts/{}",
            self.base_url, token_id, serial
        )
    }
}

#[async_trait]
impl MirrorReader for RestMirrorClient {
    async fn nft_info(&self, token_id: TokenId, serial: u64) -> Result<Option<MirrorNftInfo>> {
        let url = self.nft_info_url(token_id, serial);

        debug!("Fetching NFT info from mirror: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Mirror(format!("mirror request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Error::Mirror(format!(
                "mirror returned status {}",
                response.status()
            )));
        }

        let info: NftInfoResponse = response
            .json()
            .await
            .map_err(|e| Error::Mirror(format!("failed to parse mirror response: {e}")))?;

        let owner: AccountId = info
            .account_id
            .parse()
            .map_err(|_| Error::Mirror(format!("mirror returned bad account id: {}", info.account_id)))?;

        Ok(Some(MirrorNftInfo {
            token_id,
            serial,
            owner,
            metadata_base64: info.metadata,
        }))
    }
}
