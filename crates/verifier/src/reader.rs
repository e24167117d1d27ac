use std::sync::Arc;

use base64::Engine;
use tracing::debug;

use certmint_common::{
    CertificateDocument, OnChainPointer, Result, TokenId, VerificationResult,
};
use certmint_filestore::FileStore;
use certmint_ledger::MirrorReader;

/// Reads a certificate back from ledger and storage truth.
///
/// Every expected miss (never minted, malformed metadata, missing document)
/// is an answer, not an error: the result carries `valid: false` and a
/// diagnostic reason. `Err` is reserved for transport faults, where the
/// caller cannot know either way and should retry.
pub struct CertificateVerifier {
    mirror: Arc<dyn MirrorReader>,
    store: Arc<dyn FileStore>,
}

impl CertificateVerifier {
    pub fn new(mirror: Arc<dyn MirrorReader>, store: Arc<dyn FileStore>) -> Self {
        Self { mirror, store }
    }

    /// Verify one certificate token.
    ///
    /// Authenticity (the platform signature inside the document) is a
    /// separate trust boundary and is deliberately not checked here;
    /// callers holding the signing secret validate it themselves.
    pub async fn verify(&self, token_id: TokenId, serial: u64) -> Result<VerificationResult> {
        let Some(info) = self.mirror.nft_info(token_id, serial).await? else {
            debug!("Verification miss: {}/{} not on ledger", token_id, serial);
            return Ok(VerificationResult::invalid(
                "token or serial not found on ledger",
            ));
        };

        let metadata_bytes = match base64::engine::general_purpose::STANDARD
            .decode(info.metadata_base64.trim())
        {
            Ok(bytes) => bytes,
            Err(_) => {
                return Ok(VerificationResult::invalid(
                    "on-chain metadata is not valid base64",
                ))
            }
        };

        let pointer = match OnChainPointer::from_onchain_bytes(&metadata_bytes) {
            Ok(pointer) => pointer,
            Err(_) => {
                return Ok(VerificationResult::invalid(
                    "on-chain metadata is not a certificate pointer",
                ))
            }
        };

        let Some(document_bytes) = self.store.fetch(pointer.metadata()).await? else {
            return Ok(VerificationResult::invalid(
                "certificate document not found in storage",
            ));
        };

        let document: CertificateDocument = match serde_json::from_slice(&document_bytes) {
            Ok(document) => document,
            Err(_) => {
                return Ok(VerificationResult::invalid(
                    "certificate document is malformed",
                ))
            }
        };

        debug!(
            "Verified {}/{}: certificate {} owned by {}",
            token_id, serial, document.certificate_number, info.owner
        );

        Ok(VerificationResult::valid(info.owner, pointer, document))
    }
}
