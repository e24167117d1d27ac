use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::{AccountId, ContentId, NftId, TokenId, TransactionId};
use crate::request::CertificateRequest;

/// The ledger rejects NFT metadata above this size, which is why the
/// on-chain record is a pointer and never the certificate payload.
pub const MAX_ONCHAIN_METADATA_BYTES: usize = 100;

/// The canonical certificate metadata document persisted to file storage.
///
/// This is the document a verifier dereferences; its fields must round-trip
/// exactly against the originating [`CertificateRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateDocument {
    pub certificate_number: String,
    pub course_id: String,
    pub course_name: String,
    pub learner_name: String,
    pub completion_date: NaiveDate,

    /// When the platform issued (built and signed) this document
    pub issued_at: DateTime<Utc>,

    /// Content id of the rendered certificate image
    pub image: ContentId,

    /// Public verification URL, keyed by certificate number. The serial is
    /// not known when the document is built; the caller's index resolves
    /// certificate number to (token, serial).
    pub verify_url: String,

    /// Keyed digest over the canonical bytes of this document, proving the
    /// platform produced it. `None` only while the document is being signed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_signature: Option<String>,
}

impl CertificateDocument {
    pub fn new(
        request: &CertificateRequest,
        image: ContentId,
        verify_url: String,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            certificate_number: request.certificate_number.clone(),
            course_id: request.course_id.clone(),
            course_name: request.course_name.clone(),
            learner_name: request.learner_name.clone(),
            completion_date: request.completion_date,
            issued_at,
            image,
            verify_url,
            platform_signature: None,
        }
    }

    /// The bytes the platform signature is computed over: the JSON form of
    /// this document with the signature field absent, keys in declaration
    /// order. Signing and verification must agree on this exact form.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        let mut unsigned = self.clone();
        unsigned.platform_signature = None;
        Ok(serde_json::to_vec(&unsigned)?)
    }
}

/// The minimal pointer minted into the token's on-chain metadata: the two
/// content ids, nothing else. Compact keys keep the serialized form inside
/// the ledger's metadata ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnChainPointer {
    /// Certificate image content id
    pub i: ContentId,
    /// Certificate metadata document content id
    pub m: ContentId,
}

impl OnChainPointer {
    pub fn new(image: ContentId, metadata: ContentId) -> Self {
        Self { i: image, m: metadata }
    }

    pub fn image(&self) -> &ContentId {
        &self.i
    }

    pub fn metadata(&self) -> &ContentId {
        &self.m
    }

    /// Serialize for minting, enforcing the on-chain size ceiling up front
    /// so an oversized pointer fails before any transaction is submitted.
    pub fn to_onchain_bytes(&self) -> Result<Vec<u8>> {
        let bytes = serde_json::to_vec(self)?;
        if bytes.len() > MAX_ONCHAIN_METADATA_BYTES {
            return Err(Error::Configuration(format!(
                "on-chain pointer is {} bytes, ceiling is {} (content ids too long)",
                bytes.len(),
                MAX_ONCHAIN_METADATA_BYTES
            )));
        }
        Ok(bytes)
    }

    pub fn from_onchain_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Output of the asset builder: both files stored, document signed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateAssetPackage {
    pub image_file_id: ContentId,
    pub metadata_file_id: ContentId,
    pub platform_signature: String,
}

/// A fully issued certificate: minted, transferred, and explorable.
/// Never constructed partially populated; failures surface as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedCertificate {
    pub token_id: TokenId,
    pub serial: u64,
    pub owner: AccountId,
    pub image_file_id: ContentId,
    pub metadata_file_id: ContentId,
    pub mint_transaction_id: TransactionId,
    pub transfer_transaction_id: TransactionId,
    pub explorer_url: String,
}

impl IssuedCertificate {
    pub fn nft_id(&self) -> NftId {
        NftId::new(self.token_id, self.serial)
    }
}

/// Outcome of a verification read. Recomputed from ledger and storage truth
/// on every call; expected "not found" conditions land here as
/// `valid: false`, never as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<AccountId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_chain_metadata: Option<OnChainPointer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateDocument>,

    /// Diagnostic reason when `valid` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl VerificationResult {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            owner: None,
            on_chain_metadata: None,
            certificate: None,
            reason: Some(reason.into()),
        }
    }

    pub fn valid(
        owner: AccountId,
        pointer: OnChainPointer,
        certificate: CertificateDocument,
    ) -> Self {
        Self {
            valid: true,
            owner: Some(owner),
            on_chain_metadata: Some(pointer),
            certificate: Some(certificate),
            reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_roundtrip() {
        let pointer = OnChainPointer::new(
            ContentId("f1a2b3c4d5e6f7a8b9c0".into()),
            ContentId("a0b1c2d3e4f5a6b7c8d9".into()),
        );
        let bytes = pointer.to_onchain_bytes().unwrap();
        assert!(bytes.len() <= MAX_ONCHAIN_METADATA_BYTES);
        let back = OnChainPointer::from_onchain_bytes(&bytes).unwrap();
        assert_eq!(back, pointer);
    }

    #[test]
    fn test_oversized_pointer_rejected_before_mint() {
        let long = "c".repeat(120);
        let pointer = OnChainPointer::new(ContentId(long.clone()), ContentId(long));
        assert!(pointer.to_onchain_bytes().is_err());
    }

    #[test]
    fn test_canonical_bytes_exclude_signature() {
        let request = crate::request::CertificateRequest {
            course_id: "c1".into(),
            course_name: "Course".into(),
            learner_name: "Learner".into(),
            learner_account: "0.0.7".parse().unwrap(),
            completion_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            certificate_number: "N-1".into(),
        };
        let mut doc = CertificateDocument::new(
            &request,
            ContentId("img".into()),
            "https://example.org/verify/N-1".into(),
            Utc::now(),
        );
        let unsigned = doc.canonical_bytes().unwrap();
        doc.platform_signature = Some("aabbcc".into());
        let signed = doc.canonical_bytes().unwrap();
        assert_eq!(unsigned, signed);
    }
}
