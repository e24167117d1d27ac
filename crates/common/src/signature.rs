//! Platform authenticity signature
//!
//! The file-storage network is open: anyone can upload a document that looks
//! like a certificate. The platform signs the canonical document bytes with
//! a secret held only by its backend, so third parties holding the secret's
//! verification side can tell a platform-issued certificate from a lookalike
//! upload.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies certificate documents with HMAC-SHA256
#[derive(Clone)]
pub struct PlatformSigner {
    key: Vec<u8>,
}

impl PlatformSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: secret.as_ref().to_vec(),
        }
    }

    /// Hex-encoded tag over the canonical document bytes
    pub fn sign(&self, canonical_bytes: &[u8]) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length");
        mac.update(canonical_bytes);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Constant-time check of a hex-encoded tag.
    ///
    /// Not exercised by the verification reader (that reader answers
    /// existence, not authenticity); callers holding the secret use this for
    /// the authenticity check.
    pub fn verify(&self, canonical_bytes: &[u8], tag_hex: &str) -> bool {
        let Ok(tag) = hex::decode(tag_hex) else {
            return false;
        };
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length");
        mac.update(canonical_bytes);
        mac.verify_slice(&tag).is_ok()
    }
}

impl std::fmt::Debug for PlatformSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.debug_struct("PlatformSigner").finish_non_exhaustive()
    }
}
