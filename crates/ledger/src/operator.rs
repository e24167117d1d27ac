//! Operator (treasury) credentials
//!
//! The operator account and its key are the one credential shared across
//! all issuances. They are passed explicitly into every pipeline call as an
//! [`OperatorContext`] rather than read from ambient state, so tests and
//! multiple environments can inject their own.

use certmint_common::{AccountId, Error, Result};

// DER prefixes for the two private-key encodings operators supply.
// Hedera tooling exports either, so parsing tries one and falls back to
// the other instead of making the caller declare the scheme.
const ED25519_DER_PREFIX: &str = "302e020100300506032b657004220420";
const ECDSA_DER_PREFIX: &str = "3030020100300706052b8104000a04220420";

/// A classified operator private key.
///
/// Classification only: the bytes are handed to the consensus-node SDK
/// behind [`crate::LedgerClient`], which owns actual signing.
#[derive(Clone, PartialEq, Eq)]
pub enum OperatorKey {
    EcdsaSecp256k1(Vec<u8>),
    Ed25519(Vec<u8>),
}

impl OperatorKey {
    /// Parse a hex-encoded private key, trying the ECDSA encoding first and
    /// falling back to ed25519.
    ///
    /// Accepts DER-wrapped hex (scheme is unambiguous) or a raw 32-byte
    /// scalar (classified as ed25519, the fallback scheme).
    pub fn parse(s: &str) -> Result<Self> {
        let cleaned = s.trim().trim_start_matches("0x").to_lowercase();

        if let Some(raw) = cleaned.strip_prefix(ECDSA_DER_PREFIX) {
            return Self::decode_scalar(raw, OperatorKey::EcdsaSecp256k1);
        }
        if let Some(raw) = cleaned.strip_prefix(ED25519_DER_PREFIX) {
            return Self::decode_scalar(raw, OperatorKey::Ed25519);
        }

        // Raw scalar, no DER envelope
        Self::decode_scalar(&cleaned, OperatorKey::Ed25519)
    }

    fn decode_scalar(hex_str: &str, wrap: fn(Vec<u8>) -> Self) -> Result<Self> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| Error::Configuration(format!("operator key is not valid hex: {e}")))?;
        if bytes.len() != 32 {
            return Err(Error::Configuration(format!(
                "operator key scalar is {} bytes, expected 32",
                bytes.len()
            )));
        }
        if bytes.iter().all(|b| *b == 0) {
            return Err(Error::Configuration("operator key scalar is zero".into()));
        }
        Ok(wrap(bytes))
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            OperatorKey::EcdsaSecp256k1(_) => "ecdsa-secp256k1",
            OperatorKey::Ed25519(_) => "ed25519",
        }
    }
}

impl std::fmt::Debug for OperatorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of logs
        write!(f, "OperatorKey({})", self.scheme())
    }
}

/// The treasury account and its signing key, injected into pipeline calls
#[derive(Debug, Clone)]
pub struct OperatorContext {
    pub account: AccountId,
    pub key: OperatorKey,
}

impl OperatorContext {
    pub fn new(account: AccountId, key: OperatorKey) -> Self {
        Self { account, key }
    }
}
