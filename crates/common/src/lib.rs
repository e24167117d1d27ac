pub mod document;
pub mod error;
pub mod ids;
pub mod request;
pub mod signature;

pub use document::{CertificateAssetPackage, CertificateDocument, IssuedCertificate, OnChainPointer, VerificationResult};
pub use error::{Error, Result};
pub use ids::{AccountId, ContentId, NftId, TokenId, TransactionId};
pub use request::CertificateRequest;
pub use signature::PlatformSigner;
