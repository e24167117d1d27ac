//! Request and response models for the certificate API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use certmint_common::{AccountId, CertificateRequest, Error, IssuedCertificate, Result};

/// Body of `POST /api/certificates`
#[derive(Debug, Deserialize)]
pub struct IssueCertificateRequest {
    pub course_id: String,
    pub course_name: String,
    pub learner_name: String,
    /// Learner's ledger account (`0.0.x`)
    pub learner_account: String,
    pub completion_date: NaiveDate,
    pub certificate_number: String,
    /// Delivery account; defaults to the learner account
    #[serde(default)]
    pub recipient_account: Option<String>,
}

impl IssueCertificateRequest {
    /// Split into the pipeline's request plus the delivery account
    pub fn into_parts(self) -> Result<(CertificateRequest, AccountId)> {
        let learner_account: AccountId = self.learner_account.parse()?;
        let recipient = match self.recipient_account {
            Some(s) => s.parse()?,
            None => learner_account,
        };
        Ok((
            CertificateRequest {
                course_id: self.course_id,
                course_name: self.course_name,
                learner_name: self.learner_name,
                learner_account,
                completion_date: self.completion_date,
                certificate_number: self.certificate_number,
            },
            recipient,
        ))
    }
}

/// Body of a successful issuance
#[derive(Debug, Serialize)]
pub struct IssueCertificateResponse {
    pub success: bool,
    pub certificate: IssuedCertificate,
}

/// Body of a successful collection registration
#[derive(Debug, Serialize)]
pub struct RegisterCollectionResponse {
    pub success: bool,
    pub token_id: String,
    pub transaction_id: String,
    /// Operators must persist the token id into configuration; there is no
    /// way to rediscover it from the ledger later.
    pub note: String,
}

/// Structured error body; `kind` lets the UI distinguish the retryable
/// case, the association-required case, and the stuck partial mint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<u64>,
}

impl ErrorBody {
    pub fn from_error(err: &Error) -> Self {
        let serial = match err {
            Error::MintSucceededTransferFailed { nft_id, .. } => Some(nft_id.serial),
            _ => None,
        };
        Self {
            error: err.to_string(),
            kind: err.kind(),
            serial,
        }
    }
}
