use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::AccountId;

/// Facts about a course completion, supplied by the platform when a learner
/// finishes a course.
///
/// This subsystem does not persist requests; idempotency on
/// `certificate_number` (not re-requesting the same number) is the caller's
/// responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateRequest {
    /// Platform course identifier
    pub course_id: String,

    /// Human-readable course title, printed on the certificate
    pub course_name: String,

    /// Learner display name, printed on the certificate
    pub learner_name: String,

    /// Ledger account the certificate token will be delivered to
    pub learner_account: AccountId,

    /// Date the course was completed
    pub completion_date: NaiveDate,

    /// Unique human-readable certificate number (e.g. `WEB3V-2025-00042`).
    /// Doubles as the public lookup key embedded in the certificate's
    /// verification URL.
    pub certificate_number: String,
}

impl CertificateRequest {
    /// Reject requests that would render an empty or unverifiable certificate
    pub fn validate(&self) -> Result<()> {
        let require = |field: &str, value: &str| {
            if value.trim().is_empty() {
                Err(Error::Configuration(format!(
                    "certificate request field `{field}` is empty"
                )))
            } else {
                Ok(())
            }
        };

        require("course_id", &self.course_id)?;
        require("course_name", &self.course_name)?;
        require("learner_name", &self.learner_name)?;
        require("certificate_number", &self.certificate_number)?;
        Ok(())
    }
}
