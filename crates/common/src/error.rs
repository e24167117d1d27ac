use thiserror::Error;

use crate::ids::{AccountId, NftId, TokenId};

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or unusable operator credentials, collection id, or limits.
    /// Fatal; must be fixed before any issuance can proceed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Operator/treasury balance too low for a transaction fee
    #[error("insufficient funds on account {account}")]
    InsufficientFunds { account: AccountId },

    /// File-storage write failed. Safe to retry the asset build in full;
    /// fresh content ids are allocated on every attempt.
    #[error("asset upload failed: {0}")]
    AssetUpload(String),

    /// The known partial-failure window: a token was minted to the treasury
    /// but never reached the learner. Carries the serial so an operator can
    /// complete the transfer manually. Never retried automatically, since a
    /// blind re-mint would create a duplicate, orphaned token.
    #[error("mint succeeded but transfer of {nft_id} failed: {reason}")]
    MintSucceededTransferFailed { nft_id: NftId, reason: String },

    /// Recipient has not associated their account with the collection token
    #[error("account {account} is not associated with token {token_id}")]
    AssociationRequired {
        account: AccountId,
        token_id: TokenId,
    },

    #[error("ledger error: {0}")]
    Ledger(String),

    #[error("mirror query failed: {0}")]
    Mirror(String),

    #[error("file storage error: {0}")]
    Storage(String),

    #[error("invalid entity id: {0}")]
    InvalidEntityId(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable machine-readable tag, used by the API layer so the UI can
    /// dispatch on the failure class without parsing messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Configuration(_) => "configuration",
            Error::InsufficientFunds { .. } => "insufficient_funds",
            Error::AssetUpload(_) => "asset_upload",
            Error::MintSucceededTransferFailed { .. } => "mint_succeeded_transfer_failed",
            Error::AssociationRequired { .. } => "association_required",
            Error::Ledger(_) => "ledger",
            Error::Mirror(_) => "mirror",
            Error::Storage(_) => "storage",
            Error::InvalidEntityId(_) => "invalid_entity_id",
            Error::Json(_) => "json",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TokenId;

    #[test]
    fn test_kind_tags_are_distinct_for_the_actionable_cases() {
        let assoc = Error::AssociationRequired {
            account: "0.0.5".parse().unwrap(),
            token_id: TokenId::new(0, 0, 9),
        };
        let partial = Error::MintSucceededTransferFailed {
            nft_id: NftId::new(TokenId::new(0, 0, 9), 1),
            reason: "timeout".into(),
        };
        assert_ne!(assoc.kind(), partial.kind());
        assert_eq!(assoc.kind(), "association_required");
    }
}
