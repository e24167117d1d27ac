use async_trait::async_trait;
use certmint_common::{AccountId, NftId, Result, TokenId, TransactionId};

use crate::operator::OperatorContext;

/// Parameters for the one-time collection creation transaction
#[derive(Debug, Clone)]
pub struct CollectionSpec {
    pub name: String,
    pub symbol: String,
    /// Upper bound on the fee the operator is willing to pay, in tinybars
    pub max_fee_tinybars: u64,
}

/// The seam to the consensus node.
///
/// Real deployments wire in an adapter over the vendored ledger SDK; tests
/// and mock mode use [`crate::MockLedgerNode`]. The ledger serializes
/// transaction submission per account, so concurrent issuances need no
/// locking around the shared operator credential.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Create a non-fungible collection: zero decimals, unlimited supply,
    /// treasury and supply key taken from the operator. Atomic; failure
    /// creates nothing.
    async fn create_nft_collection(
        &self,
        spec: &CollectionSpec,
        operator: &OperatorContext,
    ) -> Result<(TokenId, TransactionId)>;

    /// Mint one token unit carrying `metadata` as its on-chain bytes.
    /// Returns the ledger-assigned serial; serials are sequential and not
    /// predictable in advance.
    async fn mint_nft(
        &self,
        token_id: TokenId,
        metadata: Vec<u8>,
        operator: &OperatorContext,
    ) -> Result<(u64, TransactionId)>;

    /// Transfer one specific serial from `from` to `to`. Fails with
    /// `AssociationRequired` if the recipient has not opted in to the token.
    async fn transfer_nft(
        &self,
        nft_id: NftId,
        from: AccountId,
        to: AccountId,
        operator: &OperatorContext,
    ) -> Result<TransactionId>;

    /// Associate an account with a token type so it can receive units.
    /// Signed by the recipient in real deployments; exposed here so mock
    /// flows and tests can exercise the association precondition.
    async fn associate_token(&self, account: AccountId, token_id: TokenId)
        -> Result<TransactionId>;

    /// Current balance of an account, in tinybars
    async fn account_balance(&self, account: AccountId) -> Result<u64>;
}
