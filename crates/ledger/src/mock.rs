//! In-memory ledger node for development and testing
//!
//! Simulates the consensus node's token semantics without a network:
//! sequential serials, per-account balances with fees debited, and the
//! association precondition enforced exactly where the real ledger enforces
//! it. Also answers mirror-style reads over its own state, so the
//! verification path can run end-to-end against it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use tokio::sync::Mutex;
use tracing::debug;

use certmint_common::{AccountId, Error, NftId, Result, TokenId, TransactionId};

use crate::client::{CollectionSpec, LedgerClient};
use crate::mirror::{MirrorNftInfo, MirrorReader};
use crate::operator::OperatorContext;

// Flat fees, in tinybars. Close enough to testnet reality for balance
// accounting; exact fee math belongs to the real node.
const CREATE_FEE: u64 = 2_000_000_000;
const MINT_FEE: u64 = 100_000_000;
const TRANSFER_FEE: u64 = 10_000_000;
const ASSOCIATE_FEE: u64 = 5_000_000;

#[derive(Debug, Clone)]
struct MintedNft {
    owner: AccountId,
    metadata: Vec<u8>,
}

#[derive(Debug)]
struct Collection {
    treasury: AccountId,
    name: String,
    symbol: String,
    next_serial: u64,
    nfts: HashMap<u64, MintedNft>,
}

#[derive(Debug, Default)]
struct State {
    next_token_num: u64,
    tx_counter: u64,
    collections: HashMap<TokenId, Collection>,
    balances: HashMap<AccountId, u64>,
    associations: HashSet<(AccountId, TokenId)>,
    /// Injected fault: the next transfer fails with this reason
    fail_next_transfer: Option<String>,
}

impl State {
    fn next_transaction_id(&mut self, payer: AccountId) -> TransactionId {
        self.tx_counter += 1;
        TransactionId(format!("{}@1700000000.{:09}", payer, self.tx_counter))
    }

    fn charge(&mut self, account: AccountId, fee: u64) -> Result<()> {
        let balance = self.balances.entry(account).or_insert(0);
        if *balance < fee {
            return Err(Error::InsufficientFunds { account });
        }
        *balance -= fee;
        Ok(())
    }
}

/// Mock consensus node
pub struct MockLedgerNode {
    state: Arc<Mutex<State>>,
}

impl MockLedgerNode {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                next_token_num: 5000,
                ..State::default()
            })),
        }
    }

    /// Credit an account, creating it if unknown
    pub async fn fund_account(&self, account: AccountId, tinybars: u64) {
        let mut state = self.state.lock().await;
        *state.balances.entry(account).or_insert(0) += tinybars;
    }

    /// Make the next transfer fail with a non-association fault
    /// (simulates a network error after a successful mint)
    pub async fn fail_next_transfer(&self, reason: impl Into<String>) {
        self.state.lock().await.fail_next_transfer = Some(reason.into());
    }

    /// Treasury account of a collection, if it exists
    pub async fn collection_treasury(&self, token_id: TokenId) -> Option<AccountId> {
        let state = self.state.lock().await;
        state.collections.get(&token_id).map(|c| c.treasury)
    }
}

impl Default for MockLedgerNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for MockLedgerNode {
    async fn create_nft_collection(
        &self,
        spec: &CollectionSpec,
        operator: &OperatorContext,
    ) -> Result<(TokenId, TransactionId)> {
        let mut state = self.state.lock().await;

        // Atomic: charge first, nothing is created on failure
        state.charge(operator.account, CREATE_FEE)?;

        state.next_token_num += 1;
        let token_id = TokenId::new(0, 0, state.next_token_num);
        state.collections.insert(
            token_id,
            Collection {
                treasury: operator.account,
                name: spec.name.clone(),
                symbol: spec.symbol.clone(),
                next_serial: 1,
                nfts: HashMap::new(),
            },
        );
        // Treasury holds its own token implicitly
        state.associations.insert((operator.account, token_id));

        let tx = state.next_transaction_id(operator.account);
        debug!("Mock ledger: created collection {} ({})", token_id, spec.symbol);
        Ok((token_id, tx))
    }

    async fn mint_nft(
        &self,
        token_id: TokenId,
        metadata: Vec<u8>,
        operator: &OperatorContext,
    ) -> Result<(u64, TransactionId)> {
        if metadata.len() > certmint_common::document::MAX_ONCHAIN_METADATA_BYTES {
            return Err(Error::Ledger("METADATA_TOO_LONG".into()));
        }

        let mut state = self.state.lock().await;
        state.charge(operator.account, MINT_FEE)?;

        let collection = state
            .collections
            .get_mut(&token_id)
            .ok_or_else(|| Error::Ledger(format!("INVALID_TOKEN_ID: {token_id}")))?;

        if collection.treasury != operator.account {
            return Err(Error::Ledger("TOKEN_HAS_NO_SUPPLY_KEY: operator is not treasury".into()));
        }

        let serial = collection.next_serial;
        collection.next_serial += 1;
        let treasury = collection.treasury;
        collection.nfts.insert(serial, MintedNft { owner: treasury, metadata });

        let tx = state.next_transaction_id(operator.account);
        debug!("Mock ledger: minted {}/{}", token_id, serial);
        Ok((serial, tx))
    }

    async fn transfer_nft(
        &self,
        nft_id: NftId,
        from: AccountId,
        to: AccountId,
        operator: &OperatorContext,
    ) -> Result<TransactionId> {
        let mut state = self.state.lock().await;

        if let Some(reason) = state.fail_next_transfer.take() {
            return Err(Error::Ledger(reason));
        }

        if !state.associations.contains(&(to, nft_id.token_id)) {
            return Err(Error::AssociationRequired {
                account: to,
                token_id: nft_id.token_id,
            });
        }

        state.charge(operator.account, TRANSFER_FEE)?;

        let collection = state
            .collections
            .get_mut(&nft_id.token_id)
            .ok_or_else(|| Error::Ledger(format!("INVALID_TOKEN_ID: {}", nft_id.token_id)))?;
        let nft = collection
            .nfts
            .get_mut(&nft_id.serial)
            .ok_or_else(|| Error::Ledger(format!("INVALID_NFT_ID: {nft_id}")))?;

        if nft.owner != from {
            return Err(Error::Ledger(format!(
                "SENDER_DOES_NOT_OWN_NFT_SERIAL: {nft_id} is owned by {}",
                nft.owner
            )));
        }

        nft.owner = to;
        let tx = state.next_transaction_id(operator.account);
        debug!("Mock ledger: transferred {} from {} to {}", nft_id, from, to);
        Ok(tx)
    }

    async fn associate_token(
        &self,
        account: AccountId,
        token_id: TokenId,
    ) -> Result<TransactionId> {
        let mut state = self.state.lock().await;
        state.charge(account, ASSOCIATE_FEE)?;
        state.associations.insert((account, token_id));
        let tx = state.next_transaction_id(account);
        Ok(tx)
    }

    async fn account_balance(&self, account: AccountId) -> Result<u64> {
        let state = self.state.lock().await;
        Ok(state.balances.get(&account).copied().unwrap_or(0))
    }
}

#[async_trait]
impl MirrorReader for MockLedgerNode {
    async fn nft_info(&self, token_id: TokenId, serial: u64) -> Result<Option<MirrorNftInfo>> {
        let state = self.state.lock().await;
        let Some(collection) = state.collections.get(&token_id) else {
            return Ok(None);
        };
        let Some(nft) = collection.nfts.get(&serial) else {
            return Ok(None);
        };
        Ok(Some(MirrorNftInfo {
            token_id,
            serial,
            owner: nft.owner,
            metadata_base64: base64::engine::general_purpose::STANDARD.encode(&nft.metadata),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator() -> OperatorContext {
        OperatorContext::new(
            "0.0.2".parse().unwrap(),
            crate::OperatorKey::parse(
                "91132178e72057a1d7528025956fe39b0b847f200ab59b2fdd367017f3087137",
            )
            .unwrap(),
        )
    }

    fn spec() -> CollectionSpec {
        CollectionSpec {
            name: "Web3versity Certificates".into(),
            symbol: "W3VC".into(),
            max_fee_tinybars: 5_000_000_000,
        }
    }

    #[tokio::test]
    async fn test_create_requires_funds() {
        let node = MockLedgerNode::new();
        let err = node.create_nft_collection(&spec(), &operator()).await.unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds { .. }));

        node.fund_account(operator().account, 10 * CREATE_FEE).await;
        assert!(node.create_nft_collection(&spec(), &operator()).await.is_ok());
    }

    #[tokio::test]
    async fn test_serials_are_sequential() {
        let node = MockLedgerNode::new();
        let op = operator();
        node.fund_account(op.account, 100 * CREATE_FEE).await;
        let (token, _) = node.create_nft_collection(&spec(), &op).await.unwrap();

        let (s1, _) = node.mint_nft(token, b"{}".to_vec(), &op).await.unwrap();
        let (s2, _) = node.mint_nft(token, b"{}".to_vec(), &op).await.unwrap();
        assert_eq!((s1, s2), (1, 2));
    }

    #[tokio::test]
    async fn test_transfer_to_unassociated_account_fails() {
        let node = MockLedgerNode::new();
        let op = operator();
        node.fund_account(op.account, 100 * CREATE_FEE).await;
        let (token, _) = node.create_nft_collection(&spec(), &op).await.unwrap();
        let (serial, _) = node.mint_nft(token, b"{}".to_vec(), &op).await.unwrap();

        let learner: AccountId = "0.0.1001".parse().unwrap();
        let err = node
            .transfer_nft(NftId::new(token, serial), op.account, learner, &op)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AssociationRequired { .. }));

        // Owner stays treasury until association and a manual transfer
        let info = node.nft_info(token, serial).await.unwrap().unwrap();
        assert_eq!(info.owner, op.account);

        node.fund_account(learner, ASSOCIATE_FEE).await;
        node.associate_token(learner, token).await.unwrap();
        node.transfer_nft(NftId::new(token, serial), op.account, learner, &op)
            .await
            .unwrap();
        let info = node.nft_info(token, serial).await.unwrap().unwrap();
        assert_eq!(info.owner, learner);
    }

    #[tokio::test]
    async fn test_oversized_metadata_rejected() {
        let node = MockLedgerNode::new();
        let op = operator();
        node.fund_account(op.account, 100 * CREATE_FEE).await;
        let (token, _) = node.create_nft_collection(&spec(), &op).await.unwrap();
        let err = node.mint_nft(token, vec![0u8; 200], &op).await.unwrap_err();
        assert!(matches!(err, Error::Ledger(_)));
    }

    #[tokio::test]
    async fn test_mirror_view_not_found() {
        let node = MockLedgerNode::new();
        let info = node.nft_info(TokenId::new(0, 0, 1), 1).await.unwrap();
        assert!(info.is_none());
    }
}
