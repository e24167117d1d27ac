//! Minting coordinator
//!
//! Mint, then transfer, strictly in that order: the transfer must name the
//! exact serial the ledger assigned at mint, and serials are not
//! predictable in advance. A transfer failure after a successful mint
//! leaves the token with the treasury; that state is reported, never
//! silently retried, because a blind re-mint would create a duplicate,
//! orphaned token.

use tracing::{info, warn};

use certmint_common::{
    AccountId, CertificateAssetPackage, Error, NftId, OnChainPointer, Result, TokenId,
    TransactionId,
};
use certmint_ledger::{LedgerClient, OperatorContext};

#[derive(Debug, Clone)]
pub struct MintOutcome {
    pub nft_id: NftId,
    pub owner: AccountId,
    pub mint_transaction_id: TransactionId,
    pub transfer_transaction_id: TransactionId,
}

/// Mint one certificate token pointing at the stored assets and deliver it
/// to the recipient.
pub async fn mint_and_deliver(
    ledger: &dyn LedgerClient,
    token_id: TokenId,
    package: &CertificateAssetPackage,
    recipient: AccountId,
    operator: &OperatorContext,
) -> Result<MintOutcome> {
    // On-chain bytes are the pointer, never the payload
    let pointer = OnChainPointer::new(
        package.image_file_id.clone(),
        package.metadata_file_id.clone(),
    );
    let metadata = pointer.to_onchain_bytes()?;

    let (serial, mint_transaction_id) = ledger.mint_nft(token_id, metadata, operator).await?;
    let nft_id = NftId::new(token_id, serial);
    info!("Minted certificate {} (tx {})", nft_id, mint_transaction_id);

    let transfer_transaction_id = match ledger
        .transfer_nft(nft_id, operator.account, recipient, operator)
        .await
    {
        Ok(tx) => tx,
        Err(Error::AssociationRequired { account, token_id }) => {
            // User-actionable: surface as-is. The serial is logged so an
            // operator can complete the transfer once the account opts in.
            warn!(
                "Certificate {} minted but {} is not associated with {}; transfer pending",
                nft_id, account, token_id
            );
            return Err(Error::AssociationRequired { account, token_id });
        }
        Err(other) => {
            warn!("Certificate {} minted but transfer failed: {}", nft_id, other);
            return Err(Error::MintSucceededTransferFailed {
                nft_id,
                reason: other.to_string(),
            });
        }
    };

    info!(
        "Delivered certificate {} to {} (tx {})",
        nft_id, recipient, transfer_transaction_id
    );

    Ok(MintOutcome {
        nft_id,
        owner: recipient,
        mint_transaction_id,
        transfer_transaction_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use certmint_common::ContentId;
    use certmint_ledger::{CollectionSpec, LedgerClient, MockLedgerNode};

    async fn setup() -> (MockLedgerNode, TokenId, OperatorContext) {
        let node = MockLedgerNode::new();
        let config = crate::IssuerConfig::mock();
        let operator = config.operator().unwrap();
        node.fund_account(operator.account, 100_000_000_000).await;
        let (token, _) = node
            .create_nft_collection(
                &CollectionSpec {
                    name: "Web3versity Course Certificates".into(),
                    symbol: "W3VC".into(),
                    max_fee_tinybars: 5_000_000_000,
                },
                &operator,
            )
            .await
            .unwrap();
        (node, token, operator)
    }

    fn package() -> CertificateAssetPackage {
        CertificateAssetPackage {
            image_file_id: ContentId("f1111111111111111111".into()),
            metadata_file_id: ContentId("f2222222222222222222".into()),
            platform_signature: "aa".into(),
        }
    }

    #[tokio::test]
    async fn test_transfer_uses_the_minted_serial() {
        let (node, token, operator) = setup().await;
        let learner: AccountId = "0.0.1001".parse().unwrap();
        node.fund_account(learner, 1_000_000_000).await;
        node.associate_token(learner, token).await.unwrap();

        let outcome = mint_and_deliver(&node, token, &package(), learner, &operator)
            .await
            .unwrap();
        assert_eq!(outcome.nft_id.serial, 1);
        assert_eq!(outcome.owner, learner);
        assert_ne!(outcome.mint_transaction_id, outcome.transfer_transaction_id);
    }

    #[tokio::test]
    async fn test_unassociated_recipient_surfaces_association_error() {
        let (node, token, operator) = setup().await;
        let learner: AccountId = "0.0.1001".parse().unwrap();

        let err = mint_and_deliver(&node, token, &package(), learner, &operator)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "association_required");
    }

    #[tokio::test]
    async fn test_network_fault_after_mint_reports_serial() {
        let (node, token, operator) = setup().await;
        let learner: AccountId = "0.0.1001".parse().unwrap();
        node.fund_account(learner, 1_000_000_000).await;
        node.associate_token(learner, token).await.unwrap();
        node.fail_next_transfer("UNKNOWN: node unreachable").await;

        let err = mint_and_deliver(&node, token, &package(), learner, &operator)
            .await
            .unwrap_err();
        match err {
            Error::MintSucceededTransferFailed { nft_id, .. } => {
                assert_eq!(nft_id, NftId::new(token, 1));
            }
            other => panic!("expected partial-failure error, got {other:?}"),
        }
    }
}
