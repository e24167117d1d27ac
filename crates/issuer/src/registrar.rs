//! One-time collection registration
//!
//! Creates the NFT collection all certificates are minted into. Runs once
//! per deployment: re-running creates a new, separate collection, and the
//! ledger has no discovery mechanism for a lost id, so the caller must
//! persist the returned id into configuration out-of-band.

use serde::Serialize;
use tracing::info;

use certmint_common::{Error, Result, TokenId, TransactionId};
use certmint_ledger::{CollectionSpec, LedgerClient, OperatorContext};

use crate::config::IssuerConfig;

#[derive(Debug, Clone, Serialize)]
pub struct CollectionInfo {
    pub token_id: TokenId,
    pub transaction_id: TransactionId,
}

/// Create the certificate collection: non-fungible, zero decimals,
/// unlimited supply, treasury and supply key = operator.
pub async fn register_collection(
    ledger: &dyn LedgerClient,
    operator: &OperatorContext,
    config: &IssuerConfig,
) -> Result<CollectionInfo> {
    // Cheap pre-check so an unfunded operator fails before submission
    let balance = ledger.account_balance(operator.account).await?;
    if balance < config.max_fee_tinybars {
        return Err(Error::InsufficientFunds {
            account: operator.account,
        });
    }

    let spec = CollectionSpec {
        name: config.collection_name.clone(),
        symbol: config.collection_symbol.clone(),
        max_fee_tinybars: config.max_fee_tinybars,
    };

    let (token_id, transaction_id) = ledger.create_nft_collection(&spec, operator).await?;

    info!(
        "Registered certificate collection {} ({}), tx {}",
        token_id, config.collection_symbol, transaction_id
    );

    Ok(CollectionInfo {
        token_id,
        transaction_id,
    })
}
