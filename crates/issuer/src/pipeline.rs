//! Issuance pipeline facade
//!
//! Wires the asset builder and minting coordinator behind one call. Each
//! issuance is sequential; independent issuances may run concurrently, and
//! the ledger's per-account transaction ordering is the only serialization
//! the shared operator credential needs.

use std::sync::Arc;

use tracing::info;

use certmint_common::{
    AccountId, CertificateRequest, IssuedCertificate, PlatformSigner, Result,
};
use certmint_filestore::FileStore;
use certmint_ledger::LedgerClient;

use crate::assets::build_and_store;
use crate::config::IssuerConfig;
use crate::coordinator::mint_and_deliver;

pub struct CertificateIssuer {
    ledger: Arc<dyn LedgerClient>,
    store: Arc<dyn FileStore>,
    signer: PlatformSigner,
    config: IssuerConfig,
}

impl CertificateIssuer {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        store: Arc<dyn FileStore>,
        config: IssuerConfig,
    ) -> Self {
        let signer = PlatformSigner::new(&config.signing_secret);
        Self {
            ledger,
            store,
            signer,
            config,
        }
    }

    pub fn config(&self) -> &IssuerConfig {
        &self.config
    }

    /// Issue one certificate: build and store signed assets, mint the
    /// pointer token, deliver it to the recipient.
    ///
    /// Returns a fully populated record or one of the named error kinds;
    /// never a partial success.
    pub async fn issue(
        &self,
        request: &CertificateRequest,
        recipient: AccountId,
    ) -> Result<IssuedCertificate> {
        // Configuration problems stop the pipeline before any network call
        let operator = self.config.operator()?;
        let token_id = self.config.collection()?;
        request.validate()?;

        info!(
            "Issuing certificate {} for {} ({})",
            request.certificate_number, request.learner_name, recipient
        );

        let (package, _document) = build_and_store(
            request,
            &self.signer,
            self.store.as_ref(),
            &self.config.verify_base_url,
        )
        .await?;

        let outcome = mint_and_deliver(
            self.ledger.as_ref(),
            token_id,
            &package,
            recipient,
            &operator,
        )
        .await?;

        Ok(IssuedCertificate {
            token_id,
            serial: outcome.nft_id.serial,
            owner: outcome.owner,
            image_file_id: package.image_file_id,
            metadata_file_id: package.metadata_file_id,
            mint_transaction_id: outcome.mint_transaction_id,
            transfer_transaction_id: outcome.transfer_transaction_id,
            explorer_url: self.config.explorer_url(token_id, outcome.nft_id.serial),
        })
    }
}
