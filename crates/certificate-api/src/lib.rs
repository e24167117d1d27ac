//! Certificate API service
//!
//! The caller-facing REST surface of the issuance pipeline: the course
//! platform posts completion facts here and gets back a fully issued
//! certificate record; anyone can hit the verification route,
//! credential-free.

pub mod config;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use certmint_filestore::FileStore;
use certmint_issuer::{CertificateIssuer, IssuerConfig};
use certmint_ledger::{LedgerClient, MirrorReader, MockLedgerNode};
use certmint_verifier::CertificateVerifier;

pub use config::ApiConfig;

/// Shared application state
pub struct AppState {
    pub config: IssuerConfig,
    /// Absent when no consensus-node adapter is configured; verification
    /// still works, issuance reports a configuration error.
    pub ledger: Option<Arc<dyn LedgerClient>>,
    pub issuer: Option<CertificateIssuer>,
    pub verifier: CertificateVerifier,
}

impl AppState {
    pub fn new(
        config: IssuerConfig,
        ledger: Option<Arc<dyn LedgerClient>>,
        store: Arc<dyn FileStore>,
        mirror: Arc<dyn MirrorReader>,
    ) -> Self {
        let issuer = ledger
            .clone()
            .map(|l| CertificateIssuer::new(l, store.clone(), config.clone()));
        Self {
            config,
            ledger,
            issuer,
            verifier: CertificateVerifier::new(mirror, store),
        }
    }

    /// Fully mocked state: funded operator, registered collection,
    /// in-memory ledger and store. Used by mock deployments and tests;
    /// the returned node lets tests arrange associations and balances.
    pub async fn mock(mut config: IssuerConfig) -> anyhow::Result<(Self, Arc<MockLedgerNode>)> {
        use certmint_filestore::MemoryFileStore;

        let node = Arc::new(MockLedgerNode::new());
        let operator = config.operator()?;
        node.fund_account(operator.account, 100 * config.max_fee_tinybars)
            .await;

        if config.collection_token.is_none() {
            let info =
                certmint_issuer::register_collection(node.as_ref(), &operator, &config).await?;
            config.collection_token = Some(info.token_id);
        }

        let store: Arc<dyn FileStore> = Arc::new(MemoryFileStore::new());
        let state = Self::new(
            config,
            Some(node.clone() as Arc<dyn LedgerClient>),
            store,
            node.clone() as Arc<dyn MirrorReader>,
        );
        Ok((state, node))
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/certificates", post(handlers::issue_certificate_handler))
        .route(
            "/api/certificates/{token_id}/{serial}",
            get(handlers::verify_certificate_handler),
        )
        .route("/api/collection", post(handlers::register_collection_handler))
        .with_state(shared_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
