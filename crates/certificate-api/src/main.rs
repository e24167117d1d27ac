//! Certificate API service
//!
//! REST surface for issuing and verifying course-completion NFT
//! certificates.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use certificate_api::{create_router, ApiConfig, AppState};
use certmint_filestore::HttpFileStore;
use certmint_ledger::RestMirrorClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "certificate_api=debug,certmint_issuer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    info!("Starting Certificate API Service");
    info!("Network: {}", config.issuer.network);
    info!("Mock mode: {}", config.issuer.mock_mode);

    let state = if config.issuer.mock_mode {
        let (state, _node) = AppState::mock(config.issuer.clone()).await?;
        info!(
            "Mock ledger ready, collection {}",
            state
                .config
                .collection_token
                .map(|t| t.to_string())
                .unwrap_or_default()
        );
        state
    } else {
        // Real mode: live verification path. Issuance stays offline until a
        // consensus-node adapter implementing LedgerClient is wired in.
        let storage_api = config
            .issuer
            .storage_api_url
            .clone()
            .context("STORAGE_API_URL is required when MOCK_MODE=false")?;
        let storage_gateway = config
            .issuer
            .storage_gateway_url
            .clone()
            .context("STORAGE_GATEWAY_URL is required when MOCK_MODE=false")?;

        warn!("No consensus-node adapter configured; issuance endpoints will report a configuration error");

        AppState::new(
            config.issuer.clone(),
            None,
            Arc::new(HttpFileStore::new(storage_api, storage_gateway)),
            Arc::new(RestMirrorClient::new(config.issuer.mirror_base_url.clone())),
        )
    };

    let app = create_router(state);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    info!("Certificate API running on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
