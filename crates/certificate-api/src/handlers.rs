//! API request handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::info;

use certmint_common::{Error, TokenId, VerificationResult};
use certmint_issuer::register_collection;

use crate::models::{
    ErrorBody, IssueCertificateRequest, IssueCertificateResponse, RegisterCollectionResponse,
};
use crate::AppState;

/// API error: pipeline error plus the HTTP status it maps to
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::InvalidEntityId(_) => StatusCode::BAD_REQUEST,
            Error::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InsufficientFunds { .. } => StatusCode::PAYMENT_REQUIRED,
            Error::AssociationRequired { .. } => StatusCode::CONFLICT,
            Error::AssetUpload(_)
            | Error::MintSucceededTransferFailed { .. }
            | Error::Ledger(_)
            | Error::Mirror(_)
            | Error::Storage(_) => StatusCode::BAD_GATEWAY,
            Error::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError {
            status,
            body: ErrorBody::from_error(&err),
        }
    }
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "certificate-api"
    }))
}

/// Issue a certificate for a course completion
pub async fn issue_certificate_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IssueCertificateRequest>,
) -> Result<Json<IssueCertificateResponse>, ApiError> {
    let issuer = state.issuer.as_ref().ok_or_else(|| {
        ApiError::from(Error::Configuration(
            "no consensus-node adapter configured; issuance is unavailable".into(),
        ))
    })?;

    let (request, recipient) = payload.into_parts()?;

    info!(
        "Issuing certificate {} for learner {}",
        request.certificate_number, request.learner_name
    );

    let certificate = issuer.issue(&request, recipient).await?;

    Ok(Json(IssueCertificateResponse {
        success: true,
        certificate,
    }))
}

/// Verify a certificate by token id and serial.
///
/// Well-formed ids always get a 200 with `{valid, ...}`; only malformed
/// ids or transport faults produce error statuses.
pub async fn verify_certificate_handler(
    State(state): State<Arc<AppState>>,
    Path((token_id, serial)): Path<(String, u64)>,
) -> Result<Json<VerificationResult>, ApiError> {
    let token_id: TokenId = token_id.parse()?;
    let result = state.verifier.verify(token_id, serial).await?;
    Ok(Json(result))
}

/// One-time collection registration (operator-only).
///
/// Re-running creates a new, separate collection; the returned id must be
/// persisted into configuration, since the ledger offers no way to recover
/// a lost one.
pub async fn register_collection_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RegisterCollectionResponse>, ApiError> {
    let ledger = state.ledger.as_ref().ok_or_else(|| {
        ApiError::from(Error::Configuration(
            "no consensus-node adapter configured; registration is unavailable".into(),
        ))
    })?;

    let operator = state.config.operator()?;
    let collection = register_collection(ledger.as_ref(), &operator, &state.config).await?;

    Ok(Json(RegisterCollectionResponse {
        success: true,
        token_id: collection.token_id.to_string(),
        transaction_id: collection.transaction_id.to_string(),
        note: "persist this token id as COLLECTION_TOKEN_ID; it cannot be rediscovered".into(),
    }))
}
