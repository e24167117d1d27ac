//! Certificate asset builder
//!
//! Renders the image, builds and signs the canonical document, and stores
//! both. Every step must succeed before minting is allowed to start; a
//! failure aborts the build, and a retry re-runs it in full with fresh
//! content ids.

use chrono::Utc;
use tracing::{debug, info};

use certmint_common::{
    CertificateAssetPackage, CertificateDocument, CertificateRequest, Error, PlatformSigner,
    Result,
};
use certmint_filestore::FileStore;

use crate::artwork::render_certificate_svg;

/// Build, sign, and store the assets for one certificate.
///
/// The verification URL is keyed by certificate number: the token serial is
/// not known yet (the ledger assigns it at mint), and the caller's index
/// resolves certificate number to (token, serial) after delivery.
pub async fn build_and_store(
    request: &CertificateRequest,
    signer: &PlatformSigner,
    store: &dyn FileStore,
    verify_base_url: &str,
) -> Result<(CertificateAssetPackage, CertificateDocument)> {
    request.validate()?;

    let verify_url = format!(
        "{}/{}",
        verify_base_url.trim_end_matches('/'),
        request.certificate_number
    );

    let svg = render_certificate_svg(request, &verify_url)?;
    debug!("Rendered certificate image, {} bytes", svg.len());

    let image_file_id = store
        .put(svg.into_bytes(), "image/svg+xml")
        .await
        .map_err(as_upload_error)?;

    let mut document =
        CertificateDocument::new(request, image_file_id.clone(), verify_url, Utc::now());
    let signature = signer.sign(&document.canonical_bytes()?);
    document.platform_signature = Some(signature.clone());

    let metadata_file_id = store
        .put(serde_json::to_vec_pretty(&document)?, "application/json")
        .await
        .map_err(as_upload_error)?;

    info!(
        "Stored certificate assets for {}: image={}, metadata={}",
        request.certificate_number, image_file_id, metadata_file_id
    );

    Ok((
        CertificateAssetPackage {
            image_file_id,
            metadata_file_id,
            platform_signature: signature,
        },
        document,
    ))
}

// Storage write failures are all retryable-from-scratch upload failures
// from the pipeline's point of view.
fn as_upload_error(err: Error) -> Error {
    match err {
        Error::AssetUpload(_) => err,
        other => Error::AssetUpload(other.to_string()),
    }
}
