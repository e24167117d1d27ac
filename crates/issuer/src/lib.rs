//! Certificate issuance pipeline
//!
//! One issuance is one strictly sequential pipeline: build and store the
//! signed assets, mint a token whose on-chain metadata is a pointer to
//! them, then transfer that exact serial to the learner. The collection
//! registrar runs once per deployment, before any issuance.

pub mod artwork;
pub mod assets;
pub mod config;
pub mod coordinator;
pub mod pipeline;
pub mod registrar;

pub use assets::build_and_store;
pub use config::IssuerConfig;
pub use coordinator::{mint_and_deliver, MintOutcome};
pub use pipeline::CertificateIssuer;
pub use registrar::{register_collection, CollectionInfo};
