//! Ledger access for certificate issuance
//!
//! The consensus-node SDK (transaction signing, fee math, consensus) is an
//! external collaborator: this crate defines the seam ([`LedgerClient`]),
//! an in-memory node implementing it for tests and mock deployments, and
//! the credential-free REST mirror client used by the verification path.

pub mod client;
pub mod mirror;
pub mod mock;
pub mod operator;

pub use client::{CollectionSpec, LedgerClient};
pub use mirror::{MirrorNftInfo, MirrorReader, RestMirrorClient};
pub use mock::MockLedgerNode;
pub use operator::{OperatorContext, OperatorKey};
