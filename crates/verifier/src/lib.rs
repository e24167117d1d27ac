//! Certificate verification
//!
//! The independent read path: anyone holding a token id and serial can
//! check a certificate against ledger and storage truth, no credentials
//! required. Nothing is cached or persisted; every call recomputes from the
//! sources, so the answer can never go stale relative to the ledger.

pub mod reader;

pub use reader::CertificateVerifier;
