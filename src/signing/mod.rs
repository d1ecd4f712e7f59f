pub mod config;
pub mod errors;
pub mod fingerprint;
pub mod types;
pub mod verifier;

mod keystore;
mod services;
mod tool;

pub use config::VerifierConfig;
pub use errors::VerifyError;
pub use fingerprint::Fingerprint;
pub use keystore::extract_credential_fingerprint;
pub use services::{extract_registered_fingerprints, RegisteredFingerprints};
pub use tool::{InvokeError, SystemInvoker, ToolInvoker, ToolOutput};
pub use types::{SigningReport, Verdict};
pub use verifier::{verify, Verifier};
