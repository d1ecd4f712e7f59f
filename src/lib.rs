//! Signing-credential consistency check for the mobile app backend.
//!
//! Extracts the SHA-1 fingerprint of the release keystore's certificate,
//! extracts the set of fingerprints the backend configuration artifact
//! declares as registered, and compares the two after normalization. The
//! binary in `main.rs` wraps this into a one-shot operator tool.

pub mod signing;
