use crate::signing::errors::VerifyError;
use crate::signing::fingerprint::Fingerprint;
use crate::signing::types::ServicesArtifact;
use log::{debug, warn};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Debug)]
/// What the backend configuration artifact declares: the registered
/// fingerprints and, when present, the owning project id.
pub struct RegisteredFingerprints {
    pub fingerprints: BTreeSet<Fingerprint>,
    pub project_id: Option<String>,
}

/// Reads the configuration artifact and collects every registered
/// certificate fingerprint under `client[].oauth_client[].android_info`.
///
/// An artifact with `client: []` yields an empty set; that is a valid state
/// (nothing registered yet), distinct from an artifact with no `client` key
/// at all. Entries without a certificate hash are skipped, and entries whose
/// hash does not normalize are skipped with a warning rather than failing
/// the run.
pub fn extract_registered_fingerprints(
    path: &Path,
) -> Result<RegisteredFingerprints, VerifyError> {
    // Bytes, not a string read: a present-but-undecodable file is a content
    // problem, and content problems classify as parse errors.
    let raw = fs::read(path)
        .map_err(|e| VerifyError::ConfigNotFound(format!("{}: {e}", path.display())))?;
    let artifact: ServicesArtifact =
        serde_json::from_slice(&raw).map_err(|e| VerifyError::ConfigParseError(e.to_string()))?;

    let clients = artifact.client.ok_or(VerifyError::ConfigMissingClients)?;
    let project_id = artifact.project_info.and_then(|info| info.project_id);

    let mut fingerprints = BTreeSet::new();
    for client in &clients {
        for oauth in &client.oauth_client {
            let Some(hash) = oauth
                .android_info
                .as_ref()
                .and_then(|info| info.certificate_hash.as_deref())
            else {
                continue;
            };
            match Fingerprint::parse(hash) {
                Ok(fp) => {
                    fingerprints.insert(fp);
                }
                Err(err) => {
                    warn!("skipping certificate hash in {}: {err}", path.display());
                }
            }
        }
    }
    debug!(
        "{}: {} client entries, {} distinct fingerprints",
        path.display(),
        clients.len(),
        fingerprints.len(),
    );
    Ok(RegisteredFingerprints {
        fingerprints,
        project_id,
    })
}
