use crate::signing::fingerprint::Fingerprint;
use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Debug, Deserialize)]
/// Shape of the backend configuration artifact (`google-services.json`).
///
/// Only the fields this check reads are modelled; everything else in the
/// artifact is ignored.
pub struct ServicesArtifact {
    #[serde(default)]
    pub project_info: Option<ProjectInfo>,
    /// Absent and present-but-empty are distinct states: absent means the
    /// artifact is not usable, empty means no registrations yet.
    pub client: Option<Vec<ClientEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub project_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClientEntry {
    #[serde(default)]
    pub oauth_client: Vec<OauthClient>,
}

#[derive(Debug, Deserialize)]
pub struct OauthClient {
    #[serde(default)]
    pub android_info: Option<AndroidInfo>,
}

#[derive(Debug, Deserialize)]
pub struct AndroidInfo {
    #[serde(default)]
    pub certificate_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Two-valued outcome of the comparison.
pub enum Verdict {
    /// The credential fingerprint is registered with the backend.
    Match,
    /// Not registered; carries the console-form string the operator must add.
    Mismatch { console_form: String },
}

#[derive(Debug)]
/// Summary returned to callers after a completed check.
pub struct SigningReport {
    pub credential: Fingerprint,
    pub registered: BTreeSet<Fingerprint>,
    pub project_id: Option<String>,
    pub verdict: Verdict,
}
