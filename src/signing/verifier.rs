use super::config::VerifierConfig;
use super::errors::VerifyError;
use super::fingerprint::Fingerprint;
use super::keystore::extract_credential_fingerprint;
use super::services::extract_registered_fingerprints;
use super::tool::{SystemInvoker, ToolInvoker};
use super::types::{SigningReport, Verdict};
use log::info;
use std::collections::BTreeSet;

/// Management-console destination when the artifact carries no project id
/// and no override is configured.
const CONSOLE_URL_FALLBACK: &str = "https://console.firebase.google.com/";

/// Membership check of the credential fingerprint in the registered set.
///
/// Pure; both sides were normalized at parse time, so this compares 20-byte
/// values and never raw text. A mismatch carries the console rendering of
/// the credential, which is the string the operator has to paste.
pub fn verify(credential: Fingerprint, registered: &BTreeSet<Fingerprint>) -> Verdict {
    if registered.contains(&credential) {
        Verdict::Match
    } else {
        Verdict::Mismatch {
            console_form: credential.console_form(),
        }
    }
}

/// One-shot orchestration: read the credential, read the registrations,
/// compare, assemble the report.
pub struct Verifier {
    cfg: VerifierConfig,
    invoker: Box<dyn ToolInvoker>,
}

impl Verifier {
    /// Constructs a verifier backed by real subprocess invocation.
    pub fn new(cfg: VerifierConfig) -> Self {
        Self::with_invoker(cfg, Box::new(SystemInvoker))
    }

    /// Constructs a verifier with a substitute tool invoker. Tests use this
    /// to drive the pipeline without a real keystore or JDK.
    pub fn with_invoker(cfg: VerifierConfig, invoker: Box<dyn ToolInvoker>) -> Self {
        Self { cfg, invoker }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.cfg
    }

    /// Runs the whole check. Steps run in a fixed order and any failure
    /// short-circuits: credential first, then registrations, then the
    /// comparison. Nothing is cached between runs.
    pub fn run(&self) -> Result<SigningReport, VerifyError> {
        let credential = extract_credential_fingerprint(&self.cfg, self.invoker.as_ref())?;
        info!("keystore certificate fingerprint: {credential}");

        let registered = extract_registered_fingerprints(&self.cfg.services_path)?;
        info!(
            "artifact declares {} registered fingerprint(s)",
            registered.fingerprints.len()
        );

        let verdict = verify(credential, &registered.fingerprints);
        Ok(SigningReport {
            credential,
            registered: registered.fingerprints,
            project_id: registered.project_id,
            verdict,
        })
    }

    /// Console URL to point the operator at: explicit override first, then
    /// one derived from the artifact's project id, then the bare console.
    pub fn console_url(&self, project_id: Option<&str>) -> String {
        if let Some(url) = &self.cfg.console_url {
            return url.clone();
        }
        match project_id {
            Some(project) => format!(
                "https://console.firebase.google.com/project/{project}/settings/general/"
            ),
            None => CONSOLE_URL_FALLBACK.to_string(),
        }
    }
}
