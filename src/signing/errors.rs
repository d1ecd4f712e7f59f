use thiserror::Error;

#[derive(Debug, Error)]
/// Failure taxonomy for the fingerprint consistency check. Every variant is
/// terminal for the run; none are retried.
pub enum VerifyError {
    #[error("credential inspection tool not found: {0}")]
    ToolUnavailable(String),
    #[error("credential inspection failed: {0}")]
    CredentialReadError(String),
    #[error("no SHA1 line in credential inspection output")]
    FingerprintNotFound,
    #[error("malformed fingerprint (want 40 hex characters): {0}")]
    MalformedFingerprint(String),
    #[error("configuration artifact not readable: {0}")]
    ConfigNotFound(String),
    #[error("configuration artifact is not well-formed JSON: {0}")]
    ConfigParseError(String),
    #[error("configuration artifact has no top-level client list")]
    ConfigMissingClients,
}

impl VerifyError {
    /// Operator-facing remediation hint for this failure kind.
    pub fn remediation(&self) -> &'static str {
        match self {
            Self::ToolUnavailable(_) => {
                "install a JDK so `keytool` is on PATH, or point \
                 SIGNING_KEYTOOL_PROGRAM at the binary"
            }
            Self::CredentialReadError(_) => {
                "check SIGNING_KEYSTORE_PATH, SIGNING_KEYSTORE_ALIAS and \
                 SIGNING_STORE_PASSWORD against the release keystore"
            }
            Self::FingerprintNotFound => {
                "run `keytool -list -v` by hand and confirm the alias prints \
                 a `SHA1:` fingerprint line"
            }
            Self::MalformedFingerprint(_) => {
                "the digest did not normalize to 40 hex characters; inspect \
                 the SHA1 line the tool printed"
            }
            Self::ConfigNotFound(_) => {
                "download the configuration artifact from the backend console \
                 and place it at the expected path (SIGNING_SERVICES_PATH)"
            }
            Self::ConfigParseError(_) => {
                "the file on disk is not valid JSON; re-download the artifact \
                 from the backend console"
            }
            Self::ConfigMissingClients => {
                "the artifact declares no client registrations for this app; \
                 re-download it from the backend console"
            }
        }
    }
}
