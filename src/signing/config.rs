use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, Deserialize)]
/// Runtime configuration loaded from `SIGNING_*` environment variables.
///
/// Defaults match the repository layout this tool was written for, so a bare
/// invocation from the project root still works.
pub struct VerifierConfig {
    #[serde(default = "def_keystore_path")]
    pub keystore_path: PathBuf,
    #[serde(default = "def_keystore_alias")]
    pub keystore_alias: String,
    /// Store password, not the individual key password.
    #[serde(default = "def_store_password")]
    pub store_password: String,
    #[serde(default = "def_services_path")]
    pub services_path: PathBuf,
    #[serde(default = "def_keytool_program")]
    pub keytool_program: String,
    /// Bounded wait for the inspection tool, in seconds.
    #[serde(default = "def_tool_timeout_secs")]
    pub tool_timeout_secs: u64,
    /// Explicit management-console URL; when unset the URL is derived from
    /// the artifact's project id.
    #[serde(default)]
    pub console_url: Option<String>,
}

impl VerifierConfig {
    /// Populates the configuration from environment variables, honoring `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        log::debug!("fetching config");
        let _ = dotenvy::dotenv();
        let cfg: Self = envy::prefixed("SIGNING_").from_env()?;
        Ok(cfg)
    }

    /// Bounded wait applied to the credential inspection tool.
    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }

    /// Emit the effective configuration via the logger.
    pub fn info(&self) {
        log::info!(
            "effective config: keystore={:?} alias={} services={:?} keytool={} timeout={}s",
            self.keystore_path,
            self.keystore_alias,
            self.services_path,
            self.keytool_program,
            self.tool_timeout_secs,
        );
        if self.store_password == def_store_password() {
            log::warn!(
                "using the default store password; set SIGNING_STORE_PASSWORD for a real keystore"
            );
        }
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            keystore_path: def_keystore_path(),
            keystore_alias: def_keystore_alias(),
            store_password: def_store_password(),
            services_path: def_services_path(),
            keytool_program: def_keytool_program(),
            tool_timeout_secs: def_tool_timeout_secs(),
            console_url: None,
        }
    }
}

fn def_keystore_path() -> PathBuf {
    PathBuf::from("android/release-key.jks")
}

fn def_keystore_alias() -> String {
    "release".to_string()
}

fn def_store_password() -> String {
    "android123".to_string()
}

fn def_services_path() -> PathBuf {
    PathBuf::from("android/app/google-services.json")
}

fn def_keytool_program() -> String {
    "keytool".to_string()
}

fn def_tool_timeout_secs() -> u64 {
    10
}
