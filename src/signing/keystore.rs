use crate::signing::config::VerifierConfig;
use crate::signing::errors::VerifyError;
use crate::signing::fingerprint::Fingerprint;
use crate::signing::tool::{InvokeError, ToolInvoker, ToolOutput};
use log::debug;

/// Marker preceding the certificate digest in the verbose listing.
const SHA1_MARKER: &str = "SHA1:";

/// Extracts the signing certificate's SHA-1 fingerprint by driving the
/// credential inspection tool (`keytool -list -v`) through `invoker`.
///
/// The first `SHA1:` line wins. A release keystore holds a single
/// self-signed certificate, so later digest lines (SHA-256, further chain
/// entries) carry no additional information for this check.
pub fn extract_credential_fingerprint(
    cfg: &VerifierConfig,
    invoker: &dyn ToolInvoker,
) -> Result<Fingerprint, VerifyError> {
    let keystore = cfg.keystore_path.to_string_lossy();
    let args = [
        "-list",
        "-v",
        "-keystore",
        keystore.as_ref(),
        "-alias",
        cfg.keystore_alias.as_str(),
        "-storepass",
        cfg.store_password.as_str(),
    ];
    // The password goes to the tool, never to the log.
    debug!("inspecting {} (alias {})", keystore, cfg.keystore_alias);

    let output = invoker
        .run(&cfg.keytool_program, &args, cfg.tool_timeout())
        .map_err(|err| match err {
            InvokeError::ProgramNotFound(program) => VerifyError::ToolUnavailable(program),
            other => VerifyError::CredentialReadError(other.to_string()),
        })?;

    if !output.success() {
        return Err(VerifyError::CredentialReadError(describe_failure(
            &cfg.keytool_program,
            &output,
        )));
    }

    let mut digests = output
        .stdout
        .lines()
        .filter_map(|line| line.split_once(SHA1_MARKER).map(|(_, rest)| rest));
    let digest = digests.next().ok_or(VerifyError::FingerprintNotFound)?;
    let extra = digests.count();
    if extra > 0 {
        debug!("ignoring {extra} additional SHA1 line(s) further down the chain");
    }
    Fingerprint::parse(digest)
}

fn describe_failure(program: &str, output: &ToolOutput) -> String {
    let stderr = output.stderr.trim();
    if stderr.is_empty() {
        match output.exit_code {
            Some(code) => format!("{program} exited with status {code}"),
            None => format!("{program} was terminated by a signal"),
        }
    } else {
        stderr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::time::Duration;

    const LISTING: &str = "\
Alias name: release
Creation date: Jan 15, 2024
Entry type: PrivateKeyEntry
Certificate chain length: 1
Certificate[1]:
Owner: CN=Pet Care, OU=Mobile, O=Pet Care, C=US
Issuer: CN=Pet Care, OU=Mobile, O=Pet Care, C=US
Serial number: 4a3f21b0
Valid from: Mon Jan 15 10:23:41 CST 2024 until: Fri Jun 02 11:23:41 CDT 2051
Certificate fingerprints:
\t SHA1: AB:01:23:45:67:89:AB:CD:EF:01:23:45:67:89:AB:CD:EF:01:23:45
\t SHA256: 3C:0F:84:5C:9A:11:7E:2B:D0:66:41:98:AF:23:5D:C1:08:77:EA:42:B3:19:F6:2E:80:4D:C7:55:1A:90:6B:38
Signature algorithm name: SHA256withRSA
Subject Public Key Algorithm: 2048-bit RSA key
Version: 3
";

    /// Invoker that replays a fixed tool result and records what it was
    /// asked to run.
    struct Canned {
        stdout: &'static str,
        stderr: &'static str,
        exit_code: Option<i32>,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl Canned {
        fn ok(stdout: &'static str) -> Self {
            Self {
                stdout,
                stderr: "",
                exit_code: Some(0),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ToolInvoker for Canned {
        fn run(
            &self,
            program: &str,
            args: &[&str],
            _timeout: Duration,
        ) -> Result<ToolOutput, InvokeError> {
            let mut call = vec![program.to_string()];
            call.extend(args.iter().map(|a| a.to_string()));
            self.calls.borrow_mut().push(call);
            Ok(ToolOutput {
                stdout: self.stdout.to_string(),
                stderr: self.stderr.to_string(),
                exit_code: self.exit_code,
            })
        }
    }

    struct Failing(InvokeError);

    impl ToolInvoker for Failing {
        fn run(
            &self,
            _program: &str,
            _args: &[&str],
            _timeout: Duration,
        ) -> Result<ToolOutput, InvokeError> {
            Err(match &self.0 {
                InvokeError::ProgramNotFound(p) => InvokeError::ProgramNotFound(p.clone()),
                InvokeError::TimedOut(d) => InvokeError::TimedOut(*d),
                InvokeError::Spawn(s) => InvokeError::Spawn(s.clone()),
            })
        }
    }

    #[test]
    fn extracts_the_first_sha1_line() {
        let invoker = Canned::ok(LISTING);
        let fp = extract_credential_fingerprint(&VerifierConfig::default(), &invoker)
            .expect("fingerprint");
        assert_eq!(fp.canonical(), "ab0123456789abcdef0123456789abcdef012345");
    }

    #[test]
    fn passes_the_configured_arguments_to_the_tool() {
        let invoker = Canned::ok(LISTING);
        let cfg = VerifierConfig {
            keystore_path: PathBuf::from("out/upload.jks"),
            keystore_alias: "upload".to_string(),
            store_password: "s3cret".to_string(),
            ..VerifierConfig::default()
        };
        extract_credential_fingerprint(&cfg, &invoker).expect("fingerprint");

        let calls = invoker.calls.borrow();
        assert_eq!(
            calls[0],
            vec![
                "keytool",
                "-list",
                "-v",
                "-keystore",
                "out/upload.jks",
                "-alias",
                "upload",
                "-storepass",
                "s3cret",
            ]
        );
    }

    #[test]
    fn missing_program_maps_to_tool_unavailable() {
        let invoker = Failing(InvokeError::ProgramNotFound("keytool".to_string()));
        let err = extract_credential_fingerprint(&VerifierConfig::default(), &invoker)
            .expect_err("must fail");
        assert!(matches!(err, VerifyError::ToolUnavailable(p) if p == "keytool"));
    }

    #[test]
    fn timeout_maps_to_credential_read_error() {
        let invoker = Failing(InvokeError::TimedOut(Duration::from_secs(10)));
        let err = extract_credential_fingerprint(&VerifierConfig::default(), &invoker)
            .expect_err("must fail");
        assert!(matches!(err, VerifyError::CredentialReadError(_)));
    }

    #[test]
    fn nonzero_exit_surfaces_the_tool_stderr() {
        let invoker = Canned {
            stdout: "",
            stderr: "keytool error: java.io.IOException: keystore password was incorrect\n",
            exit_code: Some(1),
            calls: RefCell::new(Vec::new()),
        };
        let err = extract_credential_fingerprint(&VerifierConfig::default(), &invoker)
            .expect_err("must fail");
        match err {
            VerifyError::CredentialReadError(detail) => {
                assert!(detail.contains("password was incorrect"));
            }
            other => panic!("expected CredentialReadError, got {other:?}"),
        }
    }

    #[test]
    fn listing_without_sha1_line_is_fingerprint_not_found() {
        let invoker = Canned::ok(
            "Alias name: release\nEntry type: PrivateKeyEntry\n\
             Signature algorithm name: SHA1withRSA\n",
        );
        let err = extract_credential_fingerprint(&VerifierConfig::default(), &invoker)
            .expect_err("must fail");
        assert!(matches!(err, VerifyError::FingerprintNotFound));
    }

    #[test]
    fn garbage_digest_is_malformed_fingerprint() {
        let invoker = Canned::ok("Certificate fingerprints:\n\t SHA1: not-a-digest\n");
        let err = extract_credential_fingerprint(&VerifierConfig::default(), &invoker)
            .expect_err("must fail");
        assert!(matches!(err, VerifyError::MalformedFingerprint(_)));
    }
}
