use env_logger::Env;
use log::error;
use signing_verifier::signing::{SigningReport, Verdict, Verifier, VerifierConfig, VerifyError};
use std::process::ExitCode;

type CliResult<T> = Result<T, anyhow::Error>;

/// CLI entrypoint: loads configuration, runs the check, prints the verdict.
/// Exit status 0 means the keystore fingerprint is registered; 1 means a
/// mismatch or any failure along the way.
fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init()
        .ok();

    match run() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(1)
        }
    }
}

fn run() -> CliResult<u8> {
    let cfg = VerifierConfig::from_env()?;
    cfg.info();

    let verifier = Verifier::new(cfg);

    println!("{}", "=".repeat(60));
    println!("Signing credential consistency check");
    println!("{}", "=".repeat(60));

    let outcome = verifier.run();
    match &outcome {
        Ok(report) => print_report(&verifier, report),
        Err(err) => print_failure(err),
    }
    Ok(exit_status(&outcome))
}

/// Status the process reports for an outcome: 0 only for a verified match,
/// 1 for a mismatch or any failure.
fn exit_status(outcome: &Result<SigningReport, VerifyError>) -> u8 {
    match outcome {
        Ok(report) => match report.verdict {
            Verdict::Match => 0,
            Verdict::Mismatch { .. } => 1,
        },
        Err(_) => 1,
    }
}

/// Operator-facing rendering of a completed check.
fn print_report(verifier: &Verifier, report: &SigningReport) {
    println!("Keystore SHA-1    : {}", report.credential);
    if report.registered.is_empty() {
        println!("Registered SHA-1s : (none)");
    } else {
        println!("Registered SHA-1s :");
        for fp in &report.registered {
            println!("  - {fp}");
        }
    }
    println!();

    match &report.verdict {
        Verdict::Match => {
            println!("✅ MATCH: this build's signing certificate is registered.");
            println!("   Sign-in against the backend will accept this signature.");
        }
        Verdict::Mismatch { console_form } => {
            let console = verifier.console_url(report.project_id.as_deref());
            println!("❌ MISMATCH: the keystore fingerprint is not registered.");
            println!();
            println!("To fix:");
            println!("  1. Open {console}");
            println!("  2. Add this SHA-1 fingerprint: {console_form}");
            println!(
                "  3. Download the refreshed configuration file and replace {}",
                verifier.config().services_path.display()
            );
            println!("  4. Rebuild the app so the new file ships with it.");
        }
    }
}

/// Rendering for runs that never reached a verdict.
fn print_failure(err: &VerifyError) {
    println!("❌ CHECK FAILED: {err}");
    println!("   {}", err.remediation());
}
