use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Cap on captured bytes per stream. A verbose keystore listing is a few KiB
/// per certificate; anything past this cap is noise.
const MAX_CAPTURED_BYTES: u64 = 64 * 1024;

#[derive(Debug, Error)]
/// Failures surfaced by a tool invocation, before domain mapping.
pub enum InvokeError {
    #[error("program not found: {0}")]
    ProgramNotFound(String),
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
    #[error("invocation failed: {0}")]
    Spawn(String),
}

#[derive(Debug, Clone)]
/// Captured output of a completed tool invocation.
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the tool was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Capability to run an external tool with a bounded wait.
///
/// The keystore inspection goes through this seam so tests can substitute
/// canned output for a real `keytool`.
pub trait ToolInvoker {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<ToolOutput, InvokeError>;
}

/// Invoker backed by real subprocesses.
///
/// Stdout and stderr are drained on helper threads with capped reads; the
/// calling thread keeps ownership of the child so it can kill and reap it
/// when the deadline expires. On expiry the reader threads are detached
/// rather than joined: a descendant of the tool can hold the pipe write
/// ends open past the child's death, and the deadline bounds this call,
/// not the process tree.
pub struct SystemInvoker;

impl ToolInvoker for SystemInvoker {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<ToolOutput, InvokeError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    InvokeError::ProgramNotFound(program.to_string())
                } else {
                    InvokeError::Spawn(format!("{program}: {e}"))
                }
            })?;

        // Take both pipes before the readers start; ownership of the child
        // stays here.
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let out_handle = std::thread::spawn(move || read_capped(stdout));
        let err_handle = std::thread::spawn(move || read_capped(stderr));

        // A timeout too large to represent as an instant never expires.
        let deadline = Instant::now().checked_add(timeout);
        let status = loop {
            match child
                .try_wait()
                .map_err(|e| InvokeError::Spawn(format!("wait on {program}: {e}")))?
            {
                Some(status) => break status,
                None => {
                    if deadline.is_some_and(|d| Instant::now() >= d) {
                        let _ = child.kill();
                        let _ = child.wait();
                        // The readers stay blocked while any pipe write end
                        // survives; detach them instead of joining.
                        drop(out_handle);
                        drop(err_handle);
                        return Err(InvokeError::TimedOut(timeout));
                    }
                    std::thread::sleep(Duration::from_millis(10));
                }
            }
        };

        Ok(ToolOutput {
            stdout: out_handle.join().unwrap_or_default(),
            stderr: err_handle.join().unwrap_or_default(),
            exit_code: status.code(),
        })
    }
}

/// Bounded read of one pipe; lossy UTF-8 so odd tool encodings never abort
/// the run.
fn read_capped<R: Read>(pipe: Option<R>) -> String {
    let Some(pipe) = pipe else {
        return String::new();
    };
    let mut buf = Vec::new();
    let _ = pipe.take(MAX_CAPTURED_BYTES).read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
