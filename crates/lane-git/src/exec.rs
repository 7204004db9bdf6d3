//! External command execution.
//!
//! All git/gh/gate invocations go through here: synchronous, blocking, one
//! child at a time. Results are never `Err` - a failed spawn degrades to a
//! [`CmdOutput`] with exit code -1 so callers have a single shape to classify.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

/// Interval between cancellation checks while a child process runs.
const CANCEL_POLL: Duration = Duration::from_millis(100);

/// Exit code reported when the process could not be spawned or was cancelled.
pub const EXIT_SPAWN_FAILURE: i32 = -1;

/// Result of one external command: exit code plus the combined
/// stdout/stderr text, trimmed.
///
/// Failure reasons are derived by substring matching on the output. That is
/// brittle by nature but matches what the tools actually print; the markers
/// are the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdOutput {
    /// Process exit code; -1 when the process never ran.
    pub exit_code: i32,
    /// Combined stdout and stderr, whitespace-trimmed.
    pub output: String,
}

impl CmdOutput {
    /// Build from raw parts.
    #[must_use]
    pub fn new(exit_code: i32, output: impl Into<String>) -> Self {
        let output = output.into().trim().to_string();
        Self { exit_code, output }
    }

    /// A result representing a process that never ran.
    #[must_use]
    pub fn spawn_failure(message: impl Into<String>) -> Self {
        Self::new(EXIT_SPAWN_FAILURE, message)
    }

    /// Exit code zero.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// The remote rejected the push (non-fast-forward).
    #[must_use]
    pub fn is_push_rejected(&self) -> bool {
        self.output.contains("[rejected]")
    }

    /// The operation stopped on merge/rebase conflicts.
    #[must_use]
    pub fn has_conflict(&self) -> bool {
        self.output.contains("CONFLICT")
    }

    /// A rebase reported the branch already up to date.
    #[must_use]
    pub fn is_up_to_date(&self) -> bool {
        self.output.contains("up to date")
    }

    /// Short human-readable failure description.
    #[must_use]
    pub fn err_msg(&self) -> String {
        if self.is_push_rejected() {
            "push rejected by the remote".to_string()
        } else if self.has_conflict() {
            "conflicts detected".to_string()
        } else {
            self.output.clone()
        }
    }
}

/// Shared cancellation flag checked by [`run_cancelable`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The running child is killed at the next poll.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Run a command to completion, capturing combined output.
#[must_use]
pub fn run(dir: &Path, program: &str, args: &[&str]) -> CmdOutput {
    run_with_env(dir, program, args, &[])
}

/// Run a command with extra environment variables in the child.
#[must_use]
pub fn run_with_env(dir: &Path, program: &str, args: &[&str], envs: &[(&str, &str)]) -> CmdOutput {
    debug!(program, ?args, "running command");

    let mut command = Command::new(program);
    command.args(args).current_dir(dir).stdin(Stdio::null());
    for (key, value) in envs {
        command.env(key, value);
    }

    let result = match command.output() {
        Ok(out) => CmdOutput::new(
            out.status.code().unwrap_or(EXIT_SPAWN_FAILURE),
            combine(&out.stdout, &out.stderr),
        ),
        Err(e) => {
            warn!(program, error = %e, "failed to spawn command");
            CmdOutput::spawn_failure(e.to_string())
        }
    };

    if !result.is_success() {
        warn!(
            program,
            ?args,
            exit_code = result.exit_code,
            "command failed"
        );
    }
    result
}

/// Run a command, polling `token` every 100 ms and killing the child when
/// cancellation is requested. A cancelled run reports exit code -1.
#[must_use]
pub fn run_cancelable(dir: &Path, program: &str, args: &[&str], token: &CancelToken) -> CmdOutput {
    debug!(program, ?args, "running cancelable command");

    let spawned = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            warn!(program, error = %e, "failed to spawn command");
            return CmdOutput::spawn_failure(e.to_string());
        }
    };

    // Drain pipes on their own threads so a chatty child can't block on a
    // full pipe buffer while we only poll for exit.
    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let exit_code = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status.code().unwrap_or(EXIT_SPAWN_FAILURE),
            Ok(None) => {
                if token.is_cancelled() {
                    debug!(program, "cancellation requested - killing child");
                    let _ = child.kill();
                    let _ = child.wait();
                    drain(stdout_reader);
                    drain(stderr_reader);
                    return CmdOutput::spawn_failure("operation cancelled");
                }
                thread::sleep(CANCEL_POLL);
            }
            Err(e) => {
                let _ = child.kill();
                return CmdOutput::spawn_failure(e.to_string());
            }
        }
    };

    let stdout = drain(stdout_reader);
    let stderr = drain(stderr_reader);
    let result = CmdOutput::new(exit_code, combine(&stdout, &stderr));
    if !result.is_success() {
        warn!(program, ?args, exit_code, "command failed");
    }
    result
}

fn spawn_reader<R: Read + Send + 'static>(mut source: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = source.read_to_end(&mut buf);
        buf
    })
}

fn drain(handle: Option<thread::JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

fn combine(stdout: &[u8], stderr: &[u8]) -> String {
    let out = String::from_utf8_lossy(stdout);
    let err = String::from_utf8_lossy(stderr);
    if out.trim().is_empty() {
        err.into_owned()
    } else if err.trim().is_empty() {
        out.into_owned()
    } else {
        format!("{out}\n{err}")
    }
}
