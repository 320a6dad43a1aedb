//! External process execution for the benchmarking binary.
//!
//! One invocation maps to exactly one external process. Output streams are
//! fully buffered before decoding; a timeout reached on the listener is
//! reported distinctly from a normal exit so the decoder can classify it.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info};
use std::env;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Name of the external benchmarking binary when not overridden.
pub const DEFAULT_BINARY: &str = "iperf3";

/// Environment variable naming an alternative binary path.
pub const BINARY_ENV_VAR: &str = "IPERF3_BIN";

/// Polling interval while waiting for a deadline-bounded process.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Captured result of one external process run.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Whether the run was stopped by the collaborator's timeout rather
    /// than the process exiting on its own
    pub timed_out: bool,
}

/// Runs the external benchmarking binary with compiled argument vectors.
#[derive(Debug, Clone)]
pub struct Runner {
    binary: String,
}

impl Runner {
    pub fn new(binary: impl Into<String>) -> Self {
        Runner {
            binary: binary.into(),
        }
    }

    /// Resolve the binary from the environment, falling back to the default
    /// name looked up on PATH.
    pub fn from_env() -> Self {
        let binary = env::var(BINARY_ENV_VAR).unwrap_or_else(|_| DEFAULT_BINARY.to_string());
        Runner { binary }
    }

    /// Run to completion, draining both output streams (active mode).
    pub fn run_to_completion(&self, args: &[String]) -> Result<RunOutput> {
        info!("Running: {} {}", self.binary, args.join(" "));
        let output = Command::new(&self.binary)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .wrap_err_with(|| format!("failed to start '{}'", self.binary))?;

        Ok(RunOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            timed_out: false,
        })
    }

    /// Run with a hard deadline (passive mode). The process is polled until
    /// it exits or the deadline passes; on the deadline it is killed and the
    /// output is marked `timed_out`.
    pub fn run_with_timeout(&self, args: &[String], timeout: Duration) -> Result<RunOutput> {
        info!(
            "Running: {} {} (timeout {}s)",
            self.binary,
            args.join(" "),
            timeout.as_secs()
        );
        let mut child = Command::new(&self.binary)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .wrap_err_with(|| format!("failed to start '{}'", self.binary))?;

        let deadline = Instant::now() + timeout;
        let mut timed_out = false;
        loop {
            if child
                .try_wait()
                .wrap_err("failed to poll the child process")?
                .is_some()
            {
                break;
            }
            if Instant::now() >= deadline {
                debug!("deadline reached, terminating the process");
                let _ = child.kill();
                timed_out = true;
                break;
            }
            std::thread::sleep(POLL_INTERVAL);
        }

        let output = child
            .wait_with_output()
            .wrap_err("failed to collect process output")?;

        Ok(RunOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            timed_out,
        })
    }
}
