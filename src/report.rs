//! Typed result documents and outcome classification.
//!
//! The external tool reports a three-section JSON document on success. Only
//! the top-level shape is validated here; the nested content is tool-defined
//! and passed through opaquely.

use crate::runner::RunOutput;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Substring of a benign stderr warning emitted during UDP test teardown.
/// Output containing it is not surfaced as an error.
pub const BENIGN_STDERR_MARKER: &str = "Broken pipe";

/// Marker the tool embeds in its stdout when it reports an error through the
/// structured output channel.
pub const STDOUT_ERROR_MARKER: &str = "error";

/// Fixed message attached to a passive-mode run stopped by its timeout.
pub const SERVER_SUCCESS_MESSAGE: &str =
    "listener ran for the configured duration and was stopped by the timeout";

/// Structured output of a completed active-mode run.
///
/// The three top-level sections are required; their interiors are opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultDocument {
    /// Run configuration as reported by the tool
    pub start: Value,
    /// Ordered periodic measurement samples
    pub intervals: Vec<Value>,
    /// Final aggregate statistics
    pub end: Value,
}

/// Decoding failures that indicate a contract violation by the external
/// tool, distinct from errors the tool reported itself.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed result document: {detail}")]
    MalformedResult { detail: String },
}

/// Outcome of an active-mode invocation.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClientOutcome {
    Success { output: ResultDocument },
    Error { error: String },
}

/// Outcome of a passive-mode invocation.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ServerOutcome {
    Success { message: String },
    Error { error: String },
}

/// Classify a completed active-mode run.
///
/// Non-benign stderr or an embedded error marker yields a typed error
/// outcome carrying the combined diagnostic text. Stdout that cannot be
/// parsed as a result document despite no reported error is a
/// [`DecodeError`]: a contract violation, never silently downgraded.
pub fn decode_client(output: &RunOutput) -> Result<ClientOutcome, DecodeError> {
    if !output.stderr.is_empty() && !output.stderr.contains(BENIGN_STDERR_MARKER) {
        return Ok(ClientOutcome::Error {
            error: format!(
                "error:\nstdout:\n{}\nstderr:\n{}",
                output.stdout, output.stderr
            ),
        });
    }

    if output.stdout.contains(STDOUT_ERROR_MARKER) {
        return Ok(ClientOutcome::Error {
            error: format!("Errors found in run. Output:\n{}", output.stdout),
        });
    }

    match serde_json::from_str::<ResultDocument>(&output.stdout) {
        Ok(document) => Ok(ClientOutcome::Success { output: document }),
        Err(err) => Err(DecodeError::MalformedResult {
            detail: err.to_string(),
        }),
    }
}

/// Classify a completed passive-mode run.
///
/// The listener is defined to run until external cancellation, so reaching
/// the collaborator's timeout is the success path. The process exiting on
/// its own is always an error, regardless of its exit code.
pub fn decode_server(output: &RunOutput) -> ServerOutcome {
    if output.timed_out {
        return ServerOutcome::Success {
            message: SERVER_SUCCESS_MESSAGE.to_string(),
        };
    }

    let code = output
        .status
        .map_or_else(|| "signal".to_string(), |c| c.to_string());
    ServerOutcome::Error {
        error: format!(
            "error ({}):\nstdout:\n{}\nstderr:\n{}",
            code, output.stdout, output.stderr
        ),
    }
}
