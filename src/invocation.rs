//! The two operations exposed to callers: active-mode and passive-mode runs.
//!
//! Each operation validates its raw parameters, compiles the argument
//! vector, drives the external process through the runner, and classifies
//! the captured output. Validation failures are folded into the operation's
//! own error channel before any process is started.

use crate::compiler;
use crate::params::{ClientParams, RawClientParams, RawServerParams, ServerParams};
use crate::report::{self, ClientOutcome, ServerOutcome};
use crate::runner::Runner;
use crate::schema::{Schema, ValidationError};
use color_eyre::Result;
use log::{info, warn};
use std::time::Duration;

/// Run the active-mode workload against the configured target host.
pub fn run_client(raw: RawClientParams) -> Result<ClientOutcome> {
    run_client_with(raw, &Runner::from_env())
}

/// Run the active-mode workload through a specific runner.
pub fn run_client_with(raw: RawClientParams, runner: &Runner) -> Result<ClientOutcome> {
    let params = match ClientParams::build(raw) {
        Ok(params) => params,
        Err(errors) => {
            warn!("client parameters failed validation with {} error(s)", errors.len());
            return Ok(ClientOutcome::Error {
                error: validation_failure_text(&errors),
            });
        }
    };

    info!("Starting client run against {}", params.host);
    let wire = Schema::client().serialize(&params);
    let argv = compiler::compile(Schema::client().mode, &wire);
    let output = runner.run_to_completion(&argv)?;

    Ok(report::decode_client(&output)?)
}

/// Run the passive listener until its configured duration elapses.
pub fn run_server(raw: RawServerParams) -> Result<ServerOutcome> {
    run_server_with(raw, &Runner::from_env())
}

/// Run the passive listener through a specific runner.
pub fn run_server_with(raw: RawServerParams, runner: &Runner) -> Result<ServerOutcome> {
    let params = match ServerParams::build(raw) {
        Ok(params) => params,
        Err(errors) => {
            warn!("server parameters failed validation with {} error(s)", errors.len());
            return Ok(ServerOutcome::Error {
                error: validation_failure_text(&errors),
            });
        }
    };

    info!(
        "Starting listener with a run duration of {} seconds",
        params.run_duration
    );
    let wire = Schema::server().serialize(&params);
    let argv = compiler::compile(Schema::server().mode, &wire);
    let output = runner.run_with_timeout(&argv, Duration::from_secs(params.run_duration))?;

    Ok(report::decode_server(&output))
}

fn validation_failure_text(errors: &[ValidationError]) -> String {
    let lines: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    format!("invalid parameters:\n{}", lines.join("\n"))
}
