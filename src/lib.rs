//! # iperfkit - Schema-driven configuration and invocation layer for iperf3
//!
//! This library provides the typed parameter model, constraint validation,
//! and argument compilation needed to drive iperf3 benchmark runs and decode
//! their structured results.
//!
//! ## Overview
//!
//! Callers supply raw parameter documents (YAML/JSON) for one of two modes:
//! the passive listener that waits for incoming benchmark connections, or
//! the active client that drives a timed or sized transfer against a target
//! host. The library validates the parameters against a static field
//! schema, compiles them into the exact iperf3 argument vector, executes
//! the external process, and classifies the captured output into a typed
//! outcome.
//!
//! ## Key Features
//!
//! - **Static field schemas**: every parameter's type, bounds, pattern,
//!   wire identifier, and cross-field relations declared in one table
//! - **Cross-field constraints**: mutual exclusion (e.g. `bytes` vs `time`)
//!   and conditional requirements (e.g. `flowlabel` needs `version6`)
//! - **Unit-scaled quantities**: "1K" bits, "5m" seconds, "2s" milliseconds
//!   reduced to base-unit integers at the wire boundary
//! - **Deterministic compilation**: argument vectors follow field
//!   declaration order, so identical parameters yield identical invocations
//! - **Typed outcomes**: tool-reported errors, malformed results, and the
//!   listener's timeout-is-success path are kept distinct
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `units`: unit families and suffixed-quantity parsing
//! - `schema`: field descriptor tables and the validation/serialization engine
//! - `params`: raw and validated parameter objects for both modes
//! - `compiler`: compilation of wire maps into argument vectors
//! - `runner`: external process execution with timeout support
//! - `report`: result document decoding and outcome classification
//! - `invocation`: the client/server operations tying the layers together
//! - `loader`: parameter file loading
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use iperfkit::{invocation, loader};
//!
//! // Load raw client parameters from a YAML file
//! let raw = loader::load_client_params(std::path::Path::new("client.yaml"))?;
//!
//! // Validate, compile, execute, and decode in one step
//! let outcome = invocation::run_client(raw)?;
//! println!("{}", serde_json::to_string_pretty(&outcome)?);
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Validation failures are recovered into the operation's own error channel
//! before any process is started. Only unexpected conditions (the external
//! binary failing to start, its output violating the result contract)
//! propagate as errors; public orchestration functions return
//! `color_eyre::Result` for consistent reporting.

pub mod compiler;
pub mod invocation;
pub mod loader;
pub mod params;
pub mod report;
pub mod runner;
pub mod schema;
pub mod units;
