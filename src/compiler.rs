//! Compilation of serialized parameter maps into process argument vectors.
//!
//! Rendering follows the schema's field declaration order, so repeated
//! compilations of an unchanged parameter object yield identical argument
//! vectors.

use crate::schema::{Mode, WireValue, RUN_DURATION_WIRE_ID};

/// Token enabling the tool's machine-readable output mode.
pub const STRUCTURED_OUTPUT_FLAG: &str = "--json";
/// Token selecting the passive listener role.
pub const SERVER_MODE_FLAG: &str = "--server";
/// Token selecting the initiator role; followed by the target host.
pub const CLIENT_MODE_FLAG: &str = "--client";
pub const UDP_FLAG: &str = "--udp";
pub const SCTP_FLAG: &str = "--sctp";

/// Compile an ordered wire map into the exact process argument vector.
///
/// Rules, in priority order:
/// 1. a fixed leading structured-output token (preceded by the server-mode
///    selector in passive mode);
/// 2. the protocol selector is special-cased: TCP emits nothing, UDP and
///    SCTP emit their single selector token;
/// 3. the target host is special-cased: client-mode selector followed by
///    the host value;
/// 4. true booleans render as one bare flag token; false booleans emit
///    nothing;
/// 5. every other field renders as `--<wire-identifier>` followed by the
///    stringified value;
/// 6. the server run duration is never rendered: it governs the
///    collaborator's timeout, not the tool's arguments.
pub fn compile(mode: Mode, fields: &[(String, WireValue)]) -> Vec<String> {
    let mut argv = Vec::new();
    if mode == Mode::Server {
        argv.push(SERVER_MODE_FLAG.to_string());
    }
    argv.push(STRUCTURED_OUTPUT_FLAG.to_string());

    for (wire_id, value) in fields {
        match (wire_id.as_str(), value) {
            ("protocol", WireValue::Str(name)) => match name.as_str() {
                "UDP" => argv.push(UDP_FLAG.to_string()),
                "SCTP" => argv.push(SCTP_FLAG.to_string()),
                // TCP is the tool's own default
                _ => {}
            },
            ("host", value) => {
                argv.push(CLIENT_MODE_FLAG.to_string());
                argv.push(value.to_string());
            }
            (RUN_DURATION_WIRE_ID, _) => {}
            (_, WireValue::Bool(true)) => argv.push(format!("--{}", wire_id)),
            (_, WireValue::Bool(false)) => {}
            (_, value) => {
                argv.push(format!("--{}", wire_id));
                argv.push(value.to_string());
            }
        }
    }

    argv
}
