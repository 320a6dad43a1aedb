//! Raw and validated parameter objects for both invocation modes.
//!
//! Raw objects are the serde wire shapes accepted from callers: every field
//! optional, quantities given as integers or suffixed strings, and the
//! protocol expressed through the legacy `udp`/`sctp` toggles. Building a
//! validated object is all-or-nothing: either every field parses and passes
//! the schema checks, or the caller gets the full violation list and no
//! partial object.

use crate::schema::{FieldValue, ParamFields, Schema, ValidationError};
use crate::units::{Quantity, UnitError, UnitFamily};
use serde::{Deserialize, Serialize};

/// Target host used when the caller does not name one.
pub const DEFAULT_HOST: &str = "localhost";

/// Listener run duration in seconds used when the caller does not set one.
pub const DEFAULT_RUN_DURATION_SECS: u64 = 600;

/// Transport protocol selector.
///
/// The wire format keeps the two legacy boolean toggles; this enum is the
/// data-model form, derived during [`ClientParams::build`] and translated
/// back only at the wire boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
    Sctp,
}

impl Protocol {
    /// The wire name reported in serialized parameter maps.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
            Protocol::Sctp => "SCTP",
        }
    }
}

/// Report format letter: Kbits/Mbits/Gbits/Tbits and their byte variants.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    k,
    m,
    g,
    t,
    K,
    M,
    G,
    T,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::k => "k",
            Format::m => "m",
            Format::g => "g",
            Format::t => "t",
            Format::K => "K",
            Format::M => "M",
            Format::G => "G",
            Format::T => "T",
        }
    }

    fn from_wire(value: &str) -> Option<Format> {
        match value {
            "k" => Some(Format::k),
            "m" => Some(Format::m),
            "g" => Some(Format::g),
            "t" => Some(Format::t),
            "K" => Some(Format::K),
            "M" => Some(Format::M),
            "G" => Some(Format::G),
            "T" => Some(Format::T),
            _ => None,
        }
    }
}

/// A quantity as it arrives on the wire: a bare integer (base unit implied)
/// or a suffixed string like "1K".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Count(u64),
    Text(String),
}

impl RawQuantity {
    /// Resolve to the base-unit magnitude of the given family.
    pub fn to_base(&self, family: UnitFamily) -> Result<u64, UnitError> {
        match self {
            RawQuantity::Count(n) => Ok(*n),
            RawQuantity::Text(text) => Quantity::parse(text)?.to_base(family),
        }
    }

    fn to_field_value(&self) -> FieldValue {
        match self {
            RawQuantity::Count(n) => FieldValue::Quantity(n.to_string()),
            RawQuantity::Text(text) => FieldValue::Quantity(text.clone()),
        }
    }
}

/// Raw passive-mode (server) parameters as accepted from callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawServerParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<RawQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forceflush: Option<bool>,
    #[serde(rename = "run-duration", skip_serializing_if = "Option::is_none")]
    pub run_duration: Option<RawQuantity>,
}

impl ParamFields for RawServerParams {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "port" => self.port.map(FieldValue::Int),
            "format" => self.format.clone().map(FieldValue::Str),
            "interval" => self.interval.as_ref().map(RawQuantity::to_field_value),
            "affinity" => self.affinity.clone().map(FieldValue::Str),
            "bind" => self.bind.clone().map(FieldValue::Str),
            "forceflush" => self.forceflush.map(FieldValue::Bool),
            "run_duration" => self.run_duration.as_ref().map(RawQuantity::to_field_value),
            _ => None,
        }
    }
}

/// Raw active-mode (client) parameters as accepted from callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawClientParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<RawQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forceflush: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sctp: Option<bool>,
    #[serde(rename = "connect-timeout", skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<RawQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<RawQuantity>,
    #[serde(rename = "pacing-timer", skip_serializing_if = "Option::is_none")]
    pub pacing_timer: Option<i64>,
    #[serde(rename = "fq-rate", skip_serializing_if = "Option::is_none")]
    pub fq_rate: Option<RawQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<RawQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<RawQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockcount: Option<RawQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<RawQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cport: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<RawQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub congestion: Option<String>,
    #[serde(rename = "set-mss", skip_serializing_if = "Option::is_none")]
    pub set_mss: Option<i64>,
    #[serde(rename = "no-delay", skip_serializing_if = "Option::is_none")]
    pub no_delay: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version4: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version6: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tos: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dscp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flowlabel: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zerocopy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omit: Option<RawQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "get-server-output", skip_serializing_if = "Option::is_none")]
    pub get_server_output: Option<bool>,
    #[serde(rename = "udp-counters-64bit", skip_serializing_if = "Option::is_none")]
    pub udp_counters_64bit: Option<bool>,
}

impl ParamFields for RawClientParams {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "port" => self.port.map(FieldValue::Int),
            "format" => self.format.clone().map(FieldValue::Str),
            "interval" => self.interval.as_ref().map(RawQuantity::to_field_value),
            "affinity" => self.affinity.clone().map(FieldValue::Str),
            "bind" => self.bind.clone().map(FieldValue::Str),
            "forceflush" => self.forceflush.map(FieldValue::Bool),
            "host" => self.host.clone().map(FieldValue::Str),
            "udp" => self.udp.map(FieldValue::Bool),
            "sctp" => self.sctp.map(FieldValue::Bool),
            "connect_timeout" => self
                .connect_timeout
                .as_ref()
                .map(RawQuantity::to_field_value),
            "bitrate" => self.bitrate.as_ref().map(RawQuantity::to_field_value),
            "pacing_timer" => self.pacing_timer.map(FieldValue::Int),
            "fq_rate" => self.fq_rate.as_ref().map(RawQuantity::to_field_value),
            "time" => self.time.as_ref().map(RawQuantity::to_field_value),
            "bytes" => self.bytes.as_ref().map(RawQuantity::to_field_value),
            "blockcount" => self.blockcount.as_ref().map(RawQuantity::to_field_value),
            "length" => self.length.as_ref().map(RawQuantity::to_field_value),
            "cport" => self.cport.map(FieldValue::Int),
            "parallel" => self.parallel.map(FieldValue::Int),
            "reverse" => self.reverse.map(FieldValue::Bool),
            "window" => self.window.as_ref().map(RawQuantity::to_field_value),
            "congestion" => self.congestion.clone().map(FieldValue::Str),
            "set_mss" => self.set_mss.map(FieldValue::Int),
            "no_delay" => self.no_delay.map(FieldValue::Bool),
            "version4" => self.version4.map(FieldValue::Bool),
            "version6" => self.version6.map(FieldValue::Bool),
            "tos" => self.tos.map(FieldValue::Int),
            "dscp" => self.dscp.map(FieldValue::Int),
            "flowlabel" => self.flowlabel.map(FieldValue::Int),
            "zerocopy" => self.zerocopy.map(FieldValue::Bool),
            "omit" => self.omit.as_ref().map(RawQuantity::to_field_value),
            "title" => self.title.clone().map(FieldValue::Str),
            "get_server_output" => self.get_server_output.map(FieldValue::Bool),
            "udp_counters_64bit" => self.udp_counters_64bit.map(FieldValue::Bool),
            _ => None,
        }
    }
}

/// Validated passive-mode parameters. Quantities are base-unit magnitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerParams {
    pub port: Option<u16>,
    pub format: Option<Format>,
    /// Seconds between periodic throughput reports
    pub interval: Option<u64>,
    pub affinity: Option<String>,
    pub bind: Option<String>,
    pub forceflush: bool,
    /// Seconds to keep the listener alive before the collaborator stops it
    pub run_duration: u64,
}

impl ServerParams {
    /// Validate raw parameters and construct the typed object.
    ///
    /// Construction never partially succeeds: on any violation the full
    /// error list is returned and no object is produced.
    pub fn build(raw: RawServerParams) -> Result<ServerParams, Vec<ValidationError>> {
        let errors = Schema::server().validate(&raw);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ServerParams {
            port: raw.port.and_then(|p| u16::try_from(p).ok()),
            format: raw.format.as_deref().and_then(Format::from_wire),
            interval: quantity_base(&raw.interval, UnitFamily::Seconds),
            affinity: raw.affinity,
            bind: raw.bind,
            forceflush: raw.forceflush.unwrap_or(false),
            run_duration: quantity_base(&raw.run_duration, UnitFamily::Seconds)
                .unwrap_or(DEFAULT_RUN_DURATION_SECS),
        })
    }
}

impl ParamFields for ServerParams {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "port" => self.port.map(|p| FieldValue::Int(i64::from(p))),
            "format" => self.format.map(|f| FieldValue::Str(f.as_str().to_string())),
            "interval" => self.interval.map(int_value),
            "affinity" => self.affinity.clone().map(FieldValue::Str),
            "bind" => self.bind.clone().map(FieldValue::Str),
            "forceflush" => Some(FieldValue::Bool(self.forceflush)),
            "run_duration" => Some(int_value(self.run_duration)),
            _ => None,
        }
    }
}

/// Validated active-mode parameters. Quantities are base-unit magnitudes
/// (bits, bytes, seconds, or milliseconds).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientParams {
    pub port: Option<u16>,
    pub format: Option<Format>,
    pub interval: Option<u64>,
    pub affinity: Option<String>,
    pub bind: Option<String>,
    pub forceflush: bool,
    pub host: String,
    pub protocol: Protocol,
    /// Control connection setup timeout in milliseconds
    pub connect_timeout: Option<u64>,
    /// Target bitrate in bits/sec (0 for unlimited)
    pub bitrate: Option<u64>,
    /// Pacing timer in microseconds
    pub pacing_timer: Option<u64>,
    /// Fair-queuing socket pacing rate in bits/sec
    pub fq_rate: Option<u64>,
    /// Transmit duration in seconds
    pub time: Option<u64>,
    /// Bytes to transmit instead of a duration
    pub bytes: Option<u64>,
    /// Blocks to transmit instead of a duration or byte count
    pub blockcount: Option<u64>,
    /// Read/write buffer length in bytes
    pub length: Option<u64>,
    pub cport: Option<u16>,
    pub parallel: Option<u32>,
    pub reverse: bool,
    /// Window size / socket buffer size in bytes
    pub window: Option<u64>,
    pub congestion: Option<String>,
    pub set_mss: Option<u32>,
    pub no_delay: bool,
    pub version4: bool,
    pub version6: bool,
    pub tos: Option<u8>,
    pub dscp: Option<u8>,
    pub flowlabel: Option<u32>,
    pub zerocopy: bool,
    /// Seconds to omit from the start of the measurement
    pub omit: Option<u64>,
    pub title: Option<String>,
    pub get_server_output: bool,
    pub udp_counters_64bit: bool,
}

impl ClientParams {
    /// Validate raw parameters and construct the typed object.
    ///
    /// The protocol selector is derived here from the legacy toggles: `udp`
    /// wins over the TCP default, `sctp` likewise; both set is a conflict
    /// caught by validation before this point.
    pub fn build(raw: RawClientParams) -> Result<ClientParams, Vec<ValidationError>> {
        let errors = Schema::client().validate(&raw);
        if !errors.is_empty() {
            return Err(errors);
        }

        let protocol = if raw.udp.unwrap_or(false) {
            Protocol::Udp
        } else if raw.sctp.unwrap_or(false) {
            Protocol::Sctp
        } else {
            Protocol::Tcp
        };

        Ok(ClientParams {
            port: raw.port.and_then(|p| u16::try_from(p).ok()),
            format: raw.format.as_deref().and_then(Format::from_wire),
            interval: quantity_base(&raw.interval, UnitFamily::Seconds),
            affinity: raw.affinity,
            bind: raw.bind,
            forceflush: raw.forceflush.unwrap_or(false),
            host: raw.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            protocol,
            connect_timeout: quantity_base(&raw.connect_timeout, UnitFamily::Millis),
            bitrate: quantity_base(&raw.bitrate, UnitFamily::Bits),
            pacing_timer: raw.pacing_timer.and_then(|v| u64::try_from(v).ok()),
            fq_rate: quantity_base(&raw.fq_rate, UnitFamily::Bits),
            time: quantity_base(&raw.time, UnitFamily::Seconds),
            bytes: quantity_base(&raw.bytes, UnitFamily::Bytes),
            blockcount: quantity_base(&raw.blockcount, UnitFamily::Bytes),
            length: quantity_base(&raw.length, UnitFamily::Bytes),
            cport: raw.cport.and_then(|p| u16::try_from(p).ok()),
            parallel: raw.parallel.and_then(|p| u32::try_from(p).ok()),
            reverse: raw.reverse.unwrap_or(false),
            window: quantity_base(&raw.window, UnitFamily::Bytes),
            congestion: raw.congestion,
            set_mss: raw.set_mss.and_then(|v| u32::try_from(v).ok()),
            no_delay: raw.no_delay.unwrap_or(false),
            version4: raw.version4.unwrap_or(false),
            version6: raw.version6.unwrap_or(false),
            tos: raw.tos.and_then(|v| u8::try_from(v).ok()),
            dscp: raw.dscp.and_then(|v| u8::try_from(v).ok()),
            flowlabel: raw.flowlabel.and_then(|v| u32::try_from(v).ok()),
            zerocopy: raw.zerocopy.unwrap_or(false),
            omit: quantity_base(&raw.omit, UnitFamily::Seconds),
            title: raw.title,
            get_server_output: raw.get_server_output.unwrap_or(false),
            udp_counters_64bit: raw.udp_counters_64bit.unwrap_or(false),
        })
    }
}

impl ParamFields for ClientParams {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "port" => self.port.map(|p| FieldValue::Int(i64::from(p))),
            "format" => self.format.map(|f| FieldValue::Str(f.as_str().to_string())),
            "interval" => self.interval.map(int_value),
            "affinity" => self.affinity.clone().map(FieldValue::Str),
            "bind" => self.bind.clone().map(FieldValue::Str),
            "forceflush" => Some(FieldValue::Bool(self.forceflush)),
            "host" => Some(FieldValue::Str(self.host.clone())),
            // The toggles are consumed into the protocol selector; only the
            // selector reaches the wire map.
            "udp" | "sctp" => None,
            "protocol" => Some(FieldValue::Str(self.protocol.wire_name().to_string())),
            "connect_timeout" => self.connect_timeout.map(int_value),
            "bitrate" => self.bitrate.map(int_value),
            "pacing_timer" => self.pacing_timer.map(int_value),
            "fq_rate" => self.fq_rate.map(int_value),
            "time" => self.time.map(int_value),
            "bytes" => self.bytes.map(int_value),
            "blockcount" => self.blockcount.map(int_value),
            "length" => self.length.map(int_value),
            "cport" => self.cport.map(|p| FieldValue::Int(i64::from(p))),
            "parallel" => self.parallel.map(|p| FieldValue::Int(i64::from(p))),
            "reverse" => Some(FieldValue::Bool(self.reverse)),
            "window" => self.window.map(int_value),
            "congestion" => self.congestion.clone().map(FieldValue::Str),
            "set_mss" => self.set_mss.map(|v| FieldValue::Int(i64::from(v))),
            "no_delay" => Some(FieldValue::Bool(self.no_delay)),
            "version4" => Some(FieldValue::Bool(self.version4)),
            "version6" => Some(FieldValue::Bool(self.version6)),
            "tos" => self.tos.map(|v| FieldValue::Int(i64::from(v))),
            "dscp" => self.dscp.map(|v| FieldValue::Int(i64::from(v))),
            "flowlabel" => self.flowlabel.map(|v| FieldValue::Int(i64::from(v))),
            "zerocopy" => Some(FieldValue::Bool(self.zerocopy)),
            "omit" => self.omit.map(int_value),
            "title" => self.title.clone().map(FieldValue::Str),
            "get_server_output" => Some(FieldValue::Bool(self.get_server_output)),
            "udp_counters_64bit" => Some(FieldValue::Bool(self.udp_counters_64bit)),
            _ => None,
        }
    }
}

fn quantity_base(raw: &Option<RawQuantity>, family: UnitFamily) -> Option<u64> {
    // Only called after validation; unparseable quantities were rejected there.
    raw.as_ref().and_then(|q| q.to_base(family).ok())
}

fn int_value(value: u64) -> FieldValue {
    FieldValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::WireValue;

    #[test]
    fn test_client_defaults() {
        let params = ClientParams::build(RawClientParams::default()).unwrap();
        assert_eq!(params.host, "localhost");
        assert_eq!(params.protocol, Protocol::Tcp);
        assert!(!params.reverse);
        assert_eq!(params.port, None);
    }

    #[test]
    fn test_server_run_duration_default() {
        let params = ServerParams::build(RawServerParams::default()).unwrap();
        assert_eq!(params.run_duration, 600);
    }

    #[test]
    fn test_protocol_derived_from_toggles() {
        let raw = RawClientParams {
            udp: Some(true),
            ..Default::default()
        };
        assert_eq!(ClientParams::build(raw).unwrap().protocol, Protocol::Udp);

        let raw = RawClientParams {
            sctp: Some(true),
            ..Default::default()
        };
        assert_eq!(ClientParams::build(raw).unwrap().protocol, Protocol::Sctp);

        let raw = RawClientParams {
            udp: Some(false),
            sctp: Some(false),
            ..Default::default()
        };
        assert_eq!(ClientParams::build(raw).unwrap().protocol, Protocol::Tcp);
    }

    #[test]
    fn test_both_toggles_rejected() {
        let raw = RawClientParams {
            udp: Some(true),
            sctp: Some(true),
            ..Default::default()
        };
        let errors = ClientParams::build(raw).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::ConflictingFields {
                a: "udp".to_string(),
                b: "sctp".to_string(),
            }]
        );
    }

    #[test]
    fn test_bytes_and_time_rejected_together() {
        let raw = RawClientParams {
            time: Some(RawQuantity::Count(5)),
            bytes: Some(RawQuantity::Text("1M".to_string())),
            ..Default::default()
        };
        let errors = ClientParams::build(raw).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::ConflictingFields { .. })));
    }

    #[test]
    fn test_suffixed_quantities_reduced_to_base_units() {
        let raw = RawClientParams {
            bitrate: Some(RawQuantity::Text("1K".to_string())),
            time: Some(RawQuantity::Text("5m".to_string())),
            connect_timeout: Some(RawQuantity::Text("2s".to_string())),
            ..Default::default()
        };
        let params = ClientParams::build(raw).unwrap();
        assert_eq!(params.bitrate, Some(1024));
        assert_eq!(params.time, Some(300));
        assert_eq!(params.connect_timeout, Some(2000));
    }

    #[test]
    fn test_build_returns_all_violations_at_once() {
        let raw = RawClientParams {
            port: Some(0),
            format: Some("x".to_string()),
            flowlabel: Some(7),
            ..Default::default()
        };
        let errors = ClientParams::build(raw).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_serialized_wire_map_applies_defaults() {
        let params = ClientParams::build(RawClientParams {
            time: Some(RawQuantity::Count(5)),
            ..Default::default()
        })
        .unwrap();
        let wire = Schema::client().serialize(&params);

        let host = wire.iter().find(|(k, _)| k == "host");
        assert_eq!(
            host,
            Some(&("host".to_string(), WireValue::Str("localhost".to_string())))
        );
        let protocol = wire.iter().find(|(k, _)| k == "protocol");
        assert_eq!(
            protocol,
            Some(&("protocol".to_string(), WireValue::Str("TCP".to_string())))
        );
    }

    #[test]
    fn test_raw_client_params_from_yaml() {
        let yaml = r#"
host: "10.0.0.2"
port: 50000
udp: true
bitrate: "10M"
connect-timeout: 3000
udp-counters-64bit: true
"#;
        let raw: RawClientParams = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(raw.host.as_deref(), Some("10.0.0.2"));
        assert_eq!(raw.connect_timeout, Some(RawQuantity::Count(3000)));
        assert_eq!(raw.bitrate, Some(RawQuantity::Text("10M".to_string())));

        let params = ClientParams::build(raw).unwrap();
        assert_eq!(params.protocol, Protocol::Udp);
        assert_eq!(params.bitrate, Some(10 * 1024 * 1024));
        assert!(params.udp_counters_64bit);
    }

    #[test]
    fn test_unknown_raw_field_rejected() {
        let yaml = "bogus_field: 1\n";
        assert!(serde_yaml::from_str::<RawClientParams>(yaml).is_err());
    }

    #[test]
    fn test_server_params_from_yaml() {
        let yaml = r#"
port: 50000
interval: 1
forceflush: true
run-duration: "10m"
"#;
        let raw: RawServerParams = serde_yaml::from_str(yaml).unwrap();
        let params = ServerParams::build(raw).unwrap();
        assert_eq!(params.port, Some(50000));
        assert_eq!(params.interval, Some(1));
        assert!(params.forceflush);
        assert_eq!(params.run_duration, 600);
    }
}
