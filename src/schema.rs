//! Field descriptor tables and the schema validation/serialization engine.
//!
//! Every configurable parameter is described by a static [`FieldDescriptor`]:
//! its wire identifier, value kind, numeric bounds, pattern, and its
//! relationships to other fields (mutual exclusion, conditional requirement).
//! The per-mode descriptor tables are consulted uniformly by validation,
//! serialization, and argument compilation, so field semantics live in one
//! place instead of being scattered across call sites.

use crate::units::{Quantity, UnitError, UnitFamily};
use regex::Regex;
use std::fmt;

/// Invocation mode of the external benchmarking tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Initiator role: connects to a target host and drives a transfer
    Client,
    /// Listener role: waits for incoming connections until cancelled
    Server,
}

/// Value kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Bool,
    Str,
    /// String restricted to a fixed set of wire values
    Enum(&'static [&'static str]),
    /// Magnitude with an optional unit suffix from the given family
    Quantity(UnitFamily),
}

/// Static metadata for one configurable parameter.
///
/// Descriptors are declared once per schema and never mutated. Declaration
/// order is the deterministic rendering order for serialization and
/// argument compilation.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Semantic name used in parameter documents
    pub name: &'static str,
    /// Stable external identifier (may differ from `name`)
    pub wire_id: &'static str,
    pub kind: FieldKind,
    /// Inclusive lower bound for numeric values
    pub min: Option<i64>,
    /// Inclusive upper bound for numeric values
    pub max: Option<i64>,
    /// Regex the full string value must match
    pub pattern: Option<&'static str>,
    /// Fields that may not be present together with this one
    pub conflicts_with: &'static [&'static str],
    /// Fields that must be present whenever this one is
    pub requires: &'static [&'static str],
}

impl FieldDescriptor {
    const fn new(name: &'static str, wire_id: &'static str, kind: FieldKind) -> Self {
        FieldDescriptor {
            name,
            wire_id,
            kind,
            min: None,
            max: None,
            pattern: None,
            conflicts_with: &[],
            requires: &[],
        }
    }

    const fn range(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    const fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    const fn pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }

    const fn conflicts(mut self, with: &'static [&'static str]) -> Self {
        self.conflicts_with = with;
        self
    }

    const fn requires(mut self, fields: &'static [&'static str]) -> Self {
        self.requires = fields;
        self
    }
}

/// A present field value as seen by the schema engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Bool(bool),
    Str(String),
    /// Unresolved quantity text, e.g. "1K" or "600"
    Quantity(String),
}

/// A value rendered for the external wire: quantities are already reduced
/// to base-unit integers.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::Int(i) => write!(f, "{}", i),
            WireValue::Bool(b) => write!(f, "{}", b),
            WireValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Access to a parameter object's fields by semantic name.
///
/// Both raw (pre-validation) and validated parameter objects implement this,
/// which is what lets the schema engine stay generic.
pub trait ParamFields {
    /// The value of the named field, or `None` when absent.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Schema validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("field '{field}': expected {expected}")]
    WrongKind { field: String, expected: &'static str },

    #[error("field '{field}': value {value} is out of range ({limits})")]
    OutOfRange {
        field: String,
        value: i64,
        limits: String,
    },

    #[error("field '{field}': '{value}' does not match the expected pattern")]
    PatternMismatch { field: String, value: String },

    #[error("field '{field}': '{value}' is not one of the allowed values")]
    NotInEnum { field: String, value: String },

    #[error("field '{field}': {source}")]
    InvalidUnit { field: String, source: UnitError },

    #[error("fields '{a}' and '{b}' are mutually exclusive")]
    ConflictingFields { a: String, b: String },

    #[error("field '{field}' requires '{required}' to be set")]
    MissingRequired { field: String, required: String },
}

const FORMAT_LETTERS: &[&str] = &["k", "m", "g", "t", "K", "M", "G", "T"];
const PROTOCOL_NAMES: &[&str] = &["TCP", "UDP", "SCTP"];

/// Common network/reporting fields shared by both modes. Kept in sync at the
/// head of both tables so the rendering order matches across modes.
const CLIENT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("port", "port", FieldKind::Int).range(1, 65535),
    FieldDescriptor::new("format", "format", FieldKind::Enum(FORMAT_LETTERS)),
    FieldDescriptor::new("interval", "interval", FieldKind::Quantity(UnitFamily::Seconds)).min(1),
    FieldDescriptor::new("affinity", "affinity", FieldKind::Str).pattern(r"^\d+(,\d+)?$"),
    FieldDescriptor::new("bind", "bind", FieldKind::Str),
    FieldDescriptor::new("forceflush", "forceflush", FieldKind::Bool),
    FieldDescriptor::new("host", "host", FieldKind::Str),
    FieldDescriptor::new("udp", "udp", FieldKind::Bool).conflicts(&["sctp"]),
    FieldDescriptor::new("sctp", "sctp", FieldKind::Bool),
    FieldDescriptor::new("protocol", "protocol", FieldKind::Enum(PROTOCOL_NAMES)),
    FieldDescriptor::new(
        "connect_timeout",
        "connect-timeout",
        FieldKind::Quantity(UnitFamily::Millis),
    )
    .min(1),
    FieldDescriptor::new("bitrate", "bitrate", FieldKind::Quantity(UnitFamily::Bits)),
    FieldDescriptor::new("pacing_timer", "pacing-timer", FieldKind::Int).min(1),
    FieldDescriptor::new("fq_rate", "fq-rate", FieldKind::Quantity(UnitFamily::Bits)),
    FieldDescriptor::new("time", "time", FieldKind::Quantity(UnitFamily::Seconds)).min(1),
    FieldDescriptor::new("bytes", "bytes", FieldKind::Quantity(UnitFamily::Bytes))
        .min(1)
        .conflicts(&["time"]),
    FieldDescriptor::new("blockcount", "blockcount", FieldKind::Quantity(UnitFamily::Bytes))
        .min(1)
        .conflicts(&["time", "bytes"]),
    FieldDescriptor::new("length", "length", FieldKind::Quantity(UnitFamily::Bytes)).min(1),
    FieldDescriptor::new("cport", "cport", FieldKind::Int).range(1, 65535),
    FieldDescriptor::new("parallel", "parallel", FieldKind::Int).range(1, 128),
    FieldDescriptor::new("reverse", "reverse", FieldKind::Bool),
    FieldDescriptor::new("window", "window", FieldKind::Quantity(UnitFamily::Bytes)).min(1),
    FieldDescriptor::new("congestion", "congestion", FieldKind::Str).pattern(r"^[a-z0-9_]+$"),
    FieldDescriptor::new("set_mss", "set-mss", FieldKind::Int).range(88, 9216),
    FieldDescriptor::new("no_delay", "no-delay", FieldKind::Bool),
    FieldDescriptor::new("version4", "version4", FieldKind::Bool).conflicts(&["version6"]),
    FieldDescriptor::new("version6", "version6", FieldKind::Bool),
    FieldDescriptor::new("tos", "tos", FieldKind::Int).range(0, 255),
    FieldDescriptor::new("dscp", "dscp", FieldKind::Int).range(0, 63),
    FieldDescriptor::new("flowlabel", "flowlabel", FieldKind::Int)
        .range(0, 1_048_575)
        .requires(&["version6"]),
    FieldDescriptor::new("zerocopy", "zerocopy", FieldKind::Bool),
    FieldDescriptor::new("omit", "omit", FieldKind::Quantity(UnitFamily::Seconds)),
    FieldDescriptor::new("title", "title", FieldKind::Str),
    FieldDescriptor::new("get_server_output", "get-server-output", FieldKind::Bool),
    FieldDescriptor::new("udp_counters_64bit", "udp-counters-64bit", FieldKind::Bool)
        .requires(&["udp"]),
];

const SERVER_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("port", "port", FieldKind::Int).range(1, 65535),
    FieldDescriptor::new("format", "format", FieldKind::Enum(FORMAT_LETTERS)),
    FieldDescriptor::new("interval", "interval", FieldKind::Quantity(UnitFamily::Seconds)).min(1),
    FieldDescriptor::new("affinity", "affinity", FieldKind::Str).pattern(r"^\d+(,\d+)?$"),
    FieldDescriptor::new("bind", "bind", FieldKind::Str),
    FieldDescriptor::new("forceflush", "forceflush", FieldKind::Bool),
    FieldDescriptor::new(
        "run_duration",
        "run-duration",
        FieldKind::Quantity(UnitFamily::Seconds),
    )
    .min(1),
];

/// Wire identifier of the server run-duration field. The compiler must skip
/// it: the run duration governs the collaborator's timeout, not the
/// external tool's arguments.
pub const RUN_DURATION_WIRE_ID: &str = "run-duration";

/// An immutable per-mode parameter schema: an ordered field descriptor table
/// with whole-object validation and wire serialization.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub mode: Mode,
    fields: &'static [FieldDescriptor],
}

impl Schema {
    /// The active-mode (client) schema.
    pub fn client() -> Self {
        Schema {
            mode: Mode::Client,
            fields: CLIENT_FIELDS,
        }
    }

    /// The passive-mode (server) schema.
    pub fn server() -> Self {
        Schema {
            mode: Mode::Server,
            fields: SERVER_FIELDS,
        }
    }

    /// The descriptor table in declaration order.
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Look up a descriptor by semantic name.
    pub fn descriptor(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate a parameter object against this schema.
    ///
    /// Pure and total: returns zero or more errors and never panics on
    /// malformed input. Per-field kind/range/pattern/enum checks run first,
    /// then the conflict/requirement relations are walked across the whole
    /// object. An absent optional field triggers nothing except as the
    /// target of a `requires` relation; a boolean explicitly set to `false`
    /// counts as absent for relation checks (unset is equivalent to the
    /// default).
    pub fn validate<P: ParamFields>(&self, params: &P) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for field in self.fields {
            if let Some(value) = params.field(field.name) {
                check_value(field, &value, &mut errors);
            }
        }

        for field in self.fields {
            if !is_present(params, field.name) {
                continue;
            }
            for other in field.conflicts_with {
                if is_present(params, other) {
                    errors.push(ValidationError::ConflictingFields {
                        a: field.name.to_string(),
                        b: other.to_string(),
                    });
                }
            }
            for required in field.requires {
                if !is_present(params, required) {
                    errors.push(ValidationError::MissingRequired {
                        field: field.name.to_string(),
                        required: required.to_string(),
                    });
                }
            }
        }

        errors
    }

    /// Render a validated parameter object as an ordered wire-identifier map.
    ///
    /// Absent optional fields are dropped; unit-scaled quantities are emitted
    /// as base-unit integer magnitudes, never suffixed strings.
    pub fn serialize<P: ParamFields>(&self, params: &P) -> Vec<(String, WireValue)> {
        let mut out = Vec::new();
        for field in self.fields {
            let Some(value) = params.field(field.name) else {
                continue;
            };
            let wire = match value {
                FieldValue::Int(i) => WireValue::Int(i),
                FieldValue::Bool(b) => WireValue::Bool(b),
                FieldValue::Str(s) => WireValue::Str(s),
                FieldValue::Quantity(text) => {
                    let FieldKind::Quantity(family) = field.kind else {
                        continue;
                    };
                    // Validated objects never carry unparseable quantities.
                    match Quantity::parse(&text).and_then(|q| q.to_base(family)) {
                        Ok(base) => WireValue::Int(i64::try_from(base).unwrap_or(i64::MAX)),
                        Err(_) => continue,
                    }
                }
            };
            out.push((field.wire_id.to_string(), wire));
        }
        out
    }
}

/// Presence for relation checks: a field is present when it has a value
/// other than an explicit `false`.
fn is_present<P: ParamFields>(params: &P, name: &str) -> bool {
    !matches!(
        params.field(name),
        None | Some(FieldValue::Bool(false))
    )
}

fn check_value(field: &FieldDescriptor, value: &FieldValue, errors: &mut Vec<ValidationError>) {
    match (field.kind, value) {
        (FieldKind::Int, FieldValue::Int(i)) => check_bounds(field, *i, errors),
        (FieldKind::Bool, FieldValue::Bool(_)) => {}
        (FieldKind::Str, FieldValue::Str(s)) => check_pattern(field, s, errors),
        (FieldKind::Enum(allowed), FieldValue::Str(s)) => {
            if !allowed.contains(&s.as_str()) {
                errors.push(ValidationError::NotInEnum {
                    field: field.name.to_string(),
                    value: s.clone(),
                });
            }
        }
        (FieldKind::Quantity(_), FieldValue::Int(i)) => check_bounds(field, *i, errors),
        (FieldKind::Quantity(family), FieldValue::Quantity(text)) => {
            match Quantity::parse(text).and_then(|q| q.to_base(family)) {
                Ok(base) => check_bounds(field, i64::try_from(base).unwrap_or(i64::MAX), errors),
                Err(source) => errors.push(ValidationError::InvalidUnit {
                    field: field.name.to_string(),
                    source,
                }),
            }
        }
        (kind, _) => {
            let expected = match kind {
                FieldKind::Int => "an integer",
                FieldKind::Bool => "a boolean",
                FieldKind::Str => "a string",
                FieldKind::Enum(_) => "one of the allowed values",
                FieldKind::Quantity(_) => "a quantity with an optional unit suffix",
            };
            errors.push(ValidationError::WrongKind {
                field: field.name.to_string(),
                expected,
            });
        }
    }
}

fn check_bounds(field: &FieldDescriptor, value: i64, errors: &mut Vec<ValidationError>) {
    let in_range = field.min.map_or(true, |lo| value >= lo) && field.max.map_or(true, |hi| value <= hi);
    if in_range {
        return;
    }
    let limits = match (field.min, field.max) {
        (Some(lo), Some(hi)) => format!("{}..={}", lo, hi),
        (Some(lo), None) => format!(">= {}", lo),
        (None, Some(hi)) => format!("<= {}", hi),
        (None, None) => String::new(),
    };
    errors.push(ValidationError::OutOfRange {
        field: field.name.to_string(),
        value,
        limits,
    });
}

fn check_pattern(field: &FieldDescriptor, value: &str, errors: &mut Vec<ValidationError>) {
    let Some(pattern) = field.pattern else {
        return;
    };
    if let Ok(re) = Regex::new(pattern) {
        if !re.is_match(value) {
            errors.push(ValidationError::PatternMismatch {
                field: field.name.to_string(),
                value: value.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Minimal ParamFields over a name -> value map for engine tests
    struct MapParams(HashMap<&'static str, FieldValue>);

    impl MapParams {
        fn new(entries: &[(&'static str, FieldValue)]) -> Self {
            MapParams(entries.iter().cloned().collect())
        }
    }

    impl ParamFields for MapParams {
        fn field(&self, name: &str) -> Option<FieldValue> {
            self.0.get(name).cloned()
        }
    }

    #[test]
    fn test_empty_object_is_valid() {
        let params = MapParams::new(&[]);
        assert!(Schema::client().validate(&params).is_empty());
        assert!(Schema::server().validate(&params).is_empty());
    }

    #[test]
    fn test_port_range_is_inclusive() {
        let params = MapParams::new(&[("port", FieldValue::Int(65535))]);
        assert!(Schema::client().validate(&params).is_empty());

        let params = MapParams::new(&[("port", FieldValue::Int(1))]);
        assert!(Schema::client().validate(&params).is_empty());

        let params = MapParams::new(&[("port", FieldValue::Int(0))]);
        let errors = Schema::client().validate(&params);
        assert_eq!(
            errors,
            vec![ValidationError::OutOfRange {
                field: "port".to_string(),
                value: 0,
                limits: "1..=65535".to_string(),
            }]
        );
    }

    #[test]
    fn test_format_enum_membership() {
        let params = MapParams::new(&[("format", FieldValue::Str("G".to_string()))]);
        assert!(Schema::client().validate(&params).is_empty());

        let params = MapParams::new(&[("format", FieldValue::Str("x".to_string()))]);
        let errors = Schema::client().validate(&params);
        assert!(matches!(errors[0], ValidationError::NotInEnum { .. }));
    }

    #[test]
    fn test_affinity_pattern() {
        for good in ["3", "3,7"] {
            let params = MapParams::new(&[("affinity", FieldValue::Str(good.to_string()))]);
            assert!(Schema::client().validate(&params).is_empty(), "{}", good);
        }
        let params = MapParams::new(&[("affinity", FieldValue::Str("a,b".to_string()))]);
        let errors = Schema::client().validate(&params);
        assert!(matches!(errors[0], ValidationError::PatternMismatch { .. }));
    }

    #[test]
    fn test_quantity_suffix_checked_against_family() {
        let params = MapParams::new(&[("bitrate", FieldValue::Quantity("1K".to_string()))]);
        assert!(Schema::client().validate(&params).is_empty());

        // "s" is a milliseconds/seconds suffix, not a bits suffix
        let params = MapParams::new(&[("bitrate", FieldValue::Quantity("1s".to_string()))]);
        let errors = Schema::client().validate(&params);
        assert!(matches!(errors[0], ValidationError::InvalidUnit { .. }));
    }

    #[test]
    fn test_malformed_quantity_is_an_error_not_a_panic() {
        let params = MapParams::new(&[("time", FieldValue::Quantity("soon".to_string()))]);
        let errors = Schema::client().validate(&params);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::InvalidUnit { .. }));
    }

    #[test]
    fn test_conflicting_fields_both_present() {
        let params = MapParams::new(&[
            ("bytes", FieldValue::Quantity("100".to_string())),
            ("time", FieldValue::Quantity("5".to_string())),
        ]);
        let errors = Schema::client().validate(&params);
        assert_eq!(
            errors,
            vec![ValidationError::ConflictingFields {
                a: "bytes".to_string(),
                b: "time".to_string(),
            }]
        );
    }

    #[test]
    fn test_conflict_not_triggered_by_single_field() {
        let params = MapParams::new(&[("bytes", FieldValue::Quantity("100".to_string()))]);
        assert!(Schema::client().validate(&params).is_empty());
    }

    #[test]
    fn test_requires_if_present() {
        // Trigger without the required field
        let params = MapParams::new(&[("flowlabel", FieldValue::Int(7))]);
        let errors = Schema::client().validate(&params);
        assert_eq!(
            errors,
            vec![ValidationError::MissingRequired {
                field: "flowlabel".to_string(),
                required: "version6".to_string(),
            }]
        );

        // Both present is valid
        let params = MapParams::new(&[
            ("flowlabel", FieldValue::Int(7)),
            ("version6", FieldValue::Bool(true)),
        ]);
        assert!(Schema::client().validate(&params).is_empty());

        // Neither present is valid
        let params = MapParams::new(&[]);
        assert!(Schema::client().validate(&params).is_empty());
    }

    #[test]
    fn test_false_boolean_counts_as_absent_for_relations() {
        // udp explicitly false does not satisfy the udp requirement
        let params = MapParams::new(&[
            ("udp_counters_64bit", FieldValue::Bool(true)),
            ("udp", FieldValue::Bool(false)),
        ]);
        let errors = Schema::client().validate(&params);
        assert!(matches!(errors[0], ValidationError::MissingRequired { .. }));

        // udp true, sctp false is not a conflict
        let params = MapParams::new(&[
            ("udp", FieldValue::Bool(true)),
            ("sctp", FieldValue::Bool(false)),
        ]);
        assert!(Schema::client().validate(&params).is_empty());
    }

    #[test]
    fn test_wrong_kind_reported() {
        let params = MapParams::new(&[("port", FieldValue::Str("eighty".to_string()))]);
        let errors = Schema::client().validate(&params);
        assert!(matches!(errors[0], ValidationError::WrongKind { .. }));
    }

    #[test]
    fn test_serialize_drops_absent_and_orders_by_declaration() {
        let params = MapParams::new(&[
            ("time", FieldValue::Quantity("5".to_string())),
            ("port", FieldValue::Int(50000)),
        ]);
        let wire = Schema::client().serialize(&params);
        assert_eq!(
            wire,
            vec![
                ("port".to_string(), WireValue::Int(50000)),
                ("time".to_string(), WireValue::Int(5)),
            ]
        );
    }

    #[test]
    fn test_serialize_emits_base_unit_magnitudes() {
        let params = MapParams::new(&[("bitrate", FieldValue::Quantity("1K".to_string()))]);
        let wire = Schema::client().serialize(&params);
        assert_eq!(wire, vec![("bitrate".to_string(), WireValue::Int(1024))]);
    }

    #[test]
    fn test_wire_identifier_mapping() {
        let params = MapParams::new(&[("connect_timeout", FieldValue::Quantity("5s".to_string()))]);
        let wire = Schema::client().serialize(&params);
        assert_eq!(
            wire,
            vec![("connect-timeout".to_string(), WireValue::Int(5000))]
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let params = MapParams::new(&[
            ("bytes", FieldValue::Quantity("100".to_string())),
            ("time", FieldValue::Quantity("5".to_string())),
        ]);
        let first = Schema::client().validate(&params);
        let second = Schema::client().validate(&params);
        assert_eq!(first, second);
    }
}
