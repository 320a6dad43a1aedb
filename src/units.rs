//! Unit families and suffixed-quantity parsing.
//!
//! This module converts unit-suffixed quantity strings (e.g. "1K", "30m")
//! into base-unit integer magnitudes. Each unit family has a fixed,
//! case-sensitive suffix table relative to its base unit.

use std::fmt;

/// A family of convertible measurement units sharing a base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFamily {
    /// Base unit "b"; K/M/G/T scale by powers of 1024
    Bits,
    /// Base unit "B"; K/M/G/T scale by powers of 1024
    Bytes,
    /// Base unit "s"; "m" scales by 60
    Seconds,
    /// Base unit "ms"; "s" scales by 1000, "m" by 60000
    Millis,
}

impl UnitFamily {
    /// The label of the family's base unit.
    pub fn base_unit(&self) -> &'static str {
        match self {
            UnitFamily::Bits => "b",
            UnitFamily::Bytes => "B",
            UnitFamily::Seconds => "s",
            UnitFamily::Millis => "ms",
        }
    }

    /// Resolve a suffix to its multiplicative scale factor relative to the
    /// family's base unit. Suffixes are case-sensitive; the base-unit label
    /// itself resolves to a factor of 1.
    ///
    /// # Examples
    /// ```
    /// use iperfkit::units::UnitFamily;
    ///
    /// assert_eq!(UnitFamily::Bits.scale("K"), Ok(1024));
    /// assert_eq!(UnitFamily::Seconds.scale("m"), Ok(60));
    /// assert!(UnitFamily::Bits.scale("k").is_err());
    /// ```
    pub fn scale(&self, suffix: &str) -> Result<u64, UnitError> {
        if suffix == self.base_unit() {
            return Ok(1);
        }
        let factor = match (self, suffix) {
            (UnitFamily::Bits | UnitFamily::Bytes, "K") => 1024,
            (UnitFamily::Bits | UnitFamily::Bytes, "M") => 1024 * 1024,
            (UnitFamily::Bits | UnitFamily::Bytes, "G") => 1024 * 1024 * 1024,
            (UnitFamily::Bits | UnitFamily::Bytes, "T") => 1024 * 1024 * 1024 * 1024,
            (UnitFamily::Seconds, "m") => 60,
            (UnitFamily::Millis, "s") => 1000,
            (UnitFamily::Millis, "m") => 60_000,
            _ => {
                return Err(UnitError::UnknownSuffix {
                    family: *self,
                    suffix: suffix.to_string(),
                })
            }
        };
        Ok(factor)
    }
}

impl fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitFamily::Bits => "bits",
            UnitFamily::Bytes => "bytes",
            UnitFamily::Seconds => "seconds",
            UnitFamily::Millis => "milliseconds",
        };
        write!(f, "{}", name)
    }
}

/// Errors that can occur while parsing or converting a quantity
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    #[error("suffix '{suffix}' is not a valid {family} unit")]
    UnknownSuffix { family: UnitFamily, suffix: String },

    #[error("'{text}' is not a number with an optional unit suffix")]
    Malformed { text: String },

    #[error("'{text}' overflows when converted to base units")]
    Overflow { text: String },
}

/// A magnitude with an optional unit suffix, not yet resolved to a family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    pub magnitude: u64,
    pub suffix: Option<String>,
}

impl Quantity {
    /// Parse a quantity string by splitting trailing alphabetic suffix
    /// characters from the leading numeric magnitude. A bare integer is
    /// always valid and implies the base unit.
    ///
    /// # Examples
    /// ```
    /// use iperfkit::units::Quantity;
    ///
    /// assert_eq!(Quantity::parse("1800").unwrap().suffix, None);
    /// assert_eq!(Quantity::parse("1K").unwrap().suffix.as_deref(), Some("K"));
    /// assert!(Quantity::parse("abc").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, UnitError> {
        let text = text.trim();
        let split = text
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_alphabetic())
            .last()
            .map(|(i, _)| i)
            .unwrap_or(text.len());

        let (number, suffix) = text.split_at(split);
        let magnitude = number.parse::<u64>().map_err(|_| UnitError::Malformed {
            text: text.to_string(),
        })?;

        Ok(Quantity {
            magnitude,
            suffix: if suffix.is_empty() {
                None
            } else {
                Some(suffix.to_string())
            },
        })
    }

    /// Convert to the base-unit magnitude of the given family. An absent
    /// suffix implies the base unit; a present suffix must belong to the
    /// family.
    pub fn to_base(&self, family: UnitFamily) -> Result<u64, UnitError> {
        let factor = match &self.suffix {
            Some(suffix) => family.scale(suffix)?,
            None => 1,
        };
        self.magnitude
            .checked_mul(factor)
            .ok_or_else(|| UnitError::Overflow {
                text: format!("{}{}", self.magnitude, self.suffix.as_deref().unwrap_or("")),
            })
    }
}
