//! Clock frequencies with unit parsing and display.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A clock frequency stored as an integer number of Hertz.
///
/// Parses from strings like `"50MHz"`, `"25 MHz"`, `"12.5MHz"`, `"100kHz"` and
/// bare integers (interpreted as Hz). Fractional Hertz are rounded to the
/// nearest integer since every consumer counts whole clock cycles.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u64);

impl Frequency {
    /// Creates a frequency from a value in Hertz.
    pub const fn from_hz(hz: u64) -> Self {
        Self(hz)
    }

    /// Creates a frequency from a whole number of megahertz.
    pub const fn from_mhz(mhz: u64) -> Self {
        Self(mhz * 1_000_000)
    }

    /// Returns the frequency in Hertz.
    pub const fn hz(self) -> u64 {
        self.0
    }

    /// Returns the frequency in megahertz.
    pub fn mhz(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Returns `true` for a zero frequency.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of whole cycles of this clock in `seconds`, rounded
    /// to the nearest cycle.
    pub fn cycles_in(self, seconds: f64) -> u64 {
        (self.0 as f64 * seconds).round() as u64
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hz = self.0;
        if hz >= 1_000_000_000 {
            write!(f, "{}GHz", hz as f64 / 1_000_000_000.0)
        } else if hz >= 1_000_000 {
            write!(f, "{}MHz", hz as f64 / 1_000_000.0)
        } else if hz >= 1_000 {
            write!(f, "{}kHz", hz as f64 / 1_000.0)
        } else {
            write!(f, "{hz}Hz")
        }
    }
}

/// Error returned when a frequency string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid frequency: '{input}'")]
pub struct ParseFrequencyError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseFrequencyError {
            input: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let (number, scale) = [("ghz", 1e9), ("mhz", 1e6), ("khz", 1e3), ("hz", 1.0)]
            .iter()
            .find_map(|(suffix, scale)| lower.strip_suffix(suffix).map(|n| (n, *scale)))
            .unwrap_or((lower.as_str(), 1.0));

        let value: f64 = number.trim().parse().map_err(|_| err())?;
        let hz = value * scale;
        if !hz.is_finite() || hz < 0.0 || hz > u64::MAX as f64 {
            return Err(err());
        }
        Ok(Frequency(hz.round() as u64))
    }
}

impl Serialize for Frequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

/// Accepts either an integer number of Hertz or a string with a unit suffix.
impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FrequencyVisitor;

        impl Visitor<'_> for FrequencyVisitor {
            type Value = Frequency;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a frequency in Hz or a string such as \"50MHz\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(Frequency(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map(Frequency)
                    .map_err(|_| E::custom(format!("frequency must not be negative, got {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(FrequencyVisitor)
    }
}
