//! Wire value types shared by all shapes

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::ValidationError;

// ============================================================================
// TIMESTAMP
// ============================================================================

/// UTC instant with millisecond precision.
///
/// Encoded on the wire as epoch seconds: an integer when the instant falls
/// on a whole second, a fractional number otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    pub fn from_epoch_seconds(seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(seconds, 0).map(Self)
    }

    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    /// Builds an instant from fractional epoch seconds, rounded to the millisecond.
    pub fn from_fractional_seconds(seconds: f64) -> Option<Self> {
        if !seconds.is_finite() {
            return None;
        }
        Self::from_epoch_millis((seconds * 1000.0).round() as i64)
    }

    pub fn parse_rfc3339(input: &str) -> Result<Self, ValidationError> {
        DateTime::parse_from_rfc3339(input)
            .map(|parsed| Self::from(parsed.with_timezone(&Utc)))
            .map_err(|e| ValidationError::invalid("Timestamp", format!("'{}': {}", input, e)))
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn epoch_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        let millis_only = (value.nanosecond() / 1_000_000) * 1_000_000;
        Self(value.with_nanosecond(millis_only).unwrap_or(value))
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = self.epoch_millis();
        if millis % 1000 == 0 {
            serializer.serialize_i64(millis / 1000)
        } else {
            serializer.serialize_f64(millis as f64 / 1000.0)
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("epoch seconds as a number, or an RFC 3339 string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Timestamp, E> {
        Timestamp::from_epoch_seconds(value)
            .ok_or_else(|| E::custom(format!("epoch seconds out of range: {}", value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Timestamp, E> {
        let seconds = i64::try_from(value)
            .map_err(|_| E::custom(format!("epoch seconds out of range: {}", value)))?;
        self.visit_i64(seconds)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Timestamp, E> {
        Timestamp::from_fractional_seconds(value)
            .ok_or_else(|| E::custom(format!("epoch seconds out of range: {}", value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Timestamp, E> {
        Timestamp::parse_rfc3339(value).map_err(E::custom)
    }
}

// ============================================================================
// DOUBLE
// ============================================================================

/// 64-bit float with bitwise equality, so shapes carrying measurements can
/// still be `Eq + Hash`.
///
/// JSON has no NaN or infinity: serializing one writes `null`, which reads
/// back as an unset field.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Double(f64);

impl Double {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Double {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Double {}

impl Hash for Double {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f64> for Double {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<i32> for Double {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl From<Double> for f64 {
    fn from(value: Double) -> Self {
        value.0
    }
}

impl fmt::Display for Double {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

// ============================================================================
// SENSITIVE
// ============================================================================

/// Text shown in place of a sensitive value in `Debug` and debug strings.
pub const REDACTED: &str = "*** Sensitive Data Redacted ***";

/// A string that goes over the wire as-is but never into logs.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sensitive(String);

impl Sensitive {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Sensitive {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Sensitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_second_serializes_as_integer() {
        let ts = Timestamp::from_epoch_seconds(1_700_000_000).unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1700000000");
    }

    #[test]
    fn test_sub_second_serializes_as_fraction() {
        let ts = Timestamp::from_epoch_millis(1_700_000_000_250).unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1700000000.25");
    }

    #[test]
    fn test_deserializes_all_number_forms() {
        let from_int: Timestamp = serde_json::from_str("1700000000").unwrap();
        let from_float: Timestamp = serde_json::from_str("1700000000.5").unwrap();
        let from_text: Timestamp = serde_json::from_str("\"2023-11-14T22:13:20Z\"").unwrap();
        assert_eq!(from_int.epoch_seconds(), 1_700_000_000);
        assert_eq!(from_float.epoch_millis(), 1_700_000_000_500);
        assert_eq!(from_text, from_int);
    }

    #[test]
    fn test_from_datetime_truncates_to_millis() {
        let dt = DateTime::from_timestamp(10, 123_456_789).unwrap();
        let ts = Timestamp::from(dt);
        assert_eq!(ts.epoch_millis(), 10_123);
        assert_eq!(ts, Timestamp::from_epoch_millis(10_123).unwrap());
    }

    #[test]
    fn test_display_is_rfc3339() {
        let ts = Timestamp::from_epoch_seconds(0).unwrap();
        assert_eq!(ts.to_string(), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_double_bitwise_equality() {
        assert_eq!(Double::new(f64::NAN), Double::new(f64::NAN));
        assert_ne!(Double::new(0.0), Double::new(-0.0));
        assert_eq!(Double::from(3), Double::new(3.0));
        assert_eq!(Double::new(3.0).to_string(), "3.0");
    }

    #[test]
    fn test_sensitive_hides_value_but_serializes_it() {
        let secret = Sensitive::new("hunter2");
        assert_eq!(format!("{:?}", secret), REDACTED);
        assert_eq!(secret.expose(), "hunter2");
        assert_eq!(serde_json::to_string(&secret).unwrap(), r#""hunter2""#);
    }

    #[test]
    fn test_non_finite_double_serializes_as_null() {
        assert_eq!(serde_json::to_string(&Double::new(f64::NAN)).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Double::new(f64::INFINITY)).unwrap(), "null");
    }
}
