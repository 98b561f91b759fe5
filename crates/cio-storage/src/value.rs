//! Typed values held by a storage domain.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use cio_core::{DateTimeExt, from_seconds_since_epoch};
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// A single stored value.
///
/// Serialized externally tagged, e.g. `{"string":"abc"}` or
/// `{"date":1654873363.101}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoredValue {
    /// UTF-8 text.
    String(String),
    /// Signed integer.
    Integer(i64),
    /// Double-precision float.
    Double(f64),
    /// Point in time as seconds since the Unix epoch.
    Date(f64),
}

/// The kind of a [`StoredValue`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`StoredValue::String`].
    String,
    /// [`StoredValue::Integer`].
    Integer,
    /// [`StoredValue::Double`].
    Double,
    /// [`StoredValue::Date`].
    Date,
}

impl StoredValue {
    /// Wrap a timestamp.
    #[must_use]
    pub fn from_date(date: DateTime<Utc>) -> Self {
        Self::Date(date.seconds_since_epoch())
    }

    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Integer(_) => ValueKind::Integer,
            Self::Double(_) => ValueKind::Double,
            Self::Date(_) => ValueKind::Date,
        }
    }

    /// The text, if this is a string.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, if this is an integer.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The number as `f64`. Integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The timestamp, if this is a representable date.
    #[must_use]
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(seconds) => from_seconds_since_epoch(*seconds),
            _ => None,
        }
    }

    /// Parse user input as a value of `kind`.
    ///
    /// Dates accept RFC 3339 (`2024-01-01T00:00:00Z`) or seconds since the
    /// Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] if `raw` is not a valid value
    /// of `kind`.
    pub fn parse(kind: ValueKind, raw: &str) -> StorageResult<Self> {
        let invalid = |what: &str| StorageError::Serialization(format!("'{raw}' is not {what}"));
        match kind {
            ValueKind::String => Ok(Self::String(raw.to_owned())),
            ValueKind::Integer => raw
                .parse::<i64>()
                .map(Self::Integer)
                .map_err(|_| invalid("an integer")),
            ValueKind::Double => raw
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite())
                .map(Self::Double)
                .ok_or_else(|| invalid("a finite number")),
            ValueKind::Date => {
                if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
                    return Ok(Self::from_date(date.with_timezone(&Utc)));
                }
                raw.parse::<f64>()
                    .ok()
                    .filter(|s| from_seconds_since_epoch(*s).is_some())
                    .map(Self::Date)
                    .ok_or_else(|| invalid("an RFC 3339 date or epoch seconds"))
            },
        }
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::Date(seconds) => match from_seconds_since_epoch(*seconds) {
                Some(date) => write!(f, "{}", date.to_rfc3339()),
                None => write!(f, "{seconds}"),
            },
        }
    }
}

impl ValueKind {
    /// Lowercase name, matching the serialized tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "integer" | "int" => Ok(Self::Integer),
            "double" => Ok(Self::Double),
            "date" => Ok(Self::Date),
            other => Err(StorageError::Serialization(format!(
                "unknown value kind '{other}'; expected one of: string, integer, double, date"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_form_is_externally_tagged() {
        let json = serde_json::to_string(&StoredValue::String("abc".into())).unwrap();
        assert_eq!(json, r#"{"string":"abc"}"#);
        let json = serde_json::to_string(&StoredValue::Integer(9_968_686)).unwrap();
        assert_eq!(json, r#"{"integer":9968686}"#);
        let parsed: StoredValue = serde_json::from_str(r#"{"date":1654873363.5}"#).unwrap();
        assert_eq!(parsed, StoredValue::Date(1_654_873_363.5));
    }

    #[test]
    fn test_accessors_match_kind() {
        let s = StoredValue::String("x".into());
        assert_eq!(s.as_string(), Some("x"));
        assert_eq!(s.as_integer(), None);
        assert_eq!(s.as_double(), None);
        assert_eq!(s.as_date(), None);
        assert_eq!(s.kind(), ValueKind::String);
    }

    #[test]
    fn test_double_widens_integer() {
        assert_eq!(StoredValue::Integer(42).as_double(), Some(42.0));
        assert_eq!(StoredValue::Double(1.5).as_integer(), None);
    }

    #[test]
    fn test_date_round_trip_whole_seconds() {
        let now = Utc::now();
        let restored = StoredValue::from_date(now).as_date().unwrap();
        assert!((restored.timestamp() - now.timestamp()).abs() <= 1);
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!(
            StoredValue::parse(ValueKind::Integer, "12").unwrap(),
            StoredValue::Integer(12)
        );
        assert!(StoredValue::parse(ValueKind::Integer, "1.2").is_err());
        assert!(StoredValue::parse(ValueKind::Double, "NaN").is_err());
        let date = StoredValue::parse(ValueKind::Date, "2022-06-10T15:02:43Z").unwrap();
        assert_eq!(date.as_date().unwrap().timestamp(), 1_654_873_363);
        let date = StoredValue::parse(ValueKind::Date, "1654873363").unwrap();
        assert_eq!(date, StoredValue::Date(1_654_873_363.0));
        assert!(StoredValue::parse(ValueKind::Date, "yesterday").is_err());
    }

    #[test]
    fn test_value_kind_from_str() {
        assert_eq!("int".parse::<ValueKind>().unwrap(), ValueKind::Integer);
        assert_eq!("date".parse::<ValueKind>().unwrap(), ValueKind::Date);
        assert!("bool".parse::<ValueKind>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(StoredValue::Integer(3).to_string(), "3");
        assert_eq!(
            StoredValue::Date(0.0).to_string(),
            "1970-01-01T00:00:00+00:00"
        );
    }
}
