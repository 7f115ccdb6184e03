//! Tenant business-date handling
//!
//! Document numbering runs per (tenant, document type, business date); the
//! business date is the calendar date in the tenant's timezone, not UTC.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Timezone wrapper for tenant jurisdictions
///
/// Wraps chrono_tz::Tz with string-based serde support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// The calendar date of the given instant in this timezone
    pub fn business_date(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_business_date_rolls_with_timezone() {
        // 22:30 UTC is already the next day in Istanbul (UTC+3)
        let tz = Timezone::new(chrono_tz::Europe::Istanbul);
        let utc = Utc.with_ymd_and_hms(2026, 8, 5, 22, 30, 0).unwrap();
        assert_eq!(
            tz.business_date(utc),
            NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
        );
    }

    #[test]
    fn test_utc_business_date_is_utc_date() {
        let tz = Timezone::default();
        let utc = Utc.with_ymd_and_hms(2026, 8, 5, 22, 30, 0).unwrap();
        assert_eq!(
            tz.business_date(utc),
            NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
        );
    }

    #[test]
    fn test_timezone_serde_round_trip() {
        let tz = Timezone::new(chrono_tz::Europe::Istanbul);
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"Europe/Istanbul\"");
        let back: Timezone = serde_json::from_str(&json).unwrap();
        assert_eq!(tz, back);
    }
}
