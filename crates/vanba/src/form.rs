//! Birth form reading and validation.
//!
//! Reading never fails: every field that cannot be interpreted becomes
//! `None` (the "not a number" state). Validation then rejects the whole
//! submission if anything is missing, so a partial request is never sent.

use chrono::{DateTime, NaiveDate};
use vanba_config::BirthDefaults;

use crate::error::{Result, VanbaError, INVALID_BIRTH_DETAILS, INVALID_DATE_OF_BIRTH};
use crate::model::BirthInput;

/// Raw field values as typed by the user (`dob`, `tob`, `lat`, `lng`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BirthForm {
    pub dob: String,
    pub tob: String,
    pub lat: String,
    pub lng: String,
}

impl BirthForm {
    pub fn new(
        dob: impl Into<String>,
        tob: impl Into<String>,
        lat: impl Into<String>,
        lng: impl Into<String>,
    ) -> Self {
        Self {
            dob: dob.into(),
            tob: tob.into(),
            lat: lat.into(),
            lng: lng.into(),
        }
    }

    pub fn read(&self, defaults: &FormDefaults) -> RawBirthData {
        let (hour, minute) = parse_time(&self.tob);
        RawBirthData {
            date: parse_date(&self.dob),
            hour,
            minute,
            latitude: parse_coordinate(&self.lat, defaults.latitude),
            longitude: parse_coordinate(&self.lng, defaults.longitude),
            ayanamsa: defaults.ayanamsa.clone(),
        }
    }
}

/// Values applied when the form leaves a field blank.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDefaults {
    pub latitude: f64,
    pub longitude: f64,
    pub ayanamsa: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            latitude: vanba_config::DEFAULT_LATITUDE,
            longitude: vanba_config::DEFAULT_LONGITUDE,
            ayanamsa: vanba_config::DEFAULT_AYANAMSA.to_string(),
        }
    }
}

impl From<&BirthDefaults> for FormDefaults {
    fn from(birth: &BirthDefaults) -> Self {
        Self {
            latitude: birth.latitude,
            longitude: birth.longitude,
            ayanamsa: birth.ayanamsa.clone(),
        }
    }
}

/// Parsed but unvalidated form data. `None` marks an unusable field.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBirthData {
    pub date: Option<NaiveDate>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ayanamsa: String,
}

pub fn validate(raw: RawBirthData) -> Result<BirthInput> {
    let date = raw
        .date
        .ok_or_else(|| VanbaError::validation(INVALID_DATE_OF_BIRTH))?;
    match (raw.hour, raw.minute, raw.latitude, raw.longitude) {
        (Some(hour), Some(minute), Some(latitude), Some(longitude)) => Ok(BirthInput {
            date,
            hour,
            minute,
            latitude,
            longitude,
            ayanamsa: raw.ayanamsa,
        }),
        _ => Err(VanbaError::validation(INVALID_BIRTH_DETAILS)),
    }
}

pub fn read_birth_input(form: &BirthForm, defaults: &FormDefaults) -> Result<BirthInput> {
    validate(form.read(defaults))
}

/// `YYYY-MM-DD` as produced by a date input, or an RFC 3339 timestamp.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// `HH:MM` (seconds, if present, are ignored). A missing minute is 0 and a
/// blank time is midnight.
fn parse_time(value: &str) -> (Option<u32>, Option<u32>) {
    let value = value.trim();
    if value.is_empty() {
        return (Some(0), Some(0));
    }
    let mut parts = value.split(':');
    let hour = parts
        .next()
        .and_then(|h| h.trim().parse::<u32>().ok())
        .filter(|h| *h < 24);
    let minute = match parts.next() {
        None => Some(0),
        Some(m) => m.trim().parse::<u32>().ok().filter(|m| *m < 60),
    };
    (hour, minute)
}

fn parse_coordinate(value: &str, default: f64) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Some(default);
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("08:30"), (Some(8), Some(30)));
        assert_eq!(parse_time("23:59:59"), (Some(23), Some(59)));
        assert_eq!(parse_time("7"), (Some(7), Some(0)));
        assert_eq!(parse_time(""), (Some(0), Some(0)));
        assert_eq!(parse_time("   "), (Some(0), Some(0)));
        assert_eq!(parse_time("24:00"), (None, Some(0)));
        assert_eq!(parse_time("10:75"), (Some(10), None));
        assert_eq!(parse_time("ab:cd"), (None, None));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("1990-05-14"),
            NaiveDate::from_ymd_opt(1990, 5, 14)
        );
        assert_eq!(
            parse_date("1990-05-14T08:30:00Z"),
            NaiveDate::from_ymd_opt(1990, 5, 14)
        );
        assert_eq!(parse_date("1990-02-30"), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("", 28.6139), Some(28.6139));
        assert_eq!(parse_coordinate("  ", 1.0), Some(1.0));
        assert_eq!(parse_coordinate("0", 28.6139), Some(0.0));
        assert_eq!(parse_coordinate("-33.87", 0.0), Some(-33.87));
        assert_eq!(parse_coordinate("north", 0.0), None);
        assert_eq!(parse_coordinate("NaN", 0.0), None);
        assert_eq!(parse_coordinate("inf", 0.0), None);
    }
}
