//! Per-record field derivation
//!
//! Timestamp formatting and evidence thumbnail URLs. Everything here is a
//! pure function of its arguments.

use crate::error::{Error, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt::Display;

/// Shown when a timestamp has no calendar representation
pub const INVALID_TIME: &str = "--:--:--";
pub const INVALID_DATE: &str = "Invalid date";

const TIME_FORMAT: &str = "%H:%M:%S";
const DATE_FORMAT: &str = "%b %d, %Y";

/// Largest |ms| a calendar instant may have (±100,000,000 days)
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Time zone used for card times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    /// Host local zone
    Local,
    /// Fixed IANA zone
    Named(Tz),
}

impl DisplayZone {
    /// Resolve an optional IANA zone name (`None` → host local zone)
    pub fn from_name(name: Option<&str>) -> Result<Self> {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            None => Ok(DisplayZone::Local),
            Some(name) => name
                .parse::<Tz>()
                .map(DisplayZone::Named)
                .map_err(|_| Error::Config(format!("Unknown time zone: {}", name))),
        }
    }

    /// `HH:MM:SS` for an epoch-seconds timestamp
    pub fn format_time_of_day(&self, timestamp: f64) -> String {
        self.format(timestamp, TIME_FORMAT).unwrap_or_else(|| INVALID_TIME.to_string())
    }

    /// `Mon DD, YYYY` for an epoch-seconds timestamp
    pub fn format_date(&self, timestamp: f64) -> String {
        self.format(timestamp, DATE_FORMAT).unwrap_or_else(|| INVALID_DATE.to_string())
    }

    fn format(&self, timestamp: f64, pattern: &str) -> Option<String> {
        let instant = instant_from_epoch_secs(timestamp)?;
        Some(match self {
            DisplayZone::Local => format_in(instant, &Local, pattern),
            DisplayZone::Named(tz) => format_in(instant, tz, pattern),
        })
    }
}

impl Display for DisplayZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayZone::Local => write!(f, "local"),
            DisplayZone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

fn format_in<Z: TimeZone>(instant: DateTime<Utc>, zone: &Z, pattern: &str) -> String
where
    Z::Offset: Display,
{
    instant.with_timezone(zone).format(pattern).to_string()
}

/// `timestamp * 1000` ms since epoch, truncated toward zero
fn instant_from_epoch_secs(timestamp: f64) -> Option<DateTime<Utc>> {
    let millis = (timestamp * 1000.0).trunc();
    if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

/// Preview image file name for an evidence clip path
///
/// Backslashes count as separators, only the last segment is kept, and a
/// trailing `.mp4` becomes `.jpg`.
pub fn thumbnail_file_name(evidence_path: &str) -> String {
    let normalized = evidence_path.replace('\\', "/");
    let file_name = normalized.rsplit('/').next().unwrap_or_default();

    match file_name.strip_suffix(".mp4") {
        Some(stem) => format!("{}.jpg", stem),
        None => file_name.to_string(),
    }
}

/// `{content_base}/content/{file name}`
pub fn thumbnail_url(content_base: &str, evidence_path: &str) -> String {
    let file_name = thumbnail_file_name(evidence_path);
    format!(
        "{}/content/{}",
        content_base.trim_end_matches('/'),
        urlencoding::encode(&file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8000";

    fn utc() -> DisplayZone {
        DisplayZone::Named(chrono_tz::UTC)
    }

    #[test]
    fn test_windows_path_thumbnail() {
        assert_eq!(thumbnail_file_name(r"C:\evd\cam1_20240105.mp4"), "cam1_20240105.jpg");
        assert_eq!(
            thumbnail_url(BASE, r"C:\evd\cam1_20240105.mp4"),
            "http://localhost:8000/content/cam1_20240105.jpg"
        );
    }

    #[test]
    fn test_unix_path_thumbnail() {
        assert_eq!(
            thumbnail_url(BASE, "/data/evd/cam2.mp4"),
            "http://localhost:8000/content/cam2.jpg"
        );
    }

    #[test]
    fn test_mixed_separators() {
        assert_eq!(thumbnail_file_name(r"D:\runs/day1\clip.mp4"), "clip.jpg");
    }

    #[test]
    fn test_only_trailing_mp4_replaced() {
        assert_eq!(thumbnail_file_name("/evd/cam.mp4.backup.mp4"), "cam.mp4.backup.jpg");
        assert_eq!(thumbnail_file_name("/evd/cam.mp4.bak"), "cam.mp4.bak");
        assert_eq!(thumbnail_file_name("/evd/still.jpg"), "still.jpg");
    }

    #[test]
    fn test_bare_file_name() {
        assert_eq!(thumbnail_file_name("violation_test.mp4"), "violation_test.jpg");
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        assert_eq!(
            thumbnail_url("http://cdn.local/", "/x/a.mp4"),
            "http://cdn.local/content/a.jpg"
        );
    }

    #[test]
    fn test_file_name_is_percent_encoded() {
        assert_eq!(
            thumbnail_url(BASE, r"C:\evd\cam 1#2.mp4"),
            "http://localhost:8000/content/cam%201%232.jpg"
        );
    }

    #[test]
    fn test_time_and_date_in_utc() {
        let zone = utc();
        assert_eq!(zone.format_time_of_day(1_704_460_800.0), "13:20:00");
        assert_eq!(zone.format_date(1_704_460_800.0), "Jan 05, 2024");
    }

    #[test]
    fn test_time_in_named_zone() {
        let zone = DisplayZone::from_name(Some("Asia/Tokyo")).unwrap();
        assert_eq!(zone.format_time_of_day(1_704_460_800.0), "22:20:00");
        assert_eq!(zone.format_date(1_704_460_800.0), "Jan 05, 2024");
    }

    #[test]
    fn test_zone_can_change_date() {
        let zone = DisplayZone::from_name(Some("America/Los_Angeles")).unwrap();
        // 2024-01-05 03:00:00 UTC is still Jan 04 in Los Angeles
        assert_eq!(zone.format_date(1_704_423_600.0), "Jan 04, 2024");
        assert_eq!(zone.format_time_of_day(1_704_423_600.0), "19:00:00");
    }

    #[test]
    fn test_fractional_seconds_truncated() {
        assert_eq!(utc().format_time_of_day(1_704_460_800.999), "13:20:00");
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let zone = utc();
        let first = (zone.format_time_of_day(1_700_000_000.5), zone.format_date(1_700_000_000.5));
        let second = (zone.format_time_of_day(1_700_000_000.5), zone.format_date(1_700_000_000.5));
        assert_eq!(first, second);
    }

    #[test]
    fn test_unrepresentable_timestamp() {
        let zone = utc();
        assert_eq!(zone.format_time_of_day(f64::NAN), INVALID_TIME);
        assert_eq!(zone.format_date(f64::INFINITY), INVALID_DATE);
        assert_eq!(zone.format_date(1e300), INVALID_DATE);
    }

    #[test]
    fn test_zone_from_name() {
        assert_eq!(DisplayZone::from_name(None).unwrap(), DisplayZone::Local);
        assert_eq!(DisplayZone::from_name(Some("  ")).unwrap(), DisplayZone::Local);
        assert_eq!(DisplayZone::from_name(Some("UTC")).unwrap(), utc());
        assert!(matches!(
            DisplayZone::from_name(Some("Mars/Olympus")),
            Err(Error::Config(_))
        ));
    }
}
