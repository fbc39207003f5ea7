//! IANA timezone identifiers and DST-aware offset resolution.
//!
//! All offset arithmetic is delegated to the `chrono-tz` database. Offsets are
//! **east-positive**: `offset = local wall clock − UTC wall clock`, so
//! `Asia/Tokyo` is `+9` and `America/New_York` is `−5` in winter and `−4` in
//! summer. The relative offset of a zone against a reference zone is
//! `offset(zone) − offset(reference)`, and a zone-local hour `h` shows up in the
//! reference zone at `h − relative`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ScheduleError;

/// A recognized IANA timezone identifier (e.g. `"America/New_York"`).
///
/// Construction goes through [`FromStr`], which rejects unknown names with
/// [`ScheduleError::UnknownTimeZone`]. There is no fallback zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeZoneId(Tz);

impl TimeZoneId {
    pub const UTC: TimeZoneId = TimeZoneId(Tz::UTC);

    /// The canonical IANA name.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// The underlying `chrono-tz` zone.
    pub fn tz(&self) -> Tz {
        self.0
    }

    /// A human-friendly city label, falling back to the identifier itself.
    pub fn display_name(&self) -> &'static str {
        city_name(self).unwrap_or_else(|| self.name())
    }
}

impl From<Tz> for TimeZoneId {
    fn from(tz: Tz) -> Self {
        TimeZoneId(tz)
    }
}

impl FromStr for TimeZoneId {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Tz>()
            .map(TimeZoneId)
            .map_err(|_| ScheduleError::UnknownTimeZone(format!("'{}'", s)))
    }
}

impl fmt::Display for TimeZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialOrd for TimeZoneId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeZoneId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name().cmp(other.name())
    }
}

impl Serialize for TimeZoneId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TimeZoneId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Offset resolution ───────────────────────────────────────────────────────

/// UTC offset of `zone` at `instant`, in seconds (east-positive).
pub fn offset_seconds(instant: DateTime<Utc>, zone: &TimeZoneId) -> i32 {
    zone.0
        .offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc()
}

/// UTC offset of `zone` at `instant`, in hours (east-positive).
///
/// Fractional for zones such as `Asia/Kolkata` (`+5.5`).
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use meeting_engine::zone::{offset_hours, TimeZoneId};
///
/// let ny: TimeZoneId = "America/New_York".parse().unwrap();
/// let winter = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
/// let summer = Utc.with_ymd_and_hms(2026, 7, 15, 12, 0, 0).unwrap();
/// assert_eq!(offset_hours(winter, &ny), -5.0);
/// assert_eq!(offset_hours(summer, &ny), -4.0);
/// ```
pub fn offset_hours(instant: DateTime<Utc>, zone: &TimeZoneId) -> f64 {
    f64::from(offset_seconds(instant, zone)) / 3600.0
}

/// Offset of `zone` relative to `reference` at `instant`, in hours.
///
/// Positive when `zone` is ahead of `reference`.
pub fn relative_offset_hours(
    instant: DateTime<Utc>,
    zone: &TimeZoneId,
    reference: &TimeZoneId,
) -> f64 {
    f64::from(offset_seconds(instant, zone) - offset_seconds(instant, reference)) / 3600.0
}

/// Interpret a civil date and time as wall-clock time in `zone`.
///
/// Ambiguous times (the repeated hour when clocks fall back) resolve to the
/// earlier instant. Skipped times (the gap when clocks spring forward) are read
/// with the offset in effect before the gap, landing the same distance past it:
/// 02:30 on a US spring-forward day becomes 03:30 daylight time.
pub fn localize(date: NaiveDate, time: NaiveTime, zone: &TimeZoneId) -> DateTime<Tz> {
    let naive = date.and_time(time);
    match zone.0.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before_gap = zone
                .0
                .offset_from_utc_datetime(&(naive - chrono::Duration::hours(24)))
                .fix();
            let utc = naive - chrono::Duration::seconds(i64::from(before_gap.local_minus_utc()));
            Utc.from_utc_datetime(&utc).with_timezone(&zone.0)
        }
    }
}

// ── City names ──────────────────────────────────────────────────────────────

const CITY_NAMES: &[(&str, &str)] = &[
    ("America/New_York", "New York"),
    ("America/Los_Angeles", "Los Angeles"),
    ("America/Chicago", "Chicago"),
    ("America/Denver", "Denver"),
    ("America/Toronto", "Toronto"),
    ("America/Vancouver", "Vancouver"),
    ("America/Mexico_City", "Mexico City"),
    ("America/Sao_Paulo", "São Paulo"),
    ("America/Argentina/Buenos_Aires", "Buenos Aires"),
    ("Europe/London", "London"),
    ("Europe/Paris", "Paris"),
    ("Europe/Berlin", "Berlin"),
    ("Europe/Rome", "Rome"),
    ("Europe/Madrid", "Madrid"),
    ("Europe/Amsterdam", "Amsterdam"),
    ("Europe/Stockholm", "Stockholm"),
    ("Europe/Moscow", "Moscow"),
    ("Europe/Istanbul", "Istanbul"),
    ("Africa/Cairo", "Cairo"),
    ("Africa/Johannesburg", "Johannesburg"),
    ("Africa/Lagos", "Lagos"),
    ("Africa/Nairobi", "Nairobi"),
    ("Asia/Dubai", "Dubai"),
    ("Asia/Riyadh", "Riyadh"),
    ("Asia/Kolkata", "Mumbai"),
    ("Asia/Bangkok", "Bangkok"),
    ("Asia/Jakarta", "Jakarta"),
    ("Asia/Singapore", "Singapore"),
    ("Asia/Kuala_Lumpur", "Kuala Lumpur"),
    ("Asia/Manila", "Manila"),
    ("Asia/Hong_Kong", "Hong Kong"),
    ("Asia/Shanghai", "Shanghai"),
    ("Asia/Seoul", "Seoul"),
    ("Asia/Tokyo", "Tokyo"),
    ("Australia/Sydney", "Sydney"),
    ("Australia/Melbourne", "Melbourne"),
    ("Australia/Brisbane", "Brisbane"),
    ("Australia/Perth", "Perth"),
    ("Pacific/Auckland", "Auckland"),
    ("Pacific/Fiji", "Fiji"),
    ("Pacific/Honolulu", "Honolulu"),
];

/// City label for well-known zones.
pub fn city_name(zone: &TimeZoneId) -> Option<&'static str> {
    CITY_NAMES
        .iter()
        .find(|(name, _)| *name == zone.name())
        .map(|(_, city)| *city)
}
