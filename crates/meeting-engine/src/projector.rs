//! Rendering one authoritative meeting time into other participants' zones.
//!
//! Projections are derived values: they are recomputed from the meeting's
//! `(date, time, zone)` on every call and never stored, so a meeting rendered
//! long after booking still reflects the DST rules for its own date.

use chrono::{DateTime, NaiveDate, NaiveTime, Offset, Timelike};
use chrono_tz::Tz;
use serde::Serialize;

use crate::meeting::MeetingInstant;
use crate::policy::WorkingHoursPolicy;
use crate::zone::{localize, TimeZoneId};

/// A meeting's start as seen on a participant's wall clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedTime {
    /// The participant's zone.
    pub zone: TimeZoneId,
    /// City label for the zone (falls back to the identifier).
    pub city: &'static str,
    /// Local calendar date of the meeting start in `zone`.
    pub local_date: NaiveDate,
    /// Local wall-clock time of the meeting start in `zone`.
    pub local_time: NaiveTime,
    /// 12-hour display form, e.g. `"02:00 PM"`.
    pub display: String,
    /// Days between `local_date` and the authoritative date (`+1` = next day).
    pub day_shift: i64,
    /// UTC offset in effect at the meeting start (e.g. `"-04:00"`).
    pub utc_offset: String,
    /// Whether the local start hour falls inside the working-hours policy.
    pub is_within_working_hours: bool,
}

/// Project a meeting's start into `target`.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use meeting_engine::meeting::MeetingInstant;
/// use meeting_engine::projector::project;
/// use meeting_engine::WorkingHoursPolicy;
///
/// let meeting = MeetingInstant::new(
///     NaiveDate::from_ymd_opt(2026, 7, 15).unwrap(),
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     "America/New_York".parse().unwrap(),
///     60,
/// )
/// .unwrap();
///
/// let london = project(&meeting, &"Europe/London".parse().unwrap(), &WorkingHoursPolicy::default());
/// assert_eq!(london.display, "02:00 PM");
/// assert!(london.is_within_working_hours);
/// ```
pub fn project(
    meeting: &MeetingInstant,
    target: &TimeZoneId,
    policy: &WorkingHoursPolicy,
) -> ProjectedTime {
    project_civil(meeting.date(), meeting.time(), meeting.zone(), target, policy)
}

/// Project a meeting into each of `targets`, in order.
pub fn project_all(
    meeting: &MeetingInstant,
    targets: &[TimeZoneId],
    policy: &WorkingHoursPolicy,
) -> Vec<ProjectedTime> {
    targets
        .iter()
        .map(|target| project(meeting, target, policy))
        .collect()
}

/// Project a civil `(date, time)` read in `authoritative` into `target`.
///
/// Used for proposed times that are not yet a booked [`MeetingInstant`].
pub fn project_civil(
    date: NaiveDate,
    time: NaiveTime,
    authoritative: &TimeZoneId,
    target: &TimeZoneId,
    policy: &WorkingHoursPolicy,
) -> ProjectedTime {
    let start = localize(date, time, authoritative);
    let local = start.with_timezone(&target.tz());
    let local_date = local.date_naive();

    ProjectedTime {
        zone: *target,
        city: target.display_name(),
        local_date,
        local_time: local.time(),
        display: local.format("%I:%M %p").to_string(),
        day_shift: (local_date - date).num_days(),
        utc_offset: format_utc_offset(&local),
        is_within_working_hours: policy.contains_hour(local.hour()),
    }
}

/// Format the UTC offset as a string (e.g., "-05:00", "+05:30").
fn format_utc_offset(dt: &DateTime<Tz>) -> String {
    let offset_secs = dt.offset().fix().local_minus_utc();
    let sign = if offset_secs >= 0 { "+" } else { "-" };
    let abs_secs = offset_secs.unsigned_abs();
    let hours = abs_secs / 3600;
    let minutes = (abs_secs % 3600) / 60;
    format!("{sign}{hours:02}:{minutes:02}")
}
