//! Working-hours overlap across a set of timezones.
//!
//! Each participant zone's working interval is translated into the reference
//! zone's local hours using the offsets in effect at local noon on the given
//! date in the reference zone, then all intervals are intersected. Noon keeps
//! the anchor clear of the skipped and repeated hours that DST transitions
//! create around midnight.

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::error::{Result, ScheduleError};
use crate::policy::WorkingHoursPolicy;
use crate::zone::{localize, relative_offset_hours, TimeZoneId};

/// The common working window of a zone set, expressed in a reference zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlapWindow {
    /// The calendar date the window was computed for.
    pub date: NaiveDate,
    /// The zone whose local hours the window is expressed in.
    pub reference: TimeZoneId,
    /// First whole hour of the window, clamped to `0..=24`.
    pub start_hour: u32,
    /// End of the window rounded down to a whole hour, clamped to `start_hour..=24`.
    pub end_hour: u32,
    /// Unclamped intersection start, in reference-zone hours (may be negative
    /// or fractional).
    pub raw_start: f64,
    /// Unclamped intersection end, in reference-zone hours (may exceed 24).
    pub raw_end: f64,
    /// `raw_start < raw_end`. Derived from the unclamped bounds, so a window
    /// that is narrower than a whole hour still counts.
    pub has_overlap: bool,
}

impl OverlapWindow {
    /// The first whole hour of the window, offered as the default meeting time.
    ///
    /// `None` when there is no overlap or no whole hour fits inside the
    /// reference day.
    pub fn suggested_start(&self) -> Option<NaiveTime> {
        if self.has_overlap && self.start_hour < self.end_hour {
            NaiveTime::from_hms_opt(self.start_hour, 0, 0)
        } else {
            None
        }
    }
}

/// Compute the working-hours overlap of `zones` on `date`, in `reference` hours.
///
/// A zone set with a single distinct member always yields the full policy
/// window with `has_overlap = true`.
///
/// # Errors
///
/// Returns [`ScheduleError::EmptyZoneSet`] if `zones` is empty.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use meeting_engine::overlap::compute_overlap;
/// use meeting_engine::{TimeZoneId, WorkingHoursPolicy};
///
/// let ny: TimeZoneId = "America/New_York".parse().unwrap();
/// let london: TimeZoneId = "Europe/London".parse().unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
///
/// let window = compute_overlap(date, &[ny, london], &ny, &WorkingHoursPolicy::default()).unwrap();
/// // London 09:00-17:00 GMT is 04:00-12:00 in New York (EST)
/// assert!(window.has_overlap);
/// assert_eq!((window.start_hour, window.end_hour), (9, 12));
/// ```
pub fn compute_overlap(
    date: NaiveDate,
    zones: &[TimeZoneId],
    reference: &TimeZoneId,
    policy: &WorkingHoursPolicy,
) -> Result<OverlapWindow> {
    let (first, rest) = zones.split_first().ok_or(ScheduleError::EmptyZoneSet)?;

    let policy_start = f64::from(policy.start_hour());
    let policy_end = f64::from(policy.end_hour());

    if rest.iter().all(|zone| zone == first) {
        return Ok(OverlapWindow {
            date,
            reference: *reference,
            start_hour: policy.start_hour(),
            end_hour: policy.end_hour(),
            raw_start: policy_start,
            raw_end: policy_end,
            has_overlap: true,
        });
    }

    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
    let anchor = localize(date, noon, reference).with_timezone(&Utc);

    let translate = |zone: &TimeZoneId| {
        let relative = relative_offset_hours(anchor, zone, reference);
        (policy_start - relative, policy_end - relative)
    };

    let (mut raw_start, mut raw_end) = translate(first);
    for zone in rest {
        let (start, end) = translate(zone);
        raw_start = raw_start.max(start);
        raw_end = raw_end.min(end);
    }

    let has_overlap = raw_start < raw_end;
    let start_hour = raw_start.ceil().clamp(0.0, 24.0) as u32;
    let end_hour = (raw_end.floor().clamp(0.0, 24.0) as u32).max(start_hour);

    tracing::debug!(
        %date,
        %reference,
        zones = zones.len(),
        raw_start,
        raw_end,
        has_overlap,
        "computed working-hours overlap"
    );

    Ok(OverlapWindow {
        date,
        reference: *reference,
        start_hour,
        end_hour,
        raw_start,
        raw_end,
        has_overlap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(name: &str) -> TimeZoneId {
        name.parse().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn policy() -> WorkingHoursPolicy {
        WorkingHoursPolicy::default()
    }

    #[test]
    fn test_empty_zone_set_is_an_error() {
        let result = compute_overlap(date(2026, 1, 14), &[], &zone("UTC"), &policy());
        assert_eq!(result.unwrap_err(), ScheduleError::EmptyZoneSet);
    }

    #[test]
    fn test_single_zone_returns_full_policy_window() {
        let tokyo = zone("Asia/Tokyo");
        let w = compute_overlap(date(2026, 1, 14), &[tokyo], &zone("America/New_York"), &policy())
            .unwrap();
        assert!(w.has_overlap);
        assert_eq!((w.start_hour, w.end_hour), (9, 17));
    }

    #[test]
    fn test_duplicate_zone_counts_as_single() {
        let paris = zone("Europe/Paris");
        let w = compute_overlap(date(2026, 1, 14), &[paris, paris], &paris, &policy()).unwrap();
        assert!(w.has_overlap);
        assert_eq!((w.start_hour, w.end_hour), (9, 17));
    }

    #[test]
    fn test_london_paris_share_most_of_the_day() {
        // Paris is 1h ahead of London year-round → Paris 9-17 = London 8-16
        let london = zone("Europe/London");
        let w = compute_overlap(
            date(2026, 2, 10),
            &[london, zone("Europe/Paris")],
            &london,
            &policy(),
        )
        .unwrap();
        assert!(w.has_overlap);
        assert_eq!((w.start_hour, w.end_hour), (9, 16));
    }

    #[test]
    fn test_tokyo_new_york_have_no_overlap() {
        // January: Tokyo is 14h ahead → Tokyo 9-17 = New York 19:00 (prev day) to 03:00
        let ny = zone("America/New_York");
        let w = compute_overlap(date(2026, 1, 14), &[zone("Asia/Tokyo"), ny], &ny, &policy())
            .unwrap();
        assert!(!w.has_overlap);
        assert_eq!(w.raw_start, 9.0);
        assert_eq!(w.raw_end, 3.0);
        assert_eq!(w.suggested_start(), None);
    }

    #[test]
    fn test_overlap_shifts_between_us_and_uk_dst_changes() {
        let ny = zone("America/New_York");
        let london = zone("Europe/London");
        // Jan: London 5h ahead → London 9-17 = NY 4-12
        let jan = compute_overlap(date(2026, 1, 14), &[ny, london], &ny, &policy()).unwrap();
        assert_eq!((jan.start_hour, jan.end_hour), (9, 12));
        // Mar 16: US already on EDT, UK not yet on BST → 4h ahead → NY 5-13
        let mar = compute_overlap(date(2026, 3, 16), &[ny, london], &ny, &policy()).unwrap();
        assert_eq!((mar.start_hour, mar.end_hour), (9, 13));
    }

    #[test]
    fn test_half_hour_zone_keeps_fractional_raw_bounds() {
        // Kolkata is UTC+5:30; in London (GMT) its 9-17 is 03:30-11:30
        let london = zone("Europe/London");
        let w = compute_overlap(
            date(2026, 1, 14),
            &[london, zone("Asia/Kolkata")],
            &london,
            &policy(),
        )
        .unwrap();
        assert!(w.has_overlap);
        assert_eq!(w.raw_end, 11.5);
        assert_eq!((w.start_hour, w.end_hour), (9, 11));
        assert_eq!(w.suggested_start(), NaiveTime::from_hms_opt(9, 0, 0));
    }

    #[test]
    fn test_reference_zone_need_not_participate() {
        // In UTC (Jan): New York 9-17 = 14-22, London 9-17 = 9-17 → 14-17
        let w = compute_overlap(
            date(2026, 1, 14),
            &[zone("America/New_York"), zone("Europe/London")],
            &zone("UTC"),
            &policy(),
        )
        .unwrap();
        assert!(w.has_overlap);
        assert_eq!((w.start_hour, w.end_hour), (14, 17));
    }

    #[test]
    fn test_display_bounds_clamped_to_reference_day() {
        // Jan, reference New York: Tokyo (+14h) → [-5, 3], Sydney AEDT (+16h) → [-7, 1]
        let w = compute_overlap(
            date(2026, 1, 14),
            &[zone("Asia/Tokyo"), zone("Australia/Sydney")],
            &zone("America/New_York"),
            &policy(),
        )
        .unwrap();
        assert!(w.has_overlap);
        assert_eq!(w.raw_start, -5.0);
        assert_eq!(w.raw_end, 1.0);
        assert_eq!((w.start_hour, w.end_hour), (0, 1));
    }

    #[test]
    fn test_overlap_entirely_on_previous_reference_day_still_counts() {
        // Jan, reference Los Angeles: Tokyo (+17h) → [-8, 0], Sydney AEDT (+19h) → [-10, -2].
        // The shared hours fall on the previous LA day: nothing to display, but
        // the zones do share working hours.
        let w = compute_overlap(
            date(2026, 1, 14),
            &[zone("Asia/Tokyo"), zone("Australia/Sydney")],
            &zone("America/Los_Angeles"),
            &policy(),
        )
        .unwrap();
        assert_eq!((w.raw_start, w.raw_end), (-8.0, -2.0));
        assert!(w.has_overlap);
        assert_eq!((w.start_hour, w.end_hour), (0, 0));
        assert_eq!(w.suggested_start(), None);
    }

    #[test]
    fn test_exact_touching_intervals_do_not_overlap() {
        // Jan: Moscow (+3) is 8h ahead of New York → Moscow 9-17 = NY 1-9
        let ny = zone("America/New_York");
        let w = compute_overlap(date(2026, 1, 14), &[ny, zone("Europe/Moscow")], &ny, &policy())
            .unwrap();
        assert!(!w.has_overlap);
        assert_eq!((w.raw_start, w.raw_end), (9.0, 9.0));
    }

    #[test]
    fn test_custom_policy() {
        // 7-19 policy widens the New York / London window to NY 7-14
        let ny = zone("America/New_York");
        let p = WorkingHoursPolicy::new(7, 19).unwrap();
        let w = compute_overlap(date(2026, 1, 14), &[ny, zone("Europe/London")], &ny, &p).unwrap();
        assert_eq!((w.start_hour, w.end_hour), (7, 14));
    }
}
