//! Meeting records and their booking lifecycle.
//!
//! A meeting's "when" is the [`MeetingInstant`] alone: a civil date and time
//! read in one authoritative zone, plus a duration. Every other zone's time is
//! derived through [`crate::projector`]. Loosely typed input arrives as a
//! [`MeetingRequest`] and is validated into a [`Meeting`] before the engine
//! sees it.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::policy::WorkingHoursPolicy;
use crate::validator::{DayClassification, SchedulingValidator};
use crate::zone::{localize, TimeZoneId};

// ── MeetingInstant ──────────────────────────────────────────────────────────

/// The single source of truth for when a meeting happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInstant")]
pub struct MeetingInstant {
    date: NaiveDate,
    time: NaiveTime,
    zone: TimeZoneId,
    duration_minutes: u32,
}

#[derive(Deserialize)]
struct RawInstant {
    date: NaiveDate,
    time: NaiveTime,
    zone: TimeZoneId,
    duration_minutes: u32,
}

impl TryFrom<RawInstant> for MeetingInstant {
    type Error = ScheduleError;

    fn try_from(raw: RawInstant) -> Result<Self> {
        MeetingInstant::new(raw.date, raw.time, raw.zone, raw.duration_minutes)
    }
}

impl MeetingInstant {
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidMeeting`] if `duration_minutes` is zero.
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        zone: TimeZoneId,
        duration_minutes: u32,
    ) -> Result<Self> {
        if duration_minutes == 0 {
            return Err(ScheduleError::InvalidMeeting(
                "duration must be greater than zero minutes".to_string(),
            ));
        }
        Ok(Self {
            date,
            time,
            zone,
            duration_minutes,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// The authoritative zone the date and time are read in.
    pub fn zone(&self) -> &TimeZoneId {
        &self.zone
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Start instant in the authoritative zone.
    pub fn start(&self) -> DateTime<Tz> {
        localize(self.date, self.time, &self.zone)
    }

    /// End instant (start plus duration, in absolute time).
    pub fn end(&self) -> DateTime<Tz> {
        self.start() + chrono::Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start().with_timezone(&Utc)
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end().with_timezone(&Utc)
    }
}

// ── MeetingRequest ──────────────────────────────────────────────────────────

/// Attendees as submitted: either a list or one comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AttendeeInput {
    List(Vec<String>),
    Csv(String),
}

impl Default for AttendeeInput {
    fn default() -> Self {
        AttendeeInput::List(Vec::new())
    }
}

impl AttendeeInput {
    fn entries(&self) -> Vec<&str> {
        match self {
            AttendeeInput::List(items) => items.iter().map(String::as_str).collect(),
            AttendeeInput::Csv(s) => s.split(',').collect(),
        }
    }
}

/// An unvalidated meeting payload, as it arrives from a form or API body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeetingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
    /// `HH:MM` or `HH:MM:SS`, read in `timezone`.
    pub time: Option<String>,
    #[serde(alias = "duration")]
    pub duration_minutes: Option<i64>,
    #[serde(alias = "zone")]
    pub timezone: Option<String>,
    #[serde(default)]
    pub attendees: AttendeeInput,
    pub meeting_url: Option<String>,
}

impl MeetingRequest {
    /// Validate every field and build a [`Meeting`]. Does not apply the
    /// booking policy; see [`Meeting::book`].
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidMeeting`] naming the first bad field, or
    /// [`ScheduleError::UnknownTimeZone`] for an unrecognized zone.
    pub fn validate(&self) -> Result<Meeting> {
        let title = required(&self.title, "title")?.to_string();
        let date_str = required(&self.date, "date")?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            ScheduleError::InvalidMeeting(format!("date '{}': {}", date_str, e))
        })?;
        let time = parse_clock_time(required(&self.time, "time")?)?;
        let zone: TimeZoneId = required(&self.timezone, "timezone")?.parse()?;

        let duration = self
            .duration_minutes
            .ok_or_else(|| ScheduleError::InvalidMeeting("missing duration".to_string()))?;
        let duration = u32::try_from(duration).map_err(|_| {
            ScheduleError::InvalidMeeting(format!("duration {duration} is out of range"))
        })?;
        let instant = MeetingInstant::new(date, time, zone, duration)?;

        let attendees = normalize_attendees(&self.attendees)?;
        let meeting_url = non_empty(&self.meeting_url)
            .map(check_meeting_url)
            .transpose()?;

        Ok(Meeting {
            title,
            description: non_empty(&self.description),
            instant,
            attendees,
            meeting_url,
        })
    }
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ScheduleError::InvalidMeeting(format!("missing {name}")))
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A meeting link is written verbatim into calendar files, so it must be a
/// single token: no whitespace, no control characters.
fn check_meeting_url(url: String) -> Result<String> {
    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ScheduleError::InvalidMeeting(format!(
            "meeting url {:?} contains whitespace or control characters",
            url
        )));
    }
    Ok(url)
}

fn parse_clock_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| ScheduleError::InvalidMeeting(format!("time '{}': {}", s, e)))
}

fn normalize_attendees(input: &AttendeeInput) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::new();
    for raw in input.entries() {
        let email = raw.trim();
        if email.is_empty() {
            continue;
        }
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
            && !email.contains(char::is_whitespace);
        if !valid {
            return Err(ScheduleError::InvalidMeeting(format!(
                "attendee '{}' is not an email address",
                email
            )));
        }
        if !out.iter().any(|seen| seen.eq_ignore_ascii_case(email)) {
            out.push(email.to_string());
        }
    }
    Ok(out)
}

// ── Meeting ─────────────────────────────────────────────────────────────────

/// A validated meeting record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meeting {
    pub title: String,
    pub description: Option<String>,
    pub instant: MeetingInstant,
    pub attendees: Vec<String>,
    pub meeting_url: Option<String>,
}

impl Meeting {
    /// Validate `request` and admit it through the booking gate.
    ///
    /// The meeting's authoritative zone is the reference zone for the overlap
    /// check. Advisory classifications (weekend, limited overlap) are admitted.
    ///
    /// # Errors
    ///
    /// Validation errors from [`MeetingRequest::validate`], or
    /// [`ScheduleError::BookingRejected`] when the date is past or a holiday
    /// in any of `zones`.
    pub fn book(
        request: &MeetingRequest,
        validator: &SchedulingValidator<'_>,
        zones: &[TimeZoneId],
        policy: &WorkingHoursPolicy,
    ) -> Result<Meeting> {
        let meeting = request.validate()?;
        let classification = validator.admit(&meeting.instant, zones, policy)?;
        tracing::debug!(
            title = %meeting.title,
            date = %meeting.instant.date(),
            ?classification,
            "meeting booked"
        );
        Ok(meeting)
    }

    /// Replace the meeting's instant, re-running the booking gate against the
    /// new values. On rejection the meeting is left unchanged.
    pub fn reschedule(
        &mut self,
        instant: MeetingInstant,
        validator: &SchedulingValidator<'_>,
        zones: &[TimeZoneId],
        policy: &WorkingHoursPolicy,
    ) -> Result<DayClassification> {
        let classification = validator.admit(&instant, zones, policy)?;
        self.instant = instant;
        Ok(classification)
    }
}

/// Meetings on or after `today` (civil date in each meeting's own zone),
/// ordered by start instant.
pub fn upcoming(meetings: &[Meeting], today: NaiveDate) -> Vec<&Meeting> {
    let mut found: Vec<&Meeting> = meetings
        .iter()
        .filter(|m| m.instant.date() >= today)
        .collect();
    found.sort_by_key(|m| m.instant.start_utc());
    found
}
