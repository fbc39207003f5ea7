//! Day classification and the booking gate.
//!
//! Rules, first match wins:
//!
//! 1. date before today → [`DayClassification::Past`] (blocking)
//! 2. holiday in any participant zone → [`DayClassification::Holiday`] (blocking)
//! 3. no common working hours → [`DayClassification::LimitedOverlap`] (advisory)
//! 4. Saturday or Sunday → [`DayClassification::WeekendAdvisory`] (advisory)
//! 5. otherwise → [`DayClassification::Available`]
//!
//! Advisories never block: a meeting outside everyone's working hours is a
//! legitimate choice. "Today" is injected so results are reproducible.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;

use crate::error::{Result, ScheduleError};
use crate::holiday::HolidayCalendar;
use crate::meeting::MeetingInstant;
use crate::overlap::{compute_overlap, OverlapWindow};
use crate::policy::WorkingHoursPolicy;
use crate::projector::{project_civil, ProjectedTime};
use crate::zone::TimeZoneId;

/// How a calendar date looks for a given zone set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayClassification {
    Available,
    Holiday,
    Past,
    WeekendAdvisory,
    LimitedOverlap,
}

impl DayClassification {
    /// Holiday and past dates cannot be booked.
    pub fn is_blocking(self) -> bool {
        matches!(self, DayClassification::Holiday | DayClassification::Past)
    }

    pub fn is_bookable(self) -> bool {
        !self.is_blocking()
    }

    /// Bookable, but the UI should surface a warning.
    pub fn is_advisory(self) -> bool {
        matches!(
            self,
            DayClassification::WeekendAdvisory | DayClassification::LimitedOverlap
        )
    }
}

impl fmt::Display for DayClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DayClassification::Available => "available",
            DayClassification::Holiday => "holiday in a participant timezone",
            DayClassification::Past => "date is in the past",
            DayClassification::WeekendAdvisory => "weekend",
            DayClassification::LimitedOverlap => "no common working hours",
        };
        f.write_str(s)
    }
}

/// One cell of a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub classification: DayClassification,
}

/// Everything the scheduling form shows for a proposed date and time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingAssessment {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub classification: DayClassification,
    pub bookable: bool,
    /// Participant zones observing a holiday on `date`.
    pub holiday_zones: Vec<TimeZoneId>,
    pub overlap: OverlapWindow,
    /// The proposed time on each participant's clock.
    pub participants: Vec<ProjectedTime>,
}

/// Applies the booking rules against an injected holiday table and "today".
#[derive(Debug, Clone, Copy)]
pub struct SchedulingValidator<'a> {
    calendar: &'a HolidayCalendar,
    today: NaiveDate,
}

impl<'a> SchedulingValidator<'a> {
    pub fn new(calendar: &'a HolidayCalendar, today: NaiveDate) -> Self {
        Self { calendar, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Classify `date` for the zone set.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::EmptyZoneSet`] if `zones` is empty.
    pub fn classify(
        &self,
        date: NaiveDate,
        zones: &[TimeZoneId],
        reference: &TimeZoneId,
        policy: &WorkingHoursPolicy,
    ) -> Result<DayClassification> {
        self.decide(date, zones, || {
            compute_overlap(date, zones, reference, policy).map(|w| w.has_overlap)
        })
    }

    /// The final admit/reject gate: false only for past and holiday dates.
    ///
    /// `time` does not influence the decision; working-hours fit at a given
    /// time is advisory and reported by [`SchedulingValidator::assess`].
    pub fn can_book(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        zones: &[TimeZoneId],
        reference: &TimeZoneId,
        policy: &WorkingHoursPolicy,
    ) -> Result<bool> {
        let classification = self.classify(date, zones, reference, policy)?;
        let bookable = classification.is_bookable();
        tracing::debug!(%date, %time, ?classification, bookable, "booking gate");
        Ok(bookable)
    }

    /// Classify the proposed slot and project it onto every participant clock.
    pub fn assess(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        zones: &[TimeZoneId],
        reference: &TimeZoneId,
        policy: &WorkingHoursPolicy,
    ) -> Result<BookingAssessment> {
        let overlap = compute_overlap(date, zones, reference, policy)?;
        let classification = self.decide(date, zones, || Ok(overlap.has_overlap))?;
        let participants = zones
            .iter()
            .map(|zone| project_civil(date, time, reference, zone, policy))
            .collect();

        Ok(BookingAssessment {
            date,
            time,
            classification,
            bookable: classification.is_bookable(),
            holiday_zones: self.calendar.observing(date, zones),
            overlap,
            participants,
        })
    }

    /// Gate a meeting instant, using its authoritative zone as the reference.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::BookingRejected`] for blocking classifications.
    pub fn admit(
        &self,
        instant: &MeetingInstant,
        zones: &[TimeZoneId],
        policy: &WorkingHoursPolicy,
    ) -> Result<DayClassification> {
        let date = instant.date();
        let classification = self.classify(date, zones, instant.zone(), policy)?;
        if classification.is_blocking() {
            return Err(ScheduleError::BookingRejected {
                date,
                reason: classification,
            });
        }
        Ok(classification)
    }

    /// Classify every day of a month, for the calendar grid.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidDate`] for an impossible year/month, or
    /// [`ScheduleError::EmptyZoneSet`].
    pub fn classify_month(
        &self,
        year: i32,
        month: u32,
        zones: &[TimeZoneId],
        reference: &TimeZoneId,
        policy: &WorkingHoursPolicy,
    ) -> Result<Vec<ClassifiedDay>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| ScheduleError::InvalidDate(format!("{year}-{month:02}")))?;

        first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(|date| {
                Ok(ClassifiedDay {
                    date,
                    weekday: date.weekday(),
                    classification: self.classify(date, zones, reference, policy)?,
                })
            })
            .collect()
    }

    fn decide(
        &self,
        date: NaiveDate,
        zones: &[TimeZoneId],
        has_overlap: impl FnOnce() -> Result<bool>,
    ) -> Result<DayClassification> {
        if zones.is_empty() {
            return Err(ScheduleError::EmptyZoneSet);
        }

        let classification = if date < self.today {
            DayClassification::Past
        } else if self.calendar.is_holiday(date, zones) {
            DayClassification::Holiday
        } else if !has_overlap()? {
            DayClassification::LimitedOverlap
        } else if is_weekend(date) {
            DayClassification::WeekendAdvisory
        } else {
            DayClassification::Available
        };

        tracing::trace!(%date, ?classification, "classified day");
        Ok(classification)
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
