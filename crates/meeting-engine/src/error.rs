//! Error types for meeting-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::validator::DayClassification;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Unknown timezone: {0}")]
    UnknownTimeZone(String),

    #[error("Invalid working-hours policy: {0}")]
    InvalidPolicy(String),

    #[error("Empty zone set: overlap is undefined for zero participants")]
    EmptyZoneSet,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid meeting: {0}")]
    InvalidMeeting(String),

    #[error("Booking rejected for {date}: {reason}")]
    BookingRejected {
        date: NaiveDate,
        reason: DayClassification,
    },

    #[error("Invalid zone selection: {0}")]
    InvalidSelection(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
