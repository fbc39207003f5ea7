//! # meeting-engine
//!
//! Deterministic multi-timezone meeting scheduling.
//!
//! Given a set of IANA timezones, the engine finds the working hours they
//! share on a date, decides whether a date can be booked (past dates and
//! participant holidays block; weekends and missing overlap only advise), and
//! renders one authoritative meeting time onto every participant's clock.
//! All offset arithmetic goes through the `chrono-tz` database, so results
//! follow each zone's DST calendar for the specific date.
//!
//! Every function is pure: the caller injects "today", the holiday table, and
//! the working-hours policy.
//!
//! ## Modules
//!
//! - [`zone`]: `TimeZoneId`, offset resolution, civil-time localization
//! - [`policy`]: the working-hours interval
//! - [`overlap`]: common working window across zones
//! - [`holiday`]: per-zone holiday table
//! - [`validator`]: day classification and the booking gate
//! - [`meeting`]: meeting records, validation, booking lifecycle
//! - [`projector`]: a meeting's time in another zone
//! - [`export`]: calendar links and iCalendar text
//! - [`selection`]: participant zone set with a primary zone
//! - [`config`]: JSON configuration
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod export;
pub mod holiday;
pub mod meeting;
pub mod overlap;
pub mod policy;
pub mod projector;
pub mod selection;
pub mod validator;
pub mod zone;

pub use config::SchedulerConfig;
pub use error::{Result, ScheduleError};
pub use export::{google_calendar_url, outlook_calendar_url, to_ics};
pub use holiday::HolidayCalendar;
pub use meeting::{upcoming, AttendeeInput, Meeting, MeetingInstant, MeetingRequest};
pub use overlap::{compute_overlap, OverlapWindow};
pub use policy::WorkingHoursPolicy;
pub use projector::{project, project_all, project_civil, ProjectedTime};
pub use selection::ZoneSelection;
pub use validator::{BookingAssessment, ClassifiedDay, DayClassification, SchedulingValidator};
pub use zone::{localize, offset_hours, relative_offset_hours, TimeZoneId};
