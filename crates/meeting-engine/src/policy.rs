//! The working-hours policy applied in every participant's local time.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// A local working-hours interval `[start_hour, end_hour)` on a 24-hour clock.
///
/// Invariant: `start_hour < end_hour <= 24`. Validated at construction and at
/// configuration load; never re-checked per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPolicy")]
pub struct WorkingHoursPolicy {
    start_hour: u32,
    end_hour: u32,
}

#[derive(Deserialize)]
struct RawPolicy {
    start_hour: u32,
    end_hour: u32,
}

impl TryFrom<RawPolicy> for WorkingHoursPolicy {
    type Error = ScheduleError;

    fn try_from(raw: RawPolicy) -> Result<Self, Self::Error> {
        WorkingHoursPolicy::new(raw.start_hour, raw.end_hour)
    }
}

impl WorkingHoursPolicy {
    pub const DEFAULT_START_HOUR: u32 = 9;
    pub const DEFAULT_END_HOUR: u32 = 17;

    /// Build a policy, rejecting empty, inverted, or out-of-range intervals.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, ScheduleError> {
        if end_hour > 24 {
            return Err(ScheduleError::InvalidPolicy(format!(
                "end hour {end_hour} is outside 0..=24"
            )));
        }
        if start_hour >= end_hour {
            return Err(ScheduleError::InvalidPolicy(format!(
                "start hour {start_hour} must be before end hour {end_hour}"
            )));
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Whether a local clock hour falls inside `[start_hour, end_hour)`.
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }
}

impl Default for WorkingHoursPolicy {
    fn default() -> Self {
        Self {
            start_hour: Self::DEFAULT_START_HOUR,
            end_hour: Self::DEFAULT_END_HOUR,
        }
    }
}
