//! Scheduler configuration: working-hours policy, holiday table, zone cap.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the 09:00–17:00 policy with the built-in holiday table. Invalid
//! policies and unknown zone names fail at load time, never per call.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::holiday::HolidayCalendar;
use crate::policy::WorkingHoursPolicy;
use crate::selection::DEFAULT_MAX_ZONES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    pub working_hours: WorkingHoursPolicy,
    pub holidays: HolidayCalendar,
    pub max_zones: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            working_hours: WorkingHoursPolicy::default(),
            holidays: HolidayCalendar::builtin(),
            max_zones: DEFAULT_MAX_ZONES,
        }
    }
}

impl SchedulerConfig {
    /// Parse a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Config`] for malformed JSON, an invalid
    /// working-hours policy, or an unknown zone in the holiday table.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: SchedulerConfig =
            serde_json::from_str(s).map_err(|e| ScheduleError::Config(e.to_string()))?;
        if config.max_zones == 0 {
            return Err(ScheduleError::Config(
                "max_zones must be at least 1".to_string(),
            ));
        }
        tracing::debug!(
            start_hour = config.working_hours.start_hour(),
            end_hour = config.working_hours.end_hour(),
            holiday_zones = config.holidays.zones().count(),
            max_zones = config.max_zones,
            "loaded scheduler configuration"
        );
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ScheduleError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }
}
