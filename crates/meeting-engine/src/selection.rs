//! The participant zone set a user is scheduling across.

use serde::Serialize;

use crate::error::{Result, ScheduleError};
use crate::zone::TimeZoneId;

pub const DEFAULT_MAX_ZONES: usize = 3;

/// An ordered, duplicate-free set of zones with one primary zone.
///
/// The primary zone is the reference zone for overlap windows and the
/// authoritative zone for meetings created from this selection. Invariants:
/// at least one zone, at most `max_zones`, primary is a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneSelection {
    zones: Vec<TimeZoneId>,
    primary: TimeZoneId,
    max_zones: usize,
}

impl ZoneSelection {
    /// A selection containing only `primary`.
    pub fn new(primary: TimeZoneId, max_zones: usize) -> Self {
        Self {
            zones: vec![primary],
            primary,
            max_zones: max_zones.max(1),
        }
    }

    /// Build from a list whose first entry is the primary unless `primary` is
    /// given.
    pub fn from_zones(
        zones: &[TimeZoneId],
        primary: Option<TimeZoneId>,
        max_zones: usize,
    ) -> Result<Self> {
        let first = zones
            .first()
            .copied()
            .ok_or_else(|| ScheduleError::InvalidSelection("no zones given".to_string()))?;
        let primary = primary.unwrap_or(first);
        if !zones.contains(&primary) {
            return Err(ScheduleError::InvalidSelection(format!(
                "primary zone {primary} is not in the selection"
            )));
        }
        let mut selection = Self::new(primary, max_zones);
        selection.zones.clear();
        for zone in zones {
            selection.add(*zone)?;
        }
        Ok(selection)
    }

    pub fn zones(&self) -> &[TimeZoneId] {
        &self.zones
    }

    pub fn primary(&self) -> &TimeZoneId {
        &self.primary
    }

    pub fn max_zones(&self) -> usize {
        self.max_zones
    }

    pub fn add(&mut self, zone: TimeZoneId) -> Result<()> {
        if self.zones.contains(&zone) {
            return Err(ScheduleError::InvalidSelection(format!(
                "{zone} is already selected"
            )));
        }
        if self.zones.len() >= self.max_zones {
            return Err(ScheduleError::InvalidSelection(format!(
                "at most {} zones can be selected",
                self.max_zones
            )));
        }
        self.zones.push(zone);
        Ok(())
    }

    /// Remove a zone. The last zone cannot be removed; removing the primary
    /// promotes the first remaining zone.
    pub fn remove(&mut self, zone: &TimeZoneId) -> Result<()> {
        let index = self
            .zones
            .iter()
            .position(|z| z == zone)
            .ok_or_else(|| ScheduleError::InvalidSelection(format!("{zone} is not selected")))?;
        if self.zones.len() == 1 {
            return Err(ScheduleError::InvalidSelection(
                "at least one zone must remain selected".to_string(),
            ));
        }
        self.zones.remove(index);
        if self.primary == *zone {
            self.primary = self.zones[0];
        }
        Ok(())
    }

    pub fn set_primary(&mut self, zone: TimeZoneId) -> Result<()> {
        if !self.zones.contains(&zone) {
            return Err(ScheduleError::InvalidSelection(format!(
                "{zone} must be selected before it can be primary"
            )));
        }
        self.primary = zone;
        Ok(())
    }
}
