//! Per-zone public holidays.
//!
//! Dates are civil dates: a holiday on `2025-12-25` in `America/New_York`
//! blocks the calendar date 2025-12-25 regardless of the instant at which
//! that day starts in any other zone.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::zone::TimeZoneId;

const BUILTIN_HOLIDAYS: &[(&str, &[&str])] = &[
    (
        "America/New_York",
        &[
            "2024-01-01", "2024-07-04", "2024-12-25", "2025-01-01", "2025-07-04", "2025-12-25",
            "2026-01-01", "2026-07-03", "2026-12-25",
        ],
    ),
    (
        "America/Los_Angeles",
        &[
            "2024-01-01", "2024-07-04", "2024-12-25", "2025-01-01", "2025-07-04", "2025-12-25",
            "2026-01-01", "2026-07-03", "2026-12-25",
        ],
    ),
    (
        "America/Chicago",
        &[
            "2024-01-01", "2024-07-04", "2024-12-25", "2025-01-01", "2025-07-04", "2025-12-25",
            "2026-01-01", "2026-07-03", "2026-12-25",
        ],
    ),
    (
        "Europe/London",
        &[
            "2024-01-01", "2024-12-25", "2024-12-26", "2025-01-01", "2025-12-25", "2025-12-26",
            "2026-01-01", "2026-12-25", "2026-12-28",
        ],
    ),
    (
        "Europe/Paris",
        &[
            "2024-01-01", "2024-05-01", "2024-12-25", "2025-01-01", "2025-05-01", "2025-12-25",
            "2026-01-01", "2026-05-01", "2026-12-25",
        ],
    ),
    (
        "Asia/Tokyo",
        &[
            "2024-01-01", "2024-01-08", "2024-12-31", "2025-01-01", "2025-01-13", "2025-12-31",
            "2026-01-01", "2026-01-12", "2026-12-31",
        ],
    ),
    (
        "Asia/Kolkata",
        &[
            "2024-01-26", "2024-08-15", "2024-10-02", "2025-01-26", "2025-08-15", "2025-10-02",
            "2026-01-26", "2026-08-15", "2026-10-02",
        ],
    ),
    (
        "Asia/Shanghai",
        &["2024-01-01", "2024-10-01", "2025-01-01", "2025-10-01", "2026-01-01", "2026-10-01"],
    ),
];

/// Read-only mapping from zone to the civil dates it observes as holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayCalendar {
    by_zone: BTreeMap<TimeZoneId, BTreeSet<NaiveDate>>,
}

impl HolidayCalendar {
    pub fn new(by_zone: BTreeMap<TimeZoneId, BTreeSet<NaiveDate>>) -> Self {
        Self { by_zone }
    }

    /// The bundled table of common public holidays for 2024–2026.
    pub fn builtin() -> Self {
        let by_zone = BUILTIN_HOLIDAYS
            .iter()
            .filter_map(|(zone, dates)| {
                let zone = zone.parse::<TimeZoneId>().ok()?;
                let dates = dates
                    .iter()
                    .filter_map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                    .collect();
                Some((zone, dates))
            })
            .collect();
        Self { by_zone }
    }

    /// True iff any zone in `zones` observes a holiday on `date`.
    pub fn is_holiday(&self, date: NaiveDate, zones: &[TimeZoneId]) -> bool {
        zones.iter().any(|zone| self.observes(zone, date))
    }

    /// The participant zones that observe a holiday on `date`, in input order
    /// without repeats.
    pub fn observing(&self, date: NaiveDate, zones: &[TimeZoneId]) -> Vec<TimeZoneId> {
        let mut found: Vec<TimeZoneId> = Vec::new();
        for zone in zones {
            if self.observes(zone, date) && !found.contains(zone) {
                found.push(*zone);
            }
        }
        found
    }

    /// All holidays of one zone, in date order.
    pub fn holidays(&self, zone: &TimeZoneId) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_zone.get(zone).into_iter().flatten().copied()
    }

    /// Zones that have at least one entry.
    pub fn zones(&self) -> impl Iterator<Item = &TimeZoneId> {
        self.by_zone.keys()
    }

    fn observes(&self, zone: &TimeZoneId, date: NaiveDate) -> bool {
        self.by_zone
            .get(zone)
            .is_some_and(|dates| dates.contains(&date))
    }
}
