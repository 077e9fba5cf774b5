//! Daily log sheet record and duty-status activities
//!
//! One LogSheet per trip day, mirroring an ELD daily grid: an ordered set
//! of duty-status activities that together cover the full 24-hour day.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tripstore::{IndexValue, Record, now_ms};

use super::id::generate_id;

/// Duty status line on an ELD grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DutyStatus {
    OffDuty,
    SleeperBerth,
    Driving,
    OnDuty,
}

impl std::fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OffDuty => write!(f, "Off Duty"),
            Self::SleeperBerth => write!(f, "Sleeper Berth"),
            Self::Driving => write!(f, "Driving"),
            Self::OnDuty => write!(f, "On Duty"),
        }
    }
}

/// One contiguous duty-status interval within a day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyActivity {
    /// Duty status during the interval
    pub status: DutyStatus,

    /// Interval start, hours after midnight, in [0, 24)
    pub start_hours: f64,

    /// Interval end, hours after midnight, in (0, 24]
    pub end_hours: f64,

    /// Where the interval takes place
    pub location: String,

    /// Free-form note ("Pre-trip inspection", "30-minute break")
    pub remarks: String,
}

impl DutyActivity {
    pub fn new(
        status: DutyStatus,
        start_hours: f64,
        end_hours: f64,
        location: impl Into<String>,
        remarks: impl Into<String>,
    ) -> Self {
        Self {
            status,
            start_hours,
            end_hours,
            location: location.into(),
            remarks: remarks.into(),
        }
    }

    /// Length of the interval in hours
    pub fn duration_hours(&self) -> f64 {
        self.end_hours - self.start_hours
    }
}

/// Daily log sheet for one trip day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSheet {
    /// Unique identifier
    pub id: String,

    /// Parent trip ID
    pub trip: String,

    /// Day label ("Day 1", "Day 2", ...)
    pub date: String,

    /// Where the day starts
    pub from_location: String,

    /// Where the day ends
    pub to_location: String,

    /// Miles attributed to this day (even split across trip days)
    pub total_miles: i64,

    /// Carrier name shown on the sheet header
    pub carrier: String,

    /// Day-level note ("Trip started", "En route", "Trip completed")
    pub remarks: String,

    /// Shipping document reference
    pub shipping_documents: String,

    /// Duty-status intervals covering the full day, in order
    pub activities: Vec<DutyActivity>,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl LogSheet {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trip: impl Into<String>,
        date: impl Into<String>,
        from_location: impl Into<String>,
        to_location: impl Into<String>,
        total_miles: i64,
        carrier: impl Into<String>,
        remarks: impl Into<String>,
        shipping_documents: impl Into<String>,
        activities: Vec<DutyActivity>,
    ) -> Self {
        let date = date.into();
        let now = now_ms();
        Self {
            id: generate_id("sheet", &date),
            trip: trip.into(),
            date,
            from_location: from_location.into(),
            to_location: to_location.into(),
            total_miles,
            carrier: carrier.into(),
            remarks: remarks.into(),
            shipping_documents: shipping_documents.into(),
            activities,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of activity durations in hours
    pub fn total_activity_hours(&self) -> f64 {
        self.activities.iter().map(|a| a.duration_hours()).sum()
    }

    /// Whether activities start at 0, end at 24, and leave no gaps
    pub fn covers_full_day(&self) -> bool {
        let Some(first) = self.activities.first() else {
            return false;
        };
        let Some(last) = self.activities.last() else {
            return false;
        };
        if first.start_hours != 0.0 || last.end_hours != 24.0 {
            return false;
        }
        self.activities
            .windows(2)
            .all(|pair| pair[0].end_hours == pair[1].start_hours)
    }
}

impl Record for LogSheet {
    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> i64 {
        self.updated_at
    }

    fn collection_name() -> &'static str {
        "log_sheets"
    }

    fn indexed_fields(&self) -> HashMap<String, IndexValue> {
        let mut fields = HashMap::new();
        fields.insert("trip".to_string(), IndexValue::String(self.trip.clone()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_day_sheet() -> LogSheet {
        LogSheet::new(
            "t-1",
            "Day 1",
            "Detroit, MI",
            "En route",
            400,
            "ABC Trucking Co.",
            "Trip started",
            "BOL #12345",
            vec![
                DutyActivity::new(DutyStatus::OffDuty, 0.0, 8.0, "Off duty", ""),
                DutyActivity::new(DutyStatus::Driving, 8.0, 20.0, "En route", ""),
                DutyActivity::new(DutyStatus::SleeperBerth, 20.0, 24.0, "Truck stop", "Rest"),
            ],
        )
    }

    #[test]
    fn test_duty_status_wire_names() {
        assert_eq!(serde_json::to_string(&DutyStatus::OffDuty).unwrap(), "\"offDuty\"");
        assert_eq!(
            serde_json::to_string(&DutyStatus::SleeperBerth).unwrap(),
            "\"sleeperBerth\""
        );
        assert_eq!(serde_json::to_string(&DutyStatus::Driving).unwrap(), "\"driving\"");
        assert_eq!(serde_json::to_string(&DutyStatus::OnDuty).unwrap(), "\"onDuty\"");
    }

    #[test]
    fn test_sheet_covers_full_day() {
        let sheet = full_day_sheet();
        assert!(sheet.covers_full_day());
        assert_eq!(sheet.total_activity_hours(), 24.0);
    }

    #[test]
    fn test_sheet_with_gap_is_not_full_day() {
        let mut sheet = full_day_sheet();
        sheet.activities[1].start_hours = 9.0;
        assert!(!sheet.covers_full_day());
    }

    #[test]
    fn test_sheet_not_reaching_midnight_is_not_full_day() {
        let mut sheet = full_day_sheet();
        sheet.activities.pop();
        assert!(!sheet.covers_full_day());
    }

    #[test]
    fn test_empty_sheet_is_not_full_day() {
        let mut sheet = full_day_sheet();
        sheet.activities.clear();
        assert!(!sheet.covers_full_day());
    }
}
