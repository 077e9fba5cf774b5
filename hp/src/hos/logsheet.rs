//! Daily log sheet generation
//!
//! Splits a trip into days and fills each day with duty-status activities
//! from a schedule strategy. The built-in strategy uses fixed
//! regulatory-pattern templates rather than deriving activities from the
//! actual stop timing; the trait seam exists so a derived scheduler can
//! replace it without touching the generator.

use std::sync::Arc;

use tracing::debug;

use super::rules::{BREAK_DURATION_HOURS, HosError, REST_DURATION_HOURS, RequiredStopCounts};
use super::stops::{DROPOFF_DURATION_HOURS, PICKUP_DURATION_HOURS};
use crate::domain::{DutyActivity, DutyStatus, LogSheet, PlannedStop, RouteSummary};

/// Sheet header values carried onto every generated log sheet
#[derive(Debug, Clone)]
pub struct SheetOptions {
    /// Carrier name
    pub carrier: String,

    /// Shipping document reference
    pub shipping_documents: String,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            carrier: "ABC Trucking Co.".to_string(),
            shipping_documents: "BOL #12345".to_string(),
        }
    }
}

/// What a schedule strategy sees for one trip day
#[derive(Debug, Clone)]
pub struct DayContext<'a> {
    /// 0-based day index
    pub day: u32,

    /// Total days in the trip
    pub total_days: u32,

    /// Location of the first planned stop
    pub origin: &'a str,

    /// Location of the final planned stop
    pub destination: &'a str,
}

impl DayContext<'_> {
    pub fn is_first(&self) -> bool {
        self.day == 0
    }

    pub fn is_last(&self) -> bool {
        self.day + 1 == self.total_days
    }
}

/// Produces the duty-status activities for each day of a trip.
///
/// Implementations must return activities that are contiguous and cover
/// the full 24-hour day, starting at hour 0 and ending at hour 24.
pub trait ScheduleStrategy: Send + Sync + std::fmt::Debug {
    /// Name used to select the strategy in configuration
    fn name(&self) -> &'static str;

    /// Activities covering the given day
    fn day_activities(&self, ctx: &DayContext) -> Vec<DutyActivity>;
}

/// Create a schedule strategy by its configured name
pub fn create_strategy(name: &str) -> Result<Arc<dyn ScheduleStrategy>, HosError> {
    debug!(strategy = %name, "create_strategy: called");
    match name {
        "templated" => Ok(Arc::new(TemplatedSchedule)),
        other => Err(HosError::UnknownStrategy(other.to_string())),
    }
}

/// Fixed regulatory-pattern day templates.
///
/// First, middle and last days each get a canned schedule; a single-day
/// trip gets the first-day schedule. Activity boundaries are fixed hours,
/// deliberately independent of the actual stop timing.
#[derive(Debug)]
pub struct TemplatedSchedule;

impl TemplatedSchedule {
    fn first_day(origin: &str) -> Vec<DutyActivity> {
        // The working schedule begins at the 8 AM departure; the leading
        // off-duty block completes the 24-hour grid.
        vec![
            DutyActivity::new(DutyStatus::OffDuty, 0.0, 8.0, "Off duty", ""),
            DutyActivity::new(DutyStatus::OnDuty, 8.0, 8.5, origin, "Pre-trip inspection"),
            DutyActivity::new(DutyStatus::Driving, 8.5, 10.5, "En route to pickup", ""),
            DutyActivity::new(DutyStatus::OnDuty, 10.5, 11.5, origin, "Loading"),
            DutyActivity::new(DutyStatus::Driving, 11.5, 14.0, "En route", ""),
            DutyActivity::new(DutyStatus::OffDuty, 14.0, 14.5, "Rest area", "30-minute break"),
            DutyActivity::new(DutyStatus::Driving, 14.5, 19.5, "En route", ""),
            DutyActivity::new(DutyStatus::SleeperBerth, 19.5, 24.0, "Truck stop", "Rest period"),
        ]
    }

    fn middle_day() -> Vec<DutyActivity> {
        vec![
            DutyActivity::new(DutyStatus::SleeperBerth, 0.0, 5.5, "Truck stop", "Rest period continued"),
            DutyActivity::new(DutyStatus::Driving, 5.5, 13.5, "En route", ""),
            DutyActivity::new(DutyStatus::OffDuty, 13.5, 14.0, "Rest area", "30-minute break"),
            DutyActivity::new(DutyStatus::Driving, 14.0, 19.0, "En route", ""),
            DutyActivity::new(DutyStatus::SleeperBerth, 19.0, 24.0, "Truck stop", "Rest period"),
        ]
    }

    fn last_day(destination: &str) -> Vec<DutyActivity> {
        vec![
            DutyActivity::new(DutyStatus::SleeperBerth, 0.0, 5.5, "Truck stop", "Rest period continued"),
            DutyActivity::new(DutyStatus::Driving, 5.5, 9.5, "En route to delivery", ""),
            DutyActivity::new(DutyStatus::OnDuty, 9.5, 10.5, destination, "Unloading"),
            DutyActivity::new(DutyStatus::OnDuty, 10.5, 11.0, destination, "Post-trip inspection"),
            DutyActivity::new(DutyStatus::OffDuty, 11.0, 24.0, "Off duty", ""),
        ]
    }
}

impl ScheduleStrategy for TemplatedSchedule {
    fn name(&self) -> &'static str {
        "templated"
    }

    fn day_activities(&self, ctx: &DayContext) -> Vec<DutyActivity> {
        // Day 0 wins over the last day for single-day trips
        if ctx.is_first() {
            Self::first_day(ctx.origin)
        } else if ctx.is_last() {
            Self::last_day(ctx.destination)
        } else {
            Self::middle_day()
        }
    }
}

/// Total hours the trip occupies: driving, required stops, and the fixed
/// pickup and dropoff handling time
pub fn total_trip_hours(total_drive_time_hours: f64, counts: &RequiredStopCounts) -> f64 {
    total_drive_time_hours
        + counts.breaks as f64 * BREAK_DURATION_HOURS
        + counts.rest_periods as f64 * REST_DURATION_HOURS
        + PICKUP_DURATION_HOURS
        + DROPOFF_DURATION_HOURS
}

/// Number of daily log sheets a trip needs; every trip has at least one
pub fn total_trip_days(trip_hours: f64) -> u32 {
    (trip_hours / 24.0).ceil().max(1.0) as u32
}

/// Generate one log sheet per trip day.
///
/// Miles are split evenly across days. The origin and destination shown on
/// the sheets come from the first and last planned stops; a trip with no
/// stops still gets sheets, labeled "En route".
pub fn generate_log_sheets(
    trip_id: &str,
    route: &RouteSummary,
    counts: &RequiredStopCounts,
    stops: &[PlannedStop],
    strategy: &dyn ScheduleStrategy,
    options: &SheetOptions,
) -> Vec<LogSheet> {
    let trip_hours = total_trip_hours(route.total_drive_time_hours, counts);
    let days = total_trip_days(trip_hours);
    debug!(
        trip_id,
        trip_hours,
        days,
        strategy = strategy.name(),
        "generate_log_sheets: called"
    );

    let origin = stops.first().map(|s| s.location.as_str()).unwrap_or("En route");
    let destination = stops.last().map(|s| s.location.as_str()).unwrap_or("En route");
    let per_day_miles = (route.total_distance_miles / days as f64).floor() as i64;

    let mut sheets = Vec::with_capacity(days as usize);
    for day in 0..days {
        let ctx = DayContext {
            day,
            total_days: days,
            origin,
            destination,
        };
        let activities = strategy.day_activities(&ctx);

        let from_location = if ctx.is_first() { origin } else { "En route" };
        let to_location = if ctx.is_last() { destination } else { "En route" };
        let remarks = if ctx.is_first() {
            "Trip started"
        } else if ctx.is_last() {
            "Trip completed"
        } else {
            "En route"
        };

        sheets.push(LogSheet::new(
            trip_id,
            format!("Day {}", day + 1),
            from_location,
            to_location,
            per_day_miles,
            &options.carrier,
            remarks,
            &options.shipping_documents,
            activities,
        ));
    }

    sheets
}
