//! Hours-of-Service planning core
//!
//! Pure, synchronous computation: required-stop arithmetic, stop
//! sequencing, clock labels and daily log sheet generation. Nothing in
//! this module performs I/O; routing and persistence live elsewhere.

mod clock;
mod logsheet;
mod rules;
mod stops;

pub use clock::{TRIP_START_HOUR, format_clock_label};
pub use logsheet::{
    DayContext, ScheduleStrategy, SheetOptions, TemplatedSchedule, create_strategy, generate_log_sheets,
    total_trip_days, total_trip_hours,
};
pub use rules::{
    BREAK_DURATION_HOURS, BREAK_INTERVAL_HOURS, CYCLE_LIMIT_HOURS, HosError, REST_DURATION_HOURS,
    REST_INTERVAL_HOURS, RequiredStopCounts, required_stops,
};
pub use stops::{DROPOFF_DURATION_HOURS, FUEL_DURATION_HOURS, PICKUP_DURATION_HOURS, StopOptions, plan_stops};
