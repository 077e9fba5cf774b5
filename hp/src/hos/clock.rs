//! 12-hour clock labels for trip schedules

/// Hour of day when every trip departs. Fixed by design, not configurable.
pub const TRIP_START_HOUR: f64 = 8.0;

/// Render fractional hours as a 12-hour clock label: 13.5 -> "1:30 PM".
///
/// The hour is truncated and the minute taken from the fraction; 12 is
/// subtracted only from hours strictly above 12, and hour zero renders
/// as 12. No modulo-24 wrap is applied, so 24.0 renders as "12:00 PM"
/// and 25.5 as "13:30 PM" -- day boundaries are tracked by log sheets,
/// not by this label.
pub fn format_clock_label(hours: f64) -> String {
    let mut hour = hours.trunc() as i64;
    let minute = ((hours - hour as f64) * 60.0).trunc() as i64;
    let period = if hour < 12 { "AM" } else { "PM" };
    if hour > 12 {
        hour -= 12;
    }
    if hour == 0 {
        hour = 12;
    }
    format!("{}:{:02} {}", hour, minute, period)
}
