//! Required-stop arithmetic from federal interval rules
//!
//! Pure functions over pre-validated inputs. Counting is deliberately
//! simple: one break per full 8 hours of driving, one rest period per
//! full 11, plus extra rest when the trip overruns what remains of the
//! rolling 70-hour cycle.

use serde::Serialize;
use thiserror::Error;

/// Hours of driving after which a 30-minute break is required
pub const BREAK_INTERVAL_HOURS: f64 = 8.0;

/// Hours of driving after which a 10-hour rest period is required
pub const REST_INTERVAL_HOURS: f64 = 11.0;

/// Rolling 8-day duty cycle limit in hours
pub const CYCLE_LIMIT_HOURS: f64 = 70.0;

/// Duration of a required break
pub const BREAK_DURATION_HOURS: f64 = 0.5;

/// Duration of a required rest period
pub const REST_DURATION_HOURS: f64 = 10.0;

/// Errors from the HOS planning core
#[derive(Debug, Error, PartialEq)]
pub enum HosError {
    /// Inputs are validated at the request boundary, so hitting this is a
    /// programming error, not a user error
    #[error("Invalid HOS input: {0}")]
    InvalidArgument(String),

    #[error("Unknown schedule strategy: '{0}'. Supported: templated")]
    UnknownStrategy(String),
}

/// Break and rest stops a trip must include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequiredStopCounts {
    /// 30-minute breaks
    pub breaks: u32,
    /// 10-hour rest periods
    pub rest_periods: u32,
}

impl RequiredStopCounts {
    /// Total number of intermediate stops
    pub fn total(&self) -> u32 {
        self.breaks + self.rest_periods
    }
}

/// Compute the break and rest stops required for a trip.
///
/// `total_drive_time_hours` is the routed drive time; `current_cycle_hours`
/// is what the driver has already used of the 70-hour cycle. Driving past
/// the remaining cycle allowance adds `ceil(overflow / 70 * 8)` rest
/// periods on top of the interval rule.
pub fn required_stops(
    total_drive_time_hours: f64,
    current_cycle_hours: f64,
) -> Result<RequiredStopCounts, HosError> {
    if !total_drive_time_hours.is_finite() || total_drive_time_hours < 0.0 {
        return Err(HosError::InvalidArgument(format!(
            "drive time must be a non-negative number, got {}",
            total_drive_time_hours
        )));
    }
    if !current_cycle_hours.is_finite() || current_cycle_hours < 0.0 {
        return Err(HosError::InvalidArgument(format!(
            "cycle hours must be a non-negative number, got {}",
            current_cycle_hours
        )));
    }

    let breaks = (total_drive_time_hours / BREAK_INTERVAL_HOURS).floor() as u32;
    let mut rest_periods = (total_drive_time_hours / REST_INTERVAL_HOURS).floor() as u32;

    let remaining_cycle = CYCLE_LIMIT_HOURS - current_cycle_hours;
    if total_drive_time_hours > remaining_cycle {
        let overflow = total_drive_time_hours - remaining_cycle;
        rest_periods += (overflow / CYCLE_LIMIT_HOURS * 8.0).ceil() as u32;
    }

    Ok(RequiredStopCounts { breaks, rest_periods })
}
