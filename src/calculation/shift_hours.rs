//! Shift hours calculation: start/finish times into worked/break/paid hours.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::clock::{MINUTES_PER_DAY, minutes_to_hours, time_to_minutes};

/// Paid hours credited for an annual-leave or sick day, regardless of any
/// recorded times.
pub const LEAVE_DAY_HOURS: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// The fixed unpaid break deducted from every timed shift. A shift-level
/// `break_hours` override replaces this after the fact (see
/// [`recompute_shift`]).
///
/// [`recompute_shift`]: super::recompute_shift
pub const STANDARD_BREAK_HOURS: Decimal = Decimal::ONE;

/// The worked/break/paid hour triple for one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursBreakdown {
    /// Hours between start and finish.
    pub worked: Decimal,
    /// Break hours deducted.
    pub breaks: Decimal,
    /// Hours actually priced: `max(0, worked - breaks)`.
    pub paid: Decimal,
}

impl HoursBreakdown {
    fn zero() -> Self {
        Self {
            worked: Decimal::ZERO,
            breaks: Decimal::ZERO,
            paid: Decimal::ZERO,
        }
    }
}

/// Computes the hours triple for a shift.
///
/// - Leave days (annual leave or sick) are credited a fixed 9-hour paid day
///   with no break, regardless of the recorded times.
/// - If either time is missing, everything is zero.
/// - Otherwise the times are same-day clock times; a finish at or before the
///   start means the shift crosses midnight and gains a day.
///
/// # Examples
///
/// ```
/// use worklog_engine::calculation::calculate_hours;
/// use rust_decimal::Decimal;
///
/// // 08:00-18:00: ten hours worked, one hour break, nine paid.
/// let hours = calculate_hours("08:00", "18:00", false);
/// assert_eq!(hours.worked, Decimal::from(10));
/// assert_eq!(hours.breaks, Decimal::ONE);
/// assert_eq!(hours.paid, Decimal::from(9));
///
/// // Crossing midnight: 20:00-04:00 is eight hours.
/// let hours = calculate_hours("20:00", "04:00", false);
/// assert_eq!(hours.worked, Decimal::from(8));
///
/// // Leave day: times are ignored.
/// let hours = calculate_hours("08:00", "18:00", true);
/// assert_eq!(hours.worked, Decimal::from(9));
/// assert_eq!(hours.paid, Decimal::from(9));
/// ```
pub fn calculate_hours(start: &str, finish: &str, on_leave: bool) -> HoursBreakdown {
    if on_leave {
        return HoursBreakdown {
            worked: LEAVE_DAY_HOURS,
            breaks: Decimal::ZERO,
            paid: LEAVE_DAY_HOURS,
        };
    }

    if start.trim().is_empty() || finish.trim().is_empty() {
        return HoursBreakdown::zero();
    }

    let s = time_to_minutes(start);
    let mut f = time_to_minutes(finish);
    if f <= s {
        f += MINUTES_PER_DAY;
    }

    let worked = minutes_to_hours(f - s);
    let breaks = STANDARD_BREAK_HOURS;
    let paid = (worked - breaks).max(Decimal::ZERO);

    HoursBreakdown {
        worked,
        breaks,
        paid,
    }
}
