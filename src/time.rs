//! Time-of-day helpers.
//!
//! Every timestamp in a day schedule is a local wall-clock time
//! ([`jiff::civil::Time`]). Arithmetic saturates at the end of the day
//! rather than wrapping past midnight, so a bus that finishes charging
//! after 23:59 stays unavailable for the rest of the day instead of
//! reappearing at 00:xx.

use jiff::civil::Time;
use jiff::SignedDuration;

/// Start-of-day sentinel: initial availability of every bus and driver.
pub const DAY_START: Time = Time::MIN;

/// Adds whole minutes to a time of day, saturating at end of day.
#[inline]
pub fn plus_minutes(time: Time, minutes: u32) -> Time {
    time.saturating_add(SignedDuration::from_mins(i64::from(minutes)))
}

/// Adds whole minutes to a time of day, or `None` if the result would fall
/// past midnight.
#[inline]
pub fn checked_plus_minutes(time: Time, minutes: u32) -> Option<Time> {
    time.checked_add(SignedDuration::from_mins(i64::from(minutes))).ok()
}

/// Subtracts whole minutes from a time of day, saturating at midnight.
#[inline]
pub fn minus_minutes(time: Time, minutes: u32) -> Time {
    time.saturating_sub(SignedDuration::from_mins(i64::from(minutes)))
}

/// Whole minutes from `from` until `to` (negative if `to` is earlier).
#[inline]
pub fn minutes_between(from: Time, to: Time) -> i64 {
    to.duration_since(from).as_mins()
}
