//! Wall-clock to day-fraction conversion.
//!
//! A day fraction is the share of the local day that has elapsed since
//! midnight, in `[0, 1)`.

use chrono::{Local, NaiveTime, Timelike};

pub const SECONDS_PER_DAY: u32 = 86_400;

/// Source of the current local time of day.
pub trait Clock {
    fn now(&self) -> NaiveTime;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// A fixed time of day always reports itself.
impl Clock for NaiveTime {
    fn now(&self) -> NaiveTime {
        *self
    }
}

/// Fraction of the day elapsed at `time`. 12:00 is 0.5.
pub fn day_fraction(time: NaiveTime) -> f64 {
    // Leap seconds are folded into the last second of the day.
    let seconds = time.num_seconds_from_midnight().min(SECONDS_PER_DAY - 1);
    f64::from(seconds) / f64::from(SECONDS_PER_DAY)
}

/// Day fraction a given list slot is centred on.
pub fn slot_fraction(index: usize, len: usize) -> f64 {
    if len <= 1 {
        return 0.0;
    }
    index as f64 / (len - 1) as f64
}

/// Formats a day fraction as `h:mm`. Values outside `[0, 1)` render as `0:00`.
pub fn clock_label(fraction: f64) -> String {
    let fraction = if fraction.is_nan() || !(0.0..1.0).contains(&fraction) {
        0.0
    } else {
        fraction
    };
    // Truncates to the started minute. The small bias absorbs float error from
    // fractions built out of whole seconds.
    let seconds = (fraction * f64::from(SECONDS_PER_DAY) + 1e-6).floor() as u32;
    let seconds = seconds.min(SECONDS_PER_DAY - 1);
    let hours = seconds / 3600;
    let minutes = seconds % 3600 / 60;
    format!("{}:{:02}", hours, minutes)
}
