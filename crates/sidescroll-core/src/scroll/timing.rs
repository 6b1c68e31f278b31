//! Time and distance calculations for scroller sessions
//!
//! Every scroll is budgeted as a fixed number of ticks. The increment per tick
//! is derived from the item width, and the delay between ticks shrinks as the
//! session's speed multiplier grows.

use std::time::Duration;

/// Number of ticks a full scroll is budgeted for
pub const TICKS_PER_SCROLL: u32 = 30;

/// Base delay between ticks: `round(duration * 1000 / 30)` milliseconds
///
/// # Arguments
/// * `duration` - Seconds for a full scroll
#[inline]
pub fn tick_interval(duration: f64) -> Duration {
    let ms = (duration * 1000.0 / TICKS_PER_SCROLL as f64).round();
    Duration::from_millis(ms.max(0.0) as u64)
}

/// Pixels moved per tick: `round(item_width / (30 * duration))`
///
/// Returns the raw rounded value, which may be zero for narrow items or long
/// durations. The engine clamps it.
#[inline]
pub fn step_increment(item_width: u32, duration: f64) -> u32 {
    let raw = item_width as f64 / (TICKS_PER_SCROLL as f64 * duration);
    raw.round().max(0.0) as u32
}

/// Delay before the next tick: `tick_interval / multiplier`
///
/// A zero multiplier is treated as one.
#[inline]
pub fn step_delay(tick_interval: Duration, multiplier: u32) -> Duration {
    tick_interval / multiplier.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval_default_duration() {
        assert_eq!(tick_interval(0.5), Duration::from_millis(17));
        assert_eq!(tick_interval(1.0), Duration::from_millis(33));
        assert_eq!(tick_interval(0.1), Duration::from_millis(3));
    }

    #[test]
    fn test_step_increment() {
        assert_eq!(step_increment(105, 0.5), 7);
        assert_eq!(step_increment(18, 0.5), 1);
        assert_eq!(step_increment(5, 2.0), 0);
    }

    #[test]
    fn test_step_delay_ramp() {
        let base = Duration::from_millis(17);
        assert_eq!(step_delay(base, 1), base);
        assert_eq!(step_delay(base, 2), Duration::from_micros(8500));
        assert!(step_delay(base, 10) < step_delay(base, 9));
        assert_eq!(step_delay(base, 0), base);
    }
}
