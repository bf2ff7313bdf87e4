//! Minute-of-day arithmetic shared by both plot families.

use std::f64::consts::PI;

/// Minutes in one 24-hour cycle.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Minutes between local midnight and 4AM, the reference point the
/// first-light/last-light columns are measured from.
pub const FOUR_AM_MINUTES: f64 = 240.0;

/// Map a minute-of-day value onto the [0, 2π) clock circle.
pub fn minutes_to_radians(minutes: f64) -> f64 {
    minutes / MINUTES_PER_DAY * 2.0 * PI
}

/// Format a minute count as "HH:MM", wrapping values past midnight back
/// into the 24-hour clock (1500 minutes renders as "01:00").
pub fn print_time(minutes: f64) -> String {
    let mut hours = (minutes / 60.0) as i64;
    let mins = (minutes - (hours * 60) as f64) as i64;
    if hours >= 24 {
        hours -= 24;
    }
    format!("{:02}:{:02}", hours, mins)
}

/// One value per integer step from `start` up to, but excluding, `stop`.
///
/// This is the discretization used for the interquartile band enumeration
/// and the night arcs: the first value sits exactly at `start` and the rest
/// follow at one-minute spacing.
pub fn arange(start: f64, stop: f64) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut value = start;
    while value < stop {
        out.push(value);
        value += 1.0;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_time_midnight() {
        assert_eq!(print_time(0.0), "00:00");
    }

    #[test]
    fn test_print_time_noon() {
        assert_eq!(print_time(720.0), "12:00");
    }

    #[test]
    fn test_print_time_wraps_past_midnight() {
        // 1500 minutes = 25h, wraps to 1h
        assert_eq!(print_time(1500.0), "01:00");
    }

    #[test]
    fn test_print_time_fractional() {
        assert_eq!(print_time(624.5), "10:24");
    }

    #[test]
    fn test_minutes_to_radians_halfway() {
        assert!((minutes_to_radians(720.0) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_arange_counts_integer_steps() {
        assert_eq!(arange(0.0, 3.0), vec![0.0, 1.0, 2.0]);
        let fractional = arange(10.25, 12.0);
        assert_eq!(fractional, vec![10.25, 11.25]);
    }

    #[test]
    fn test_arange_empty_when_degenerate() {
        assert!(arange(5.0, 5.0).is_empty());
        assert!(arange(f64::NAN, 10.0).is_empty());
    }
}
