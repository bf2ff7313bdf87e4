//! Custom axis coordinate types for the light figure.
//!
//! The stock `f64` ranges pick their own tick positions; these two keep the
//! ticks where the figures want them: hour marks every four hours formatted
//! as wall-clock times, and lux marks at fixed increments.

use std::ops::Range;

use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};

/// 24-hour time-of-day axis with a tick every four hours, labelled "HH:MM".
#[derive(Debug, Clone, Copy)]
pub struct HourAxis;

impl Ranged for HourAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let span = (limit.1 - limit.0) as f64;
        limit.0 + ((value / 24.0) * span).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.max_num_points() < 2 {
            return Vec::new();
        }
        (0..=6).map(|i| (i * 4) as f64).collect()
    }

    fn range(&self) -> Range<f64> {
        0.0..24.0
    }
}

impl ValueFormatter<f64> for HourAxis {
    fn format(value: &f64) -> String {
        let hours = *value as i64;
        let minutes = ((value - hours as f64) * 60.0).round() as i64;
        format!("{:02}:{:02}", hours, minutes)
    }
}

/// Linear value axis from zero to `max`, with ticks at multiples of `step`.
#[derive(Debug, Clone, Copy)]
pub struct ValueAxis {
    pub max: f64,
    pub step: f64,
}

impl Ranged for ValueAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let span = (limit.1 - limit.0) as f64;
        limit.0 + ((value / self.max) * span).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.max_num_points() < 2 || self.step <= 0.0 {
            return Vec::new();
        }
        let mut points = Vec::new();
        let mut value = 0.0;
        while value <= self.max {
            points.push(value);
            value += self.step;
        }
        points
    }

    fn range(&self) -> Range<f64> {
        0.0..self.max
    }
}

impl ValueFormatter<f64> for ValueAxis {
    fn format(value: &f64) -> String {
        if value.fract() == 0.0 {
            format!("{}", *value as i64)
        } else {
            format!("{}", value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_axis_maps_linearly() {
        let axis = HourAxis;
        assert_eq!(axis.map(&0.0, (0, 240)), 0);
        assert_eq!(axis.map(&12.0, (0, 240)), 120);
        assert_eq!(axis.map(&24.0, (0, 240)), 240);
    }

    #[test]
    fn test_hour_axis_formats_wall_clock() {
        assert_eq!(HourAxis::format(&0.0), "00:00");
        assert_eq!(HourAxis::format(&16.0), "16:00");
        assert_eq!(HourAxis::format(&6.5), "06:30");
    }

    #[test]
    fn test_value_axis_ticks_at_step_multiples() {
        let axis = ValueAxis {
            max: 1000.0,
            step: 200.0,
        };
        let points = axis.key_points(8);
        assert_eq!(points, vec![0.0, 200.0, 400.0, 600.0, 800.0, 1000.0]);
    }

    #[test]
    fn test_value_axis_formats_integers_bare() {
        assert_eq!(ValueAxis::format(&200.0), "200");
        assert_eq!(ValueAxis::format(&2.5), "2.5");
    }
}
