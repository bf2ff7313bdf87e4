//! DataFrame reshaping helpers for the plotting services.
//!
//! Timing data and light series arrive as fully-formed DataFrames with
//! designated columns; everything here is projection, filtering, and
//! decoding. No data is cleaned, validated beyond schema presence, or
//! mutated.

use chrono::{TimeZone, Timelike};
use polars::prelude::*;

use crate::error::{PlotError, PlotResult};

/// Column names expected on the input frames.
pub mod columns {
    /// Subject identifier on timing data.
    pub const UID: &str = "UID";
    pub const DATE: &str = "Date";
    /// Illuminance level (lux) defining first/last light crossings.
    pub const THRESHOLD: &str = "Threshold";
    pub const SUNRISE: &str = "Sunrise";
    pub const SUNSET: &str = "Sunset";
    /// Sleep onset, minutes since local midnight.
    pub const SLEEP_ONSET: &str = "Sleep onset MSLM";
    /// Sleep offset, minutes since local midnight.
    pub const SLEEP_OFFSET: &str = "Sleep offset MSLM";
    /// Minutes from 4AM to the first crossing above the threshold.
    pub const FIRST_LIGHT: &str = "Mins to FL from 4AM";
    /// Minutes from 4AM to the last crossing above the threshold.
    pub const LAST_LIGHT: &str = "Mins to LL from 4AM";
    /// Time-of-day column on light series frames.
    pub const TIME: &str = "Time";
    /// Lux column on light series frames.
    pub const WHITE_LIGHT: &str = "White Light";
}

/// Columns a timing frame must carry for clock plotting.
pub fn required_timing_columns(group_by: &str) -> Vec<&str> {
    let mut cols = vec![
        columns::UID,
        columns::DATE,
        columns::THRESHOLD,
        columns::SUNRISE,
        columns::SUNSET,
        columns::SLEEP_ONSET,
        columns::SLEEP_OFFSET,
        columns::FIRST_LIGHT,
        columns::LAST_LIGHT,
    ];
    if !cols.contains(&group_by) {
        cols.push(group_by);
    }
    cols
}

/// Names from the required set that are absent from the frame.
pub fn missing_timing_columns(df: &DataFrame, group_by: &str) -> Vec<String> {
    let present = df.get_column_names();
    required_timing_columns(group_by)
        .iter()
        .filter(|c| !present.contains(c))
        .map(|c| c.to_string())
        .collect()
}

/// Project a timing frame onto the required column set.
pub fn select_timing_columns(df: &DataFrame, group_by: &str) -> PolarsResult<DataFrame> {
    df.select(required_timing_columns(group_by))
}

/// Render a column's values as grouping keys regardless of dtype, so
/// string, integer, and date columns are all usable as grouping keys or
/// identifiers.
pub fn key_strings(series: &Series) -> PolarsResult<Vec<String>> {
    match series.dtype() {
        DataType::String => Ok(series
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or("").to_string())
            .collect()),
        _ => (0..series.len())
            .map(|i| Ok(format!("{}", series.get(i)?)))
            .collect(),
    }
}

/// Distinct values in first-appearance order, like pandas `unique`.
pub fn unique_in_order(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

/// Keep the rows whose key in `column` renders as `value`.
pub fn filter_by_key(df: &DataFrame, column: &str, value: &str) -> PolarsResult<DataFrame> {
    let keys = key_strings(df.column(column)?)?;
    let mask: Vec<bool> = keys.iter().map(|k| k == value).collect();
    df.filter(&BooleanChunked::from_slice("mask", &mask))
}

/// Column values as f64, failing on non-numeric dtypes.
pub fn numeric_values(series: &Series) -> PlotResult<Vec<Option<f64>>> {
    if !series.dtype().is_numeric() {
        return Err(PlotError::Usage(format!(
            "expected a numeric series for '{}', got {}",
            series.name(),
            series.dtype()
        )));
    }
    let casted = series.cast(&DataType::Float64)?;
    Ok(casted.f64()?.into_iter().collect())
}

/// Keep the rows at a given light threshold.
pub fn filter_by_threshold(df: &DataFrame, threshold: f64) -> PlotResult<DataFrame> {
    let values = numeric_values(df.column(columns::THRESHOLD)?)?;
    let mask: Vec<bool> = values
        .iter()
        .map(|v| v.map(|v| v == threshold).unwrap_or(false))
        .collect();
    Ok(df.filter(&BooleanChunked::from_slice("mask", &mask))?)
}

/// Distinct threshold values in appearance order. This is the fallback when
/// the caller passes no explicit threshold list.
pub fn distinct_thresholds(df: &DataFrame) -> PlotResult<Vec<f64>> {
    let values = numeric_values(df.column(columns::THRESHOLD)?)?;
    let mut out: Vec<f64> = Vec::new();
    for value in values.into_iter().flatten() {
        if !out.iter().any(|t| *t == value) {
            out.push(value);
        }
    }
    Ok(out)
}

/// How the sunrise/sunset timestamps should be decoded into local wall time.
enum Decode {
    /// Column values are UTC epochs; convert through this zone.
    Zoned(chrono_tz::Tz),
    /// Column is timezone-naive and the caller supplied a zone: the stored
    /// values already are wall-clock time in that zone.
    Naive,
}

/// Sunrise and sunset local minute-of-day values, or `None` when no usable
/// timezone can be established for the pair. Callers decide whether the
/// `None` deserves a warning; this function never fails on timezone
/// problems, only on schema ones.
pub fn sun_minutes(
    df: &DataFrame,
    timezone: Option<&str>,
) -> PlotResult<Option<(Vec<f64>, Vec<f64>)>> {
    let sunrise = df.column(columns::SUNRISE)?;
    let sunset = df.column(columns::SUNSET)?;
    // Columns in different zones would mix wall times from two clocks.
    if column_timezone(sunrise)? != column_timezone(sunset)? {
        return Ok(None);
    }
    let sunrise = local_minutes(sunrise, timezone)?;
    let sunset = local_minutes(sunset, timezone)?;
    match (sunrise, sunset) {
        (Some(rise), Some(set)) => Ok(Some((rise, set))),
        _ => Ok(None),
    }
}

fn column_timezone(series: &Series) -> PlotResult<Option<String>> {
    let ca = series.datetime().map_err(|_| {
        PlotError::Schema(format!(
            "column '{}' must be a datetime column, got {}",
            series.name(),
            series.dtype()
        ))
    })?;
    Ok(ca.time_zone().clone())
}

fn local_minutes(series: &Series, timezone: Option<&str>) -> PlotResult<Option<Vec<f64>>> {
    let ca = series.datetime().map_err(|_| {
        PlotError::Schema(format!(
            "column '{}' must be a datetime column, got {}",
            series.name(),
            series.dtype()
        ))
    })?;
    let time_unit = ca.time_unit();
    let column_tz = ca.time_zone().clone();

    let decode = match (column_tz.as_deref(), timezone) {
        (Some(col), Some(param)) => {
            if col != param {
                return Ok(None);
            }
            match col.parse::<chrono_tz::Tz>() {
                Ok(tz) => Decode::Zoned(tz),
                Err(_) => return Ok(None),
            }
        }
        (Some(col), None) => match col.parse::<chrono_tz::Tz>() {
            Ok(tz) => Decode::Zoned(tz),
            Err(_) => return Ok(None),
        },
        (None, Some(_)) => Decode::Naive,
        (None, None) => return Ok(None),
    };

    let mut out = Vec::with_capacity(series.len());
    for value in ca.into_iter() {
        let Some(raw) = value else { continue };
        let (secs, nanos) = split_epoch(raw, time_unit);
        let minute = match &decode {
            Decode::Zoned(tz) => match tz.timestamp_opt(secs, nanos) {
                chrono::LocalResult::Single(dt) => minute_of_day(dt.time()),
                _ => continue,
            },
            Decode::Naive => match chrono::DateTime::from_timestamp(secs, nanos) {
                Some(dt) => minute_of_day(dt.naive_utc().time()),
                None => continue,
            },
        };
        out.push(minute);
    }
    Ok(Some(out))
}

/// Split a raw datetime value into whole seconds and subsecond nanoseconds.
pub(crate) fn split_epoch(raw: i64, unit: TimeUnit) -> (i64, u32) {
    match unit {
        TimeUnit::Nanoseconds => (
            raw.div_euclid(1_000_000_000),
            raw.rem_euclid(1_000_000_000) as u32,
        ),
        TimeUnit::Microseconds => (
            raw.div_euclid(1_000_000),
            (raw.rem_euclid(1_000_000) * 1_000) as u32,
        ),
        TimeUnit::Milliseconds => (
            raw.div_euclid(1_000),
            (raw.rem_euclid(1_000) * 1_000_000) as u32,
        ),
    }
}

pub(crate) fn minute_of_day(time: chrono::NaiveTime) -> f64 {
    time.hour() as f64 * 60.0 + time.minute() as f64 + time.second() as f64 / 60.0
}
