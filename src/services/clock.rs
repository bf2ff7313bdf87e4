//! Clock figure construction: polar layout for groupings within timing
//! data.
//!
//! One clock face is produced per distinct value of the grouping column.
//! Each face stacks a night-shading ring, one pair of interquartile bands
//! per light threshold, and a sleep band, all positioned on the unit
//! clock circle. Faces are independent; one group's data never affects
//! another's subplot.

use std::collections::HashSet;

use polars::prelude::*;

use crate::error::{PlotError, PlotResult};
use crate::models::{ClockBand, ClockFace, ClockFigure, ClockPlotConfig, NightShading};
use crate::palette::{self, Rgb};
use crate::services::stats;
use crate::time::{arange, minutes_to_radians, print_time, FOUR_AM_MINUTES, MINUTES_PER_DAY};
use crate::transformations::{self, columns};

/// Radial span shared by the stacked threshold bands.
const BAND_SPAN: f64 = 0.3;

/// Spacing factor between stacked bands.
const BAND_SEPARATION: f64 = 1.1;

/// Clock faces draw from a seven-color cut of the palette; the sleep band
/// takes the second-to-last of those seven.
const PALETTE_COLORS: usize = 7;

/// Map a series of minute-of-day values onto the clock circle.
///
/// Returns one angle per integer minute across the interquartile range
/// (linear-interpolated quartiles) together with the median angle. An
/// empty series yields an empty range and no median; a non-numeric series
/// is a usage error.
pub fn mins_to_radians(series: &Series) -> PlotResult<(Vec<f64>, Option<f64>)> {
    if !series.dtype().is_numeric() {
        return Err(PlotError::Usage(format!(
            "mins_to_radians expects a numeric series, got {} for '{}'",
            series.dtype(),
            series.name()
        )));
    }
    let casted = series.cast(&DataType::Float64)?;
    let ca = casted.f64()?;
    let median = ca.median();
    let p25 = ca.quantile(0.25, QuantileInterpolOptions::Linear)?;
    let p75 = ca.quantile(0.75, QuantileInterpolOptions::Linear)?;
    let angles = match (p25, p75) {
        (Some(low), Some(high)) => arange(low, high)
            .into_iter()
            .map(minutes_to_radians)
            .collect(),
        _ => Vec::new(),
    };
    Ok((angles, median.map(minutes_to_radians)))
}

/// Build a clock figure for a grouping within timing data.
///
/// Timing data must carry the columns named in
/// [`transformations::columns`]: subject and date identifiers, threshold,
/// sunrise/sunset timestamps, sleep onset/offset minutes, and the
/// first/last-light offsets from 4AM. Missing columns are schema errors;
/// unusable timezones only suppress the night shading.
pub fn build_clock_figure(
    timing_data: &DataFrame,
    group_by: &str,
    config: &ClockPlotConfig,
) -> PlotResult<ClockFigure> {
    let missing = transformations::missing_timing_columns(timing_data, group_by);
    if !missing.is_empty() {
        return Err(PlotError::Schema(format!(
            "timing data is missing required columns: {}",
            missing.join(", ")
        )));
    }
    let data = transformations::select_timing_columns(timing_data, group_by)?;

    let thresholds = if config.thresholds.is_empty() {
        transformations::distinct_thresholds(&data)?
    } else {
        config.thresholds.clone()
    };
    if thresholds.is_empty() {
        return Err(PlotError::Usage(
            "no light thresholds to draw: none were given and the data contains none".to_string(),
        ));
    }

    let mut colors = palette::resolve(&config.palette)?;
    colors.truncate(PALETTE_COLORS);
    let band_height = BAND_SPAN / thresholds.len() as f64;
    let timezone = config.timezone.as_deref();

    if transformations::sun_minutes(&data, timezone)?.is_none() {
        log::warn!(
            "clock plot has mismatched or missing timezone information; \
             sunrise and sunset shading will not be drawn"
        );
    }

    let keys = transformations::key_strings(data.column(group_by)?)?;
    let groups = transformations::unique_in_order(&keys);

    let mut faces = Vec::with_capacity(groups.len());
    for group in &groups {
        let current = transformations::filter_by_key(&data, group_by, group)?;
        faces.push(build_face(
            &current,
            group_by,
            group,
            &thresholds,
            band_height,
            &colors,
            timezone,
        )?);
    }
    Ok(ClockFigure { faces })
}

fn build_face(
    current: &DataFrame,
    group_by: &str,
    group: &str,
    thresholds: &[f64],
    band_height: f64,
    colors: &[Rgb],
    timezone: Option<&str>,
) -> PlotResult<ClockFace> {
    let night = transformations::sun_minutes(current, timezone)?.and_then(|(rise, set)| {
        if rise.is_empty() || set.is_empty() {
            return None;
        }
        let sunrise = stats::median(&rise);
        let sunset = stats::median(&set);
        Some(NightShading {
            pre_dawn: arange(0.0, sunrise)
                .into_iter()
                .map(minutes_to_radians)
                .collect(),
            post_dusk: arange(sunset, MINUTES_PER_DAY)
                .into_iter()
                .map(minutes_to_radians)
                .collect(),
        })
    });

    let mut bands = Vec::new();
    let mut sleep_source: Option<DataFrame> = None;

    for (i, &threshold) in thresholds.iter().enumerate() {
        let subset = transformations::filter_by_threshold(current, threshold)?;
        let inner = 1.0 - (i + 1) as f64 * band_height * BAND_SEPARATION;
        let color = colors[i % colors.len()];

        let onset = shifted_minutes(subset.column(columns::FIRST_LIGHT)?, FOUR_AM_MINUTES)?;
        let offset = shifted_minutes(subset.column(columns::LAST_LIGHT)?, FOUR_AM_MINUTES)?;
        let (onset_angles, onset_median) = mins_to_radians(&onset)?;
        let (offset_angles, offset_median) = mins_to_radians(&offset)?;

        // The onset band carries the full legend entry. With an empty onset
        // range (small subsets), the offset band falls back to a bare
        // threshold label; with both ranges empty the threshold stays out
        // of the legend entirely.
        let onset_label = if onset_angles.is_empty() {
            None
        } else {
            match (minute_median(&onset)?, minute_median(&offset)?) {
                (Some(on), Some(off)) => Some(format!(
                    "{:>3}lx {}-{}",
                    format_threshold(threshold),
                    print_time(on),
                    print_time(off)
                )),
                _ => None,
            }
        };
        let offset_label = if onset_label.is_none() && !offset_angles.is_empty() {
            Some(format!("{}lx", format_threshold(threshold)))
        } else {
            None
        };

        bands.push(ClockBand {
            angles: onset_angles,
            median: onset_median,
            inner,
            height: band_height,
            color,
            label: onset_label,
        });
        bands.push(ClockBand {
            angles: offset_angles,
            median: offset_median,
            inner,
            height: band_height,
            color,
            label: offset_label,
        });

        if i + 1 == thresholds.len() {
            sleep_source = Some(subset);
        }
    }

    let sleep_subset = sleep_source
        .ok_or_else(|| PlotError::Usage("no light thresholds to draw".to_string()))?;

    // Sleep statistics come from the rows at the last threshold, matching
    // the person-day count in the title.
    let sleep_inner = 1.0 - (thresholds.len() + 2) as f64 * band_height * BAND_SEPARATION;
    let sleep_color = colors[colors.len() - 2];
    let sleep_onset = sleep_subset.column(columns::SLEEP_ONSET)?.clone();
    let sleep_offset = sleep_subset.column(columns::SLEEP_OFFSET)?.clone();
    let (onset_angles, onset_median) = mins_to_radians(&sleep_onset)?;
    let (offset_angles, offset_median) = mins_to_radians(&sleep_offset)?;
    let sleep_label = match (minute_median(&sleep_onset)?, minute_median(&sleep_offset)?) {
        (Some(on), Some(off)) => Some(format!("Sleep {}-{}", print_time(on), print_time(off))),
        _ => {
            log::warn!(
                "no sleep timing data for {}={}; sleep band omitted from the legend",
                group_by,
                group
            );
            None
        }
    };
    bands.push(ClockBand {
        angles: onset_angles,
        median: onset_median,
        inner: sleep_inner,
        height: 2.0 * band_height,
        color: sleep_color,
        label: sleep_label,
    });
    bands.push(ClockBand {
        angles: offset_angles,
        median: offset_median,
        inner: sleep_inner,
        height: 2.0 * band_height,
        color: sleep_color,
        label: None,
    });

    let uids = transformations::key_strings(current.column(columns::UID)?)?;
    let dates = transformations::key_strings(current.column(columns::DATE)?)?;
    let num_uids = transformations::unique_in_order(&uids).len();
    let num_days = transformations::unique_in_order(&dates).len();
    let subset_uids = transformations::key_strings(sleep_subset.column(columns::UID)?)?;
    let subset_dates = transformations::key_strings(sleep_subset.column(columns::DATE)?)?;
    let person_days = subset_uids
        .iter()
        .zip(&subset_dates)
        .collect::<HashSet<_>>()
        .len();

    let title = format!(
        "{}={}: {} subjects, {} dates, {} person-days",
        group_by, group, num_uids, num_days, person_days
    );

    Ok(ClockFace {
        group_value: group.to_string(),
        title,
        night,
        bands,
    })
}

/// Column values shifted by a constant minute offset, as a new series.
fn shifted_minutes(series: &Series, offset: f64) -> PlotResult<Series> {
    let values = transformations::numeric_values(series)?;
    let shifted: Vec<Option<f64>> = values.into_iter().map(|v| v.map(|v| v + offset)).collect();
    Ok(Series::new(series.name(), shifted))
}

fn minute_median(series: &Series) -> PlotResult<Option<f64>> {
    Ok(series.cast(&DataType::Float64)?.f64()?.median())
}

fn format_threshold(threshold: f64) -> String {
    if threshold.fract() == 0.0 {
        format!("{}", threshold as i64)
    } else {
        format!("{}", threshold)
    }
}
