//! Light figure construction: per-time-of-day aggregation of illuminance
//! series, with a derived center-of-light-exposure summary per series.

use std::collections::BTreeMap;

use chrono::{NaiveTime, TimeZone};
use polars::prelude::*;

use crate::error::{PlotError, PlotResult};
use crate::models::{LightCurve, LightFigure, LightPlotConfig};
use crate::palette;
use crate::services::stats;
use crate::transformations::{self, columns, split_epoch};

/// Assumed duration of one light sample, in seconds. Carried over from the
/// data-collection protocol; confirm before reusing with other loggers.
const SAMPLE_SECONDS: f64 = 20.0;

const LUX_TICK: f64 = 200.0;
const COUNT_TICK: f64 = 5000.0;

/// Seconds-since-midnight bucket keys, so fractional minutes group exactly.
type Buckets = BTreeMap<i64, Vec<f64>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Aggregation {
    MeanSem,
    Counts,
    Quantiles,
}

fn parse_plot_type(plot_type: &str) -> PlotResult<Aggregation> {
    match plot_type {
        "mean/sem" => Ok(Aggregation::MeanSem),
        "counts" => Ok(Aggregation::Counts),
        "quantiles" => Ok(Aggregation::Quantiles),
        other => Err(PlotError::Usage(format!(
            "Valid plot choices are 'mean/sem', 'counts', 'quantiles'; got '{}'",
            other
        ))),
    }
}

struct AggregatedSeries {
    minutes: Vec<f64>,
    center: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

/// Build a light figure from one series frame per group/condition.
///
/// Each frame carries a `Time` column (Time or Datetime dtype; only the
/// hour:minute:second component is used) and a `White Light` lux column.
/// `data_list` and `labels` must be the same length.
pub fn build_light_figure(
    data_list: &[DataFrame],
    labels: &[&str],
    config: &LightPlotConfig,
) -> PlotResult<LightFigure> {
    if data_list.len() != labels.len() {
        return Err(PlotError::Usage(format!(
            "number of data series ({}) must match number of labels ({})",
            data_list.len(),
            labels.len()
        )));
    }
    let aggregation = parse_plot_type(&config.plot_type)?;
    let colors = palette::resolve(&config.palette)?;

    let (base_label, tick_increment) = match aggregation {
        Aggregation::Counts => ("Number of Samples", COUNT_TICK),
        _ => ("Lux", LUX_TICK),
    };

    let mut aggregated = Vec::with_capacity(data_list.len());
    for df in data_list {
        aggregated.push(aggregate(&bucketize(df)?, aggregation));
    }

    // Counts ignore the configured limit and scale to the data instead.
    let y_lim = match aggregation {
        Aggregation::Counts => {
            let max_count = aggregated
                .iter()
                .flat_map(|s| s.center.iter())
                .fold(0.0f64, |acc, &v| acc.max(v));
            max_count * 10.0
        }
        _ => config.y_lim,
    };

    let mut curves = Vec::with_capacity(aggregated.len());
    for (i, (series, label)) in aggregated.into_iter().zip(labels).enumerate() {
        let color = colors[i % colors.len()];
        let cumulative_exposure = series.center.iter().sum::<f64>() * SAMPLE_SECONDS;
        let center_of_light = center_of_light(&series.minutes, &series.center);

        let label = match center_of_light {
            Some(time) => {
                log::info!(
                    "{} - cumulative {}*sec: {:e}, center of mass of light exposure: {}",
                    label,
                    base_label,
                    cumulative_exposure,
                    time.format("%H:%M:%S")
                );
                format!(
                    "{}\n{:.3e} lx*s, COLE {}",
                    label,
                    cumulative_exposure,
                    time.format("%H:%M:%S")
                )
            }
            None => {
                log::warn!(
                    "{}: series carries no light exposure mass; center of light exposure unavailable",
                    label
                );
                (*label).to_string()
            }
        };

        curves.push(LightCurve {
            label,
            minutes: series.minutes,
            center: series.center,
            lower: series.lower,
            upper: series.upper,
            color,
            center_of_light,
            cumulative_exposure,
        });
    }

    Ok(LightFigure {
        curves,
        y_label: format!("{} {}", base_label, config.plot_type),
        y_lim,
        tick_increment,
    })
}

/// Group a series frame's lux values by exact time of day. Rows with a null
/// time or lux value drop out, so bucket counts reflect non-null samples.
fn bucketize(df: &DataFrame) -> PlotResult<Buckets> {
    let minutes = time_of_day_minutes(df.column(columns::TIME)?)?;
    let lux = transformations::numeric_values(df.column(columns::WHITE_LIGHT)?)?;

    let mut buckets: Buckets = BTreeMap::new();
    for (minute, value) in minutes.into_iter().zip(lux) {
        let (Some(minute), Some(value)) = (minute, value) else {
            continue;
        };
        let key = (minute * 60.0).round() as i64;
        buckets.entry(key).or_default().push(value);
    }
    Ok(buckets)
}

fn aggregate(buckets: &Buckets, aggregation: Aggregation) -> AggregatedSeries {
    let mut series = AggregatedSeries {
        minutes: Vec::with_capacity(buckets.len()),
        center: Vec::with_capacity(buckets.len()),
        lower: Vec::with_capacity(buckets.len()),
        upper: Vec::with_capacity(buckets.len()),
    };
    for (&key, values) in buckets {
        let (center, lower, upper) = match aggregation {
            Aggregation::MeanSem => {
                let mean = stats::mean(values);
                let sem = stats::sem(values);
                (mean, mean - sem, mean + sem)
            }
            Aggregation::Counts => {
                let count = values.len() as f64;
                (count, count, count)
            }
            Aggregation::Quantiles => (
                stats::median(values),
                stats::quantile(values, 0.25),
                stats::quantile(values, 0.75),
            ),
        };
        series.minutes.push(key as f64 / 60.0);
        series.center.push(center);
        series.lower.push(lower);
        series.upper.push(upper);
    }
    series
}

/// Time-of-day in minutes since midnight for each row of a time column.
fn time_of_day_minutes(series: &Series) -> PlotResult<Vec<Option<f64>>> {
    match series.dtype() {
        DataType::Time => Ok(series
            .time()?
            .into_iter()
            .map(|v| v.map(|ns| ns as f64 / 60_000_000_000.0))
            .collect()),
        DataType::Datetime(unit, tz) => {
            let unit = *unit;
            // A zone-aware column buckets by its local wall time; a naive
            // column is taken as wall time already.
            let zone = match tz.as_deref() {
                Some(name) => Some(name.parse::<chrono_tz::Tz>().map_err(|_| {
                    PlotError::Usage(format!(
                        "unrecognized timezone '{}' on column '{}'",
                        name,
                        series.name()
                    ))
                })?),
                None => None,
            };
            Ok(series
                .datetime()?
                .into_iter()
                .map(|v| {
                    v.and_then(|raw| {
                        let (secs, nanos) = split_epoch(raw, unit);
                        match zone {
                            Some(tz) => match tz.timestamp_opt(secs, nanos) {
                                chrono::LocalResult::Single(dt) => {
                                    Some(transformations::minute_of_day(dt.time()))
                                }
                                _ => None,
                            },
                            None => chrono::DateTime::from_timestamp(secs, nanos).map(|dt| {
                                transformations::minute_of_day(dt.naive_utc().time())
                            }),
                        }
                    })
                })
                .collect())
        }
        other => Err(PlotError::Usage(format!(
            "column '{}' must be a Time or Datetime column, got {}",
            series.name(),
            other
        ))),
    }
}

/// Lux-weighted mean time of day over the center curve, or `None` when the
/// curve carries no positive exposure mass.
fn center_of_light(minutes: &[f64], center: &[f64]) -> Option<NaiveTime> {
    let total: f64 = center.iter().sum();
    if !(total > 0.0) {
        return None;
    }
    let weighted: f64 = minutes.iter().zip(center).map(|(m, c)| m * c).sum();
    let mean_minute = weighted / total;
    let hours = (mean_minute / 60.0) as u32;
    let mins = (mean_minute - hours as f64 * 60.0) as u32;
    NaiveTime::from_hms_opt(hours, mins, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_series(minutes: &[i64]) -> Series {
        let ns: Vec<i64> = minutes.iter().map(|m| m * 60_000_000_000).collect();
        Series::new(columns::TIME, &ns)
            .cast(&DataType::Time)
            .unwrap()
    }

    fn light_frame(minutes: &[i64], lux: &[Option<f64>]) -> DataFrame {
        DataFrame::new(vec![
            time_series(minutes),
            Series::new(columns::WHITE_LIGHT, lux),
        ])
        .unwrap()
    }

    #[test]
    fn test_mean_sem_center_is_bucket_mean() {
        let df = light_frame(
            &[360, 360, 720],
            &[Some(100.0), Some(200.0), Some(50.0)],
        );
        let figure =
            build_light_figure(&[df], &["all"], &LightPlotConfig::default()).unwrap();
        let curve = &figure.curves[0];
        assert_eq!(curve.minutes, vec![360.0, 720.0]);
        assert_eq!(curve.center, vec![150.0, 50.0]);
        // single-sample bucket collapses its band
        assert_eq!(curve.lower[1], 50.0);
        assert_eq!(curve.upper[1], 50.0);
    }

    #[test]
    fn test_counts_scale_y_lim_to_max_count() {
        let a = light_frame(
            &[360, 360, 360, 720],
            &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
        );
        let b = light_frame(&[360, 720], &[Some(5.0), None]);
        let config = LightPlotConfig {
            plot_type: "counts".to_string(),
            ..Default::default()
        };
        let figure = build_light_figure(&[a, b], &["a", "b"], &config).unwrap();
        // max non-null bucket count is 3 -> y_lim = 30
        assert_eq!(figure.y_lim, 30.0);
        assert_eq!(figure.y_label, "Number of Samples counts");
        assert_eq!(figure.tick_increment, 5000.0);
        // null lux rows drop out of the counts
        assert_eq!(figure.curves[1].center, vec![1.0]);
    }

    #[test]
    fn test_quantiles_center_is_median() {
        let df = light_frame(
            &[360, 360, 360, 360],
            &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
        );
        let config = LightPlotConfig {
            plot_type: "quantiles".to_string(),
            ..Default::default()
        };
        let figure = build_light_figure(&[df], &["all"], &config).unwrap();
        let curve = &figure.curves[0];
        assert_eq!(curve.center, vec![2.5]);
        assert_eq!(curve.lower, vec![1.75]);
        assert_eq!(curve.upper, vec![3.25]);
    }

    #[test]
    fn test_mismatched_lengths_is_usage_error() {
        let df = light_frame(&[360], &[Some(1.0)]);
        let err = build_light_figure(&[df], &["a", "b"], &LightPlotConfig::default())
            .unwrap_err();
        assert!(matches!(err, PlotError::Usage(_)));
    }

    #[test]
    fn test_unknown_plot_type_is_usage_error() {
        let df = light_frame(&[360], &[Some(1.0)]);
        let config = LightPlotConfig {
            plot_type: "violin".to_string(),
            ..Default::default()
        };
        let err = build_light_figure(&[df], &["a"], &config).unwrap_err();
        assert!(matches!(err, PlotError::Usage(_)));
    }

    #[test]
    fn test_center_of_light_exposure() {
        // 100 lx at 06:00 and 300 lx at 18:00 -> weighted mean at 15:00
        let df = light_frame(&[360, 1080], &[Some(100.0), Some(300.0)]);
        let figure =
            build_light_figure(&[df], &["all"], &LightPlotConfig::default()).unwrap();
        let curve = &figure.curves[0];
        assert_eq!(
            curve.center_of_light,
            NaiveTime::from_hms_opt(15, 0, 0)
        );
        assert_eq!(curve.cumulative_exposure, 400.0 * 20.0);
        // summary sits on its own legend line
        assert_eq!(curve.label, "all\n8.000e3 lx*s, COLE 15:00:00");
    }

    #[test]
    fn test_zero_exposure_omits_center_of_light() {
        let df = light_frame(&[360, 720], &[Some(0.0), Some(0.0)]);
        let figure =
            build_light_figure(&[df], &["dark"], &LightPlotConfig::default()).unwrap();
        let curve = &figure.curves[0];
        assert!(curve.center_of_light.is_none());
        assert_eq!(curve.label, "dark");
    }

    #[test]
    fn test_zone_aware_time_column_buckets_local_wall_time() {
        // 2023-11-14T22:13:20Z is 15:13:20 in Denver
        let times = Series::new(columns::TIME, &[1_700_000_000_000i64])
            .cast(&DataType::Datetime(
                TimeUnit::Milliseconds,
                Some("America/Denver".to_string()),
            ))
            .unwrap();
        let df = DataFrame::new(vec![
            times,
            Series::new(columns::WHITE_LIGHT, &[Some(10.0)]),
        ])
        .unwrap();
        let figure =
            build_light_figure(&[df], &["all"], &LightPlotConfig::default()).unwrap();
        let minute = figure.curves[0].minutes[0];
        assert!((minute - (15.0 * 60.0 + 13.0 + 20.0 / 60.0)).abs() < 1e-6);
    }

    #[test]
    fn test_datetime_time_column_uses_time_of_day_only() {
        // two different dates, same 08:00 wall time, bucket together
        let day = 86_400_000i64;
        let eight = 8 * 3_600_000i64;
        let times = Series::new(columns::TIME, &[eight, day + eight])
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .unwrap();
        let df = DataFrame::new(vec![
            times,
            Series::new(columns::WHITE_LIGHT, &[Some(10.0), Some(30.0)]),
        ])
        .unwrap();
        let figure =
            build_light_figure(&[df], &["all"], &LightPlotConfig::default()).unwrap();
        assert_eq!(figure.curves[0].minutes, vec![480.0]);
        assert_eq!(figure.curves[0].center, vec![20.0]);
    }
}
