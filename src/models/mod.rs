//! Chart-ready figure models.
//!
//! These are the in-memory figure objects the services produce and the
//! render layer consumes: plain data with no drawing dependencies, so the
//! statistical layout can be inspected and tested without a backend.

use chrono::NaiveTime;

use crate::palette::Rgb;

// =========================================================
// Clock Plot Types
// =========================================================

/// Per-minute angles shaded as night on a clock face: everything before the
/// median sunrise and after the median sunset.
#[derive(Debug, Clone)]
pub struct NightShading {
    pub pre_dawn: Vec<f64>,
    pub post_dusk: Vec<f64>,
}

/// A single radial band on a clock face.
///
/// `angles` holds one angle per integer minute across the interquartile
/// range; an empty vector draws nothing but the median marker. Bands with a
/// `label` contribute a legend entry.
#[derive(Debug, Clone)]
pub struct ClockBand {
    pub angles: Vec<f64>,
    pub median: Option<f64>,
    /// Inner radius of the band on the unit clock face.
    pub inner: f64,
    /// Radial thickness of the band.
    pub height: f64,
    pub color: Rgb,
    pub label: Option<String>,
}

/// One polar subplot: the clock face for a single group value.
#[derive(Debug, Clone)]
pub struct ClockFace {
    pub group_value: String,
    pub title: String,
    /// `None` when no usable timezone could be established for the
    /// sunrise/sunset columns; the face still renders without shading.
    pub night: Option<NightShading>,
    pub bands: Vec<ClockBand>,
}

/// A complete clock figure, one face per distinct group value.
#[derive(Debug, Clone)]
pub struct ClockFigure {
    pub faces: Vec<ClockFace>,
}

/// Options for clock figure construction.
#[derive(Debug, Clone)]
pub struct ClockPlotConfig {
    /// Light thresholds (lux) to draw, outermost first. Empty means every
    /// distinct threshold present in the data, in appearance order.
    pub thresholds: Vec<f64>,
    /// Timezone of the provided data, e.g. "America/Denver". Used to
    /// localize timezone-naive sunrise/sunset columns.
    pub timezone: Option<String>,
    pub palette: String,
}

impl Default for ClockPlotConfig {
    fn default() -> Self {
        Self {
            thresholds: Vec::new(),
            timezone: None,
            palette: "Set2".to_string(),
        }
    }
}

// =========================================================
// Light Plot Types
// =========================================================

/// An aggregated light-exposure curve for one input series.
#[derive(Debug, Clone)]
pub struct LightCurve {
    /// Legend label; the exposure summary follows on a second
    /// newline-separated line when available.
    pub label: String,
    /// Time-of-day positions (minutes since midnight), ascending.
    pub minutes: Vec<f64>,
    pub center: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub color: Rgb,
    /// Lux-weighted mean time of day of the center curve, when the series
    /// carries any light exposure mass.
    pub center_of_light: Option<NaiveTime>,
    /// Total exposure over the center curve, in lux-seconds.
    pub cumulative_exposure: f64,
}

/// A complete light figure with axis metadata.
#[derive(Debug, Clone)]
pub struct LightFigure {
    pub curves: Vec<LightCurve>,
    pub y_label: String,
    pub y_lim: f64,
    pub tick_increment: f64,
}

/// Options for light figure construction.
#[derive(Debug, Clone)]
pub struct LightPlotConfig {
    pub palette: String,
    /// One of "mean/sem", "counts", or "quantiles".
    pub plot_type: String,
    /// Upper bound of the y axis. Ignored for "counts", which scales to the
    /// observed sample counts instead.
    pub y_lim: f64,
}

impl Default for LightPlotConfig {
    fn default() -> Self {
        Self {
            palette: "deep".to_string(),
            plot_type: "mean/sem".to_string(),
            y_lim: 2500.0,
        }
    }
}
