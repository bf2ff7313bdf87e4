//! Rendering of figure models to image files via plotters.
//!
//! The `draw` functions in the submodules are generic over the drawing
//! backend; the entry points here pick a backend from the output path
//! extension (".svg" for vector output, anything else rasterized) and hand
//! back the figure model so callers can inspect what was drawn.

use std::path::Path;

use plotters::prelude::*;
use polars::prelude::DataFrame;

use crate::error::{PlotError, PlotResult};
use crate::models::{ClockFigure, ClockPlotConfig, LightFigure, LightPlotConfig};
use crate::palette::Rgb;
use crate::services;

pub mod axis;
pub mod clock;
pub mod light;

const CLOCK_FACE_SIZE: (u32, u32) = (640, 520);
const LIGHT_SIZE: (u32, u32) = (960, 540);

/// Build and render a clock figure for a grouping within timing data.
///
/// One panel is stacked per group value. Returns the figure model that was
/// drawn.
pub fn clock_plot<P: AsRef<Path>>(
    timing_data: &DataFrame,
    group_by: &str,
    config: &ClockPlotConfig,
    path: P,
) -> PlotResult<ClockFigure> {
    let figure = services::clock::build_clock_figure(timing_data, group_by, config)?;
    let path = path.as_ref();
    let size = (
        CLOCK_FACE_SIZE.0,
        CLOCK_FACE_SIZE.1 * figure.faces.len().max(1) as u32,
    );
    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        clock::draw(&figure, &root)?;
        root.present().map_err(render_err)?;
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        clock::draw(&figure, &root)?;
        root.present().map_err(render_err)?;
    }
    Ok(figure)
}

/// Build and render a light figure from one series frame per label.
///
/// Returns the figure model that was drawn.
pub fn light_plot<P: AsRef<Path>>(
    data_list: &[DataFrame],
    labels: &[&str],
    config: &LightPlotConfig,
    path: P,
) -> PlotResult<LightFigure> {
    let figure = services::light::build_light_figure(data_list, labels, config)?;
    let path = path.as_ref();
    if is_svg(path) {
        let root = SVGBackend::new(path, LIGHT_SIZE).into_drawing_area();
        light::draw(&figure, &root)?;
        root.present().map_err(render_err)?;
    } else {
        let root = BitMapBackend::new(path, LIGHT_SIZE).into_drawing_area();
        light::draw(&figure, &root)?;
        root.present().map_err(render_err)?;
    }
    Ok(figure)
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("svg"))
}

pub(crate) fn render_err(err: impl std::fmt::Display) -> PlotError {
    PlotError::Render(err.to_string())
}

pub(crate) fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}
