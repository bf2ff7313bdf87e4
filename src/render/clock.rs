//! Clock figure rendering: polar wedges drawn on a hidden cartesian plane.
//!
//! Zero radians points at 00:00 straight up and angles advance clockwise,
//! so each minute-of-day angle lands where it would on a 24-hour dial.

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::PlotResult;
use crate::models::{ClockBand, ClockFace, ClockFigure};
use crate::palette::{MEDIAN_GRAY, NIGHT_GRAY};
use crate::render::{render_err, rgb};
use crate::time::{minutes_to_radians, print_time};

/// Angular width of a one-minute wedge.
const BAR_WIDTH: f64 = 2.0 * std::f64::consts::PI / 1440.0;

/// Angular width of the night and median marker wedges.
const MARKER_WIDTH: f64 = 0.02;

/// Radius of the hour labels, outside the unit dial.
const LABEL_RADIUS: f64 = 1.18;

/// Draw a clock figure onto a drawing area, one stacked face per group.
pub fn draw<DB: DrawingBackend>(
    figure: &ClockFigure,
    area: &DrawingArea<DB, Shift>,
) -> PlotResult<()> {
    area.fill(&WHITE).map_err(render_err)?;
    let rows = figure.faces.len().max(1);
    let panels = area.split_evenly((rows, 1));
    for (face, panel) in figure.faces.iter().zip(panels.iter()) {
        draw_face(face, panel)?;
    }
    Ok(())
}

fn draw_face<DB: DrawingBackend>(
    face: &ClockFace,
    area: &DrawingArea<DB, Shift>,
) -> PlotResult<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(&face.title, ("sans-serif", 18))
        .margin(8)
        .build_cartesian_2d(-1.5f64..1.5f64, -1.5f64..1.5f64)
        .map_err(render_err)?;

    if let Some(night) = &face.night {
        let night_style = rgb(NIGHT_GRAY).filled();
        chart
            .draw_series(
                night
                    .pre_dawn
                    .iter()
                    .chain(night.post_dusk.iter())
                    .map(|&angle| Polygon::new(wedge(angle, 0.0, 1.0, MARKER_WIDTH), night_style)),
            )
            .map_err(render_err)?;
    }

    for band in &face.bands {
        draw_band(&mut chart, band)?;
    }

    dial_decorations(&mut chart)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("monospace", 13))
        .draw()
        .map_err(render_err)?;
    Ok(())
}

fn draw_band<DB: DrawingBackend>(
    chart: &mut ChartContext<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    band: &ClockBand,
) -> PlotResult<()> {
    let style = rgb(band.color).filled();
    let inner = band.inner;
    let height = band.height;
    let series = chart
        .draw_series(
            band.angles
                .iter()
                .map(|&angle| Polygon::new(wedge(angle, inner, height, BAR_WIDTH), style)),
        )
        .map_err(render_err)?;
    if let Some(label) = &band.label {
        let legend_color = rgb(band.color);
        series.label(label).legend(move |(x, y)| {
            Rectangle::new([(x, y - 5), (x + 10, y + 5)], legend_color.filled())
        });
    }
    if let Some(median) = band.median {
        chart
            .draw_series(std::iter::once(Polygon::new(
                wedge(median, inner, height, MARKER_WIDTH),
                rgb(MEDIAN_GRAY).filled(),
            )))
            .map_err(render_err)?;
    }
    Ok(())
}

/// Dial outline and the hour labels every four hours.
fn dial_decorations<DB: DrawingBackend>(
    chart: &mut ChartContext<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
) -> PlotResult<()> {
    let outline: Vec<(f64, f64)> = (0..=720)
        .map(|i| polar_xy(i as f64 / 720.0 * 2.0 * std::f64::consts::PI, 1.0))
        .collect();
    chart
        .draw_series(std::iter::once(PathElement::new(
            outline,
            RGBColor(120, 120, 120),
        )))
        .map_err(render_err)?;

    let label_style = TextStyle::from(("sans-serif", 14).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart
        .draw_series((0..6).map(|i| {
            let minutes = (i * 240) as f64;
            Text::new(
                print_time(minutes),
                polar_xy(minutes_to_radians(minutes), LABEL_RADIUS),
                label_style.clone(),
            )
        }))
        .map_err(render_err)?;
    Ok(())
}

/// Cartesian position of a polar point; midnight up, clockwise.
fn polar_xy(theta: f64, r: f64) -> (f64, f64) {
    (r * theta.sin(), r * theta.cos())
}

/// Corner points of a radial wedge centered on `theta`.
fn wedge(theta: f64, inner: f64, height: f64, width: f64) -> Vec<(f64, f64)> {
    let half = width / 2.0;
    vec![
        polar_xy(theta - half, inner),
        polar_xy(theta + half, inner),
        polar_xy(theta + half, inner + height),
        polar_xy(theta - half, inner + height),
    ]
}
