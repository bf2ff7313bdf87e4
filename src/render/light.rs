//! Light figure rendering: center lines with a shaded uncertainty band per
//! series, over a 24-hour time-of-day axis.
//!
//! The legend is drawn by hand rather than through the chart's series
//! labels, since curve labels carry a newline-separated exposure summary
//! line and series labels are single-line only.

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::PlotResult;
use crate::models::LightFigure;
use crate::render::axis::{HourAxis, ValueAxis};
use crate::render::{render_err, rgb};

const BAND_OPACITY: f64 = 0.33;

const LEGEND_WIDTH: i32 = 300;
const LEGEND_LINE_HEIGHT: i32 = 16;
const LEGEND_ENTRY_GAP: i32 = 6;

/// Draw a light figure onto a drawing area.
pub fn draw<DB: DrawingBackend>(
    figure: &LightFigure,
    area: &DrawingArea<DB, Shift>,
) -> PlotResult<()> {
    area.fill(&WHITE).map_err(render_err)?;
    let y_axis = ValueAxis {
        max: figure.y_lim.max(1.0),
        step: figure.tick_increment,
    };
    let mut chart = ChartBuilder::on(area)
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(HourAxis, y_axis)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Time of day")
        .y_desc(figure.y_label.as_str())
        .draw()
        .map_err(render_err)?;

    for curve in &figure.curves {
        let color = rgb(curve.color);
        let hours: Vec<f64> = curve.minutes.iter().map(|m| m / 60.0).collect();

        // Uncertainty band: the lower edge forward, the upper edge back.
        let band: Vec<(f64, f64)> = hours
            .iter()
            .zip(&curve.lower)
            .map(|(&h, &v)| (h, v))
            .chain(
                hours
                    .iter()
                    .zip(&curve.upper)
                    .rev()
                    .map(|(&h, &v)| (h, v)),
            )
            .collect();
        chart
            .draw_series(std::iter::once(Polygon::new(
                band,
                color.mix(BAND_OPACITY).filled(),
            )))
            .map_err(render_err)?;

        let line: Vec<(f64, f64)> = hours
            .iter()
            .zip(&curve.center)
            .map(|(&h, &v)| (h, v))
            .collect();
        chart
            .draw_series(LineSeries::new(line, color.stroke_width(2)))
            .map_err(render_err)?;
    }

    draw_legend(figure, area)
}

/// Upper-right legend with one sample line and up to two text lines per
/// curve.
fn draw_legend<DB: DrawingBackend>(
    figure: &LightFigure,
    area: &DrawingArea<DB, Shift>,
) -> PlotResult<()> {
    let (width, _) = area.dim_in_pixel();
    let font = TextStyle::from(("sans-serif", 13).into_font());
    let x = width as i32 - LEGEND_WIDTH;
    let mut y = 24i32;
    for curve in &figure.curves {
        let color = rgb(curve.color);
        area.draw(&PathElement::new(
            vec![(x, y + 6), (x + 20, y + 6)],
            color.stroke_width(2),
        ))
        .map_err(render_err)?;
        let lines: Vec<&str> = curve.label.split('\n').collect();
        for (i, line) in lines.iter().enumerate() {
            area.draw(&Text::new(
                (*line).to_string(),
                (x + 28, y + i as i32 * LEGEND_LINE_HEIGHT),
                font.clone(),
            ))
            .map_err(render_err)?;
        }
        y += lines.len() as i32 * LEGEND_LINE_HEIGHT + LEGEND_ENTRY_GAP;
    }
    Ok(())
}
