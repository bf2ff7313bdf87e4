//! Circadian light and sleep timing visualization.
//!
//! Two plot families over actigraphy-style light logger data:
//!
//! - **Clock plots** lay subject timing out on a 24-hour polar dial, one
//!   face per group value: night shading between median sunset and sunrise,
//!   an interquartile band pair (first light / last light) per lux
//!   threshold, and a sleep band, each with its median marked.
//! - **Light plots** overlay one aggregated light-intensity curve per
//!   condition over time of day, with an uncertainty band and a legend
//!   summary of cumulative exposure and the center of light exposure.
//!
//! Figure construction ([`build_clock_figure`], [`build_light_figure`]) is
//! separate from rendering ([`clock_plot`], [`light_plot`]), so the
//! statistical layout can be inspected and tested without a drawing
//! backend. Input data comes in as polars `DataFrame`s; expected column
//! names live in [`transformations::columns`].

pub mod error;
pub mod models;
pub mod palette;
pub mod render;
pub mod services;
pub mod time;
pub mod transformations;

pub use error::{PlotError, PlotResult};
pub use models::{
    ClockBand, ClockFace, ClockFigure, ClockPlotConfig, LightCurve, LightFigure, LightPlotConfig,
    NightShading,
};
pub use render::{clock_plot, light_plot};
pub use services::clock::{build_clock_figure, mins_to_radians};
pub use services::light::build_light_figure;
