//! Error types for plot construction and rendering.

/// Result type for plotting operations
pub type PlotResult<T> = Result<T, PlotError>;

/// Error type for plotting operations.
///
/// Usage and schema problems fail the call immediately; data-quality issues
/// (missing timezone, empty interquartile ranges) degrade the figure with a
/// warning instead and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),

    #[error("Render error: {0}")]
    Render(String),
}
