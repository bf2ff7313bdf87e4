//! Figure construction services.
//!
//! Each service is a pure, single-pass transform from fully-materialized
//! input to a chart-ready figure model. No state is shared between calls.

pub mod clock;
pub mod light;
pub mod stats;
