//! chart-drawings: annotation primitives for price/time charts.
//!
//! Horizontal support/resistance lines and two-point trend lines attach to a
//! host chart through a `CoordinateSource`, keep their own geometric state,
//! answer pointer hit-tests and render into a bitmap-space `Canvas`.

pub mod core;
pub mod error;
pub mod interaction;
pub mod primitives;
pub mod render;
pub mod telemetry;

pub use error::{ChartError, ChartResult};
pub use primitives::{HorizontalLinePrimitive, SeriesPrimitive, TrendLinePrimitive};
