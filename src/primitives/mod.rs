//! Drawing primitives attached to a chart series.
//!
//! A primitive owns its drawings and rebuilds per-frame render records in
//! `update_all_views`; the host then reads `pane_views` (and
//! `price_axis_views`) and draws them. Mutators ask the host for a repaint
//! through the `request_update` callback received in `attached`.

pub mod horizontal_line;
mod paint;
mod price_axis;
pub mod trend_line;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::CoordinateSource;
use crate::error::ChartResult;
use crate::render::{BitmapTarget, Color};

pub use horizontal_line::{
    HorizontalLine, HorizontalLineAxisView, HorizontalLineOptions, HorizontalLinePrimitive,
    HorizontalLineRenderRecord,
};
pub use paint::{AxisLabel, PaintOutcome, paint_primitive};
pub use price_axis::{PriceAxisLabelRenderer, PriceAxisLabelStyle};
pub use trend_line::{
    LineHandle, TrendLine, TrendLineOptions, TrendLinePrimitive, TrendLineRenderRecord,
    TrendLineUpdate,
};

/// Paint order of a pane view relative to the host's own series.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveZOrder {
    Bottom,
    Normal,
    /// Above price candles.
    #[default]
    Top,
}

/// Draw routine over the render records of one frame.
pub trait PaneRenderer {
    fn draw(&self, target: &mut BitmapTarget<'_>) -> ChartResult<()>;
}

/// Exposes a primitive's current render records to the host paint pass.
pub trait PaneView {
    fn z_order(&self) -> PrimitiveZOrder {
        PrimitiveZOrder::Top
    }

    fn renderer(&self) -> &dyn PaneRenderer;
}

/// Label published into the price-axis gutter.
pub trait PriceAxisView {
    /// Media-space y of the label anchor.
    fn coordinate(&self) -> f64;
    fn text(&self) -> &str;
    fn back_color(&self) -> Color;
    fn text_color(&self) -> Color;
}

/// Host objects handed to a primitive when it is attached.
#[derive(Clone)]
pub struct AttachedParams {
    pub series: Rc<dyn CoordinateSource>,
    pub request_update: Rc<dyn Fn()>,
}

impl AttachedParams {
    #[must_use]
    pub fn new(series: Rc<dyn CoordinateSource>, request_update: Rc<dyn Fn()>) -> Self {
        Self {
            series,
            request_update,
        }
    }
}

impl fmt::Debug for AttachedParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachedParams").finish_non_exhaustive()
    }
}

/// Lifecycle and per-paint contract between a host chart and a primitive.
pub trait SeriesPrimitive {
    fn attached(&mut self, params: AttachedParams);

    /// Drops the host references; safe to call repeatedly.
    fn detached(&mut self);

    /// Rebuilds every view from the current state. Must run before the host
    /// reads `pane_views` or `price_axis_views` in a paint pass.
    fn update_all_views(&mut self);

    fn pane_views(&self) -> Vec<&dyn PaneView>;

    fn price_axis_views(&self) -> Vec<&dyn PriceAxisView> {
        Vec::new()
    }
}

/// Coalescing repaint flag a host can hand out as `request_update`.
#[derive(Debug, Clone, Default)]
pub struct RepaintRequest {
    pending: Rc<Cell<u32>>,
}

impl RepaintRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback that records one repaint request per invocation.
    #[must_use]
    pub fn callback(&self) -> Rc<dyn Fn()> {
        let pending = Rc::clone(&self.pending);
        Rc::new(move || pending.set(pending.get().saturating_add(1)))
    }

    #[must_use]
    pub fn pending_count(&self) -> u32 {
        self.pending.get()
    }

    /// Returns whether any repaint was requested since the last call and
    /// resets the counter.
    pub fn take(&self) -> bool {
        self.pending.replace(0) > 0
    }
}

/// Host state held by an attached primitive.
#[derive(Clone)]
pub(crate) struct Attachment {
    pub(crate) series: Rc<dyn CoordinateSource>,
    request_update: Rc<dyn Fn()>,
}

impl Attachment {
    pub(crate) fn from_params(params: AttachedParams) -> Self {
        Self {
            series: params.series,
            request_update: params.request_update,
        }
    }

    pub(crate) fn request_update(&self) {
        (self.request_update)();
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment").finish_non_exhaustive()
    }
}
