use serde::{Deserialize, Serialize};

/// Media-space (CSS pixel) size of the pane a primitive is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Anchor of a drawing in chart domain space.
///
/// `time` is a unix timestamp in whole seconds, matching the host time axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub time: i64,
    pub price: f64,
}

impl LinePoint {
    #[must_use]
    pub const fn new(time: i64, price: f64) -> Self {
        Self { time, price }
    }

    /// Returns the point moved by a time/price delta.
    #[must_use]
    pub fn shifted(self, delta_time: i64, delta_price: f64) -> Self {
        Self {
            time: self.time.saturating_add(delta_time),
            price: self.price + delta_price,
        }
    }
}

/// Point in media pixel space, as reported by pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
