use serde::{Deserialize, Serialize};

use crate::core::geometry::to_bitmap;
use crate::error::{ChartError, ChartResult};
use crate::render::{BitmapTarget, TextBaseline, TextHAlign};

use super::PriceAxisView;

/// Tile geometry for price-axis labels, in media pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceAxisLabelStyle {
    pub font_size_px: f64,
    pub padding_x_px: f64,
    pub padding_y_px: f64,
    pub corner_radius_px: f64,
}

impl Default for PriceAxisLabelStyle {
    fn default() -> Self {
        Self {
            font_size_px: 11.0,
            padding_x_px: 6.0,
            padding_y_px: 3.0,
            corner_radius_px: 2.0,
        }
    }
}

impl PriceAxisLabelStyle {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis label font size must be finite and > 0".to_owned(),
            ));
        }
        for (value, name) in [
            (self.padding_x_px, "padding_x_px"),
            (self.padding_y_px, "padding_y_px"),
            (self.corner_radius_px, "corner_radius_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "axis label `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Draws price-axis labels into an axis-gutter target.
///
/// The tile spans the whole gutter width and is vertically centered on the
/// label coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceAxisLabelRenderer {
    style: PriceAxisLabelStyle,
}

impl PriceAxisLabelRenderer {
    pub fn new(style: PriceAxisLabelStyle) -> ChartResult<Self> {
        Ok(Self {
            style: style.validate()?,
        })
    }

    pub fn draw(&self, view: &dyn PriceAxisView, target: &mut BitmapTarget<'_>) -> ChartResult<()> {
        let ratio = target.pixel_ratio();
        let width = f64::from(target.bitmap_size().width);
        let font_size = to_bitmap(self.style.font_size_px, ratio);
        let height = font_size + 2.0 * to_bitmap(self.style.padding_y_px, ratio);
        let y = to_bitmap(view.coordinate(), ratio);

        let canvas = target.canvas();
        canvas.set_fill_color(view.back_color());
        canvas.fill_rounded_rect(
            0.0,
            y - height / 2.0,
            width,
            height,
            to_bitmap(self.style.corner_radius_px, ratio),
        )?;
        canvas.set_font_size(font_size);
        canvas.set_fill_color(view.text_color());
        canvas.fill_text(
            view.text(),
            to_bitmap(self.style.padding_x_px, ratio),
            y,
            TextHAlign::Left,
            TextBaseline::Middle,
        )
    }
}
