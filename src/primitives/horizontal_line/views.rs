use crate::core::geometry::to_bitmap;
use crate::error::ChartResult;
use crate::primitives::{PaneRenderer, PaneView, PriceAxisView};
use crate::render::{BitmapTarget, Color, LineStrokeStyle, TextBaseline, TextHAlign};

use super::HorizontalLineOptions;

/// Per-frame render data of one visible horizontal line, in media pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalLineRenderRecord {
    pub id: String,
    pub y: f64,
    pub price: f64,
    pub color: Color,
    pub line_width: f64,
    pub line_style: LineStrokeStyle,
    pub label: Option<String>,
    pub is_selected: bool,
}

#[derive(Debug, Clone)]
struct HorizontalLineRenderer {
    records: Vec<HorizontalLineRenderRecord>,
    options: HorizontalLineOptions,
}

impl PaneRenderer for HorizontalLineRenderer {
    fn draw(&self, target: &mut BitmapTarget<'_>) -> ChartResult<()> {
        let ratio = target.pixel_ratio();
        let width = f64::from(target.bitmap_size().width);
        let handle_length = to_bitmap(self.options.handle_length_px, ratio);
        let canvas = target.canvas();

        for record in &self.records {
            let y = to_bitmap(record.y, ratio);
            canvas.set_stroke_color(record.color);
            canvas.set_line_width(to_bitmap(record.line_width, ratio));
            canvas.set_line_dash(&record.line_style.dash_pattern(ratio));
            canvas.stroke_segment(0.0, y, width, y)?;

            if record.is_selected {
                // Handles stay solid whatever the line style.
                canvas.set_line_dash(&[]);
                canvas.set_line_width(to_bitmap(self.options.handle_width_px, ratio));
                canvas.stroke_segment(0.0, y, handle_length, y)?;
                canvas.stroke_segment(width - handle_length, y, width, y)?;
            }

            if let Some(label) = record.label.as_deref().filter(|label| !label.is_empty()) {
                canvas.set_font_size(to_bitmap(self.options.label_font_size_px, ratio));
                canvas.set_fill_color(record.color);
                canvas.fill_text(
                    label,
                    to_bitmap(self.options.label_inset_px, ratio),
                    y - to_bitmap(self.options.label_offset_px, ratio),
                    TextHAlign::Left,
                    TextBaseline::Bottom,
                )?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub(super) struct HorizontalLinePaneView {
    renderer: HorizontalLineRenderer,
}

impl HorizontalLinePaneView {
    pub(super) fn new(options: HorizontalLineOptions) -> Self {
        Self {
            renderer: HorizontalLineRenderer {
                records: Vec::new(),
                options,
            },
        }
    }

    pub(super) fn set_records(&mut self, records: Vec<HorizontalLineRenderRecord>) {
        self.renderer.records = records;
    }

    pub(super) fn records(&self) -> &[HorizontalLineRenderRecord] {
        &self.renderer.records
    }
}

impl PaneView for HorizontalLinePaneView {
    fn renderer(&self) -> &dyn PaneRenderer {
        &self.renderer
    }
}

/// Price-axis label of one visible horizontal line.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalLineAxisView {
    pub price: f64,
    pub color: Color,
    pub coordinate: f64,
    pub text: String,
    pub text_color: Color,
}

impl PriceAxisView for HorizontalLineAxisView {
    fn coordinate(&self) -> f64 {
        self.coordinate
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn back_color(&self) -> Color {
        self.color
    }

    fn text_color(&self) -> Color {
        self.text_color
    }
}

/// Formats `price` rounded to `precision` decimals.
pub(super) fn format_axis_price(price: f64, precision: usize) -> String {
    let factor = 10_f64.powi(precision as i32);
    format!("{:.*}", precision, (price * factor).round() / factor)
}
