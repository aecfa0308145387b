use crate::core::PixelPoint;
use crate::core::geometry::to_bitmap;
use crate::error::ChartResult;
use crate::primitives::{PaneRenderer, PaneView};
use crate::render::{BitmapTarget, Canvas, Color, LineStrokeStyle, TextBaseline, TextHAlign};

use super::{TrendLineOptions, format_price_change};

/// Per-frame render data of one trend line (or the drawing preview), in
/// media pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLineRenderRecord {
    pub id: String,
    pub start: PixelPoint,
    pub end: PixelPoint,
    pub color: Color,
    pub line_width: f64,
    pub line_style: LineStrokeStyle,
    pub is_selected: bool,
    pub price_diff: f64,
    pub percent_diff: f64,
}

impl TrendLineRenderRecord {
    /// Text of the price-change bubble drawn at the end point.
    #[must_use]
    pub fn label_text(&self) -> String {
        format_price_change(self.price_diff, self.percent_diff)
    }
}

#[derive(Debug, Clone)]
struct TrendLineRenderer {
    records: Vec<TrendLineRenderRecord>,
    options: TrendLineOptions,
}

impl TrendLineRenderer {
    fn draw_label(
        &self,
        canvas: &mut dyn Canvas,
        record: &TrendLineRenderRecord,
        anchor: (f64, f64),
        ratio: f64,
    ) -> ChartResult<()> {
        let text = record.label_text();
        let font_size = to_bitmap(self.options.label_font_size_px, ratio);
        let padding_x = to_bitmap(self.options.label_padding_x_px, ratio);
        let padding_y = to_bitmap(self.options.label_padding_y_px, ratio);

        canvas.set_font_size(font_size);
        let width = canvas.measure_text(&text) + 2.0 * padding_x;
        let height = font_size + 2.0 * padding_y;
        let left = anchor.0 + to_bitmap(self.options.label_offset_px, ratio);

        canvas.set_fill_color(record.color);
        canvas.fill_rounded_rect(
            left,
            anchor.1 - height / 2.0,
            width,
            height,
            to_bitmap(self.options.label_corner_radius_px, ratio),
        )?;
        canvas.set_fill_color(self.options.label_text_color);
        canvas.fill_text(
            &text,
            left + padding_x,
            anchor.1,
            TextHAlign::Left,
            TextBaseline::Middle,
        )
    }
}

impl PaneRenderer for TrendLineRenderer {
    fn draw(&self, target: &mut BitmapTarget<'_>) -> ChartResult<()> {
        let ratio = target.pixel_ratio();
        let handle_size = to_bitmap(self.options.handle_size_px, ratio);
        let canvas = target.canvas();

        for record in &self.records {
            let start = (to_bitmap(record.start.x, ratio), to_bitmap(record.start.y, ratio));
            let end = (to_bitmap(record.end.x, ratio), to_bitmap(record.end.y, ratio));

            canvas.set_stroke_color(record.color);
            canvas.set_line_width(to_bitmap(record.line_width, ratio));
            canvas.set_line_dash(&record.line_style.dash_pattern(ratio));
            canvas.stroke_segment(start.0, start.1, end.0, end.1)?;

            if record.is_selected {
                canvas.set_fill_color(record.color);
                for (x, y) in [start, end] {
                    canvas.fill_rect(
                        x - handle_size / 2.0,
                        y - handle_size / 2.0,
                        handle_size,
                        handle_size,
                    )?;
                }
            }

            self.draw_label(canvas, record, end, ratio)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub(super) struct TrendLinePaneView {
    renderer: TrendLineRenderer,
}

impl TrendLinePaneView {
    pub(super) fn new(options: TrendLineOptions) -> Self {
        Self {
            renderer: TrendLineRenderer {
                records: Vec::new(),
                options,
            },
        }
    }

    pub(super) fn set_records(&mut self, records: Vec<TrendLineRenderRecord>) {
        self.renderer.records = records;
    }

    pub(super) fn records(&self) -> &[TrendLineRenderRecord] {
        &self.renderer.records
    }
}

impl PaneView for TrendLinePaneView {
    fn renderer(&self) -> &dyn PaneRenderer {
        &self.renderer
    }
}
