use cairo::Context;
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{ChartError, ChartResult};
use crate::render::{Canvas, Color, TextBaseline, TextHAlign};

/// Cairo + Pango + PangoCairo canvas backend.
///
/// Draws on an external Cairo context (an offscreen `ImageSurface` or a GTK
/// `DrawingArea` callback context). The context is expected to be in bitmap
/// coordinates, i.e. without a device-scale transform applied.
#[derive(Debug)]
pub struct CairoCanvas<'a> {
    context: &'a Context,
    stroke_color: Color,
    fill_color: Color,
    font_size_px: f64,
}

impl<'a> CairoCanvas<'a> {
    #[must_use]
    pub fn new(context: &'a Context) -> Self {
        Self {
            context,
            stroke_color: Color::rgb(0.0, 0.0, 0.0),
            fill_color: Color::rgb(0.0, 0.0, 0.0),
            font_size_px: 10.0,
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    fn layout(&self, text: &str) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(self.context);
        layout.set_font_description(Some(&font_description(self.font_size_px)));
        layout.set_text(text);
        layout
    }
}

impl Canvas for CairoCanvas<'_> {
    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        self.context.set_dash(pattern, 0.0);
    }

    fn set_font_size(&mut self, size_px: f64) {
        self.font_size_px = size_px;
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        let (width, _height) = self.layout(text).pixel_size();
        f64::from(width)
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn stroke(&mut self) -> ChartResult<()> {
        apply_color(self.context, self.stroke_color);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.context.new_path();
        self.context.rectangle(x, y, width, height);
        apply_color(self.context, self.fill_color);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }

    fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> ChartResult<()> {
        self.context.new_path();
        append_rounded_rect_path(self.context, x, y, width, height, radius);
        apply_color(self.context, self.fill_color);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rounded rectangle", err))
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        h_align: TextHAlign,
        baseline: TextBaseline,
    ) -> ChartResult<()> {
        let layout = self.layout(text);
        let (text_width, text_height) = layout.pixel_size();
        let (text_width, text_height) = (f64::from(text_width), f64::from(text_height));
        let left = match h_align {
            TextHAlign::Left => x,
            TextHAlign::Center => x - text_width / 2.0,
            TextHAlign::Right => x - text_width,
        };
        let top = match baseline {
            TextBaseline::Top => y,
            TextBaseline::Middle => y - text_height / 2.0,
            TextBaseline::Bottom => y - text_height,
        };

        self.context.new_path();
        apply_color(self.context, self.fill_color);
        self.context.move_to(left, top);
        pangocairo::functions::show_layout(self.context, &layout);
        self.context.new_path();
        Ok(())
    }
}

/// Sans font sized in device pixels; a plain `"Sans {size}"` string would be
/// read as points.
fn font_description(size_px: f64) -> FontDescription {
    let mut description = FontDescription::new();
    description.set_family("Sans");
    description.set_absolute_size(size_px * f64::from(pango::SCALE));
    description
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rounded_rect_path(
    context: &Context,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
) {
    if radius <= 0.0 {
        context.rectangle(x, y, width, height);
        return;
    }

    let radius = radius.min(width * 0.5).min(height * 0.5);
    let right = x + width;
    let bottom = y + height;

    context.new_sub_path();
    context.arc(right - radius, y + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(x + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(x + radius, y + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
