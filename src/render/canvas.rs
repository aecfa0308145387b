use crate::error::{ChartError, ChartResult};
use crate::render::{Color, TextBaseline, TextHAlign};

/// Device-pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapSize {
    pub width: u32,
    pub height: u32,
}

impl BitmapSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Immediate-mode 2D drawing contract implemented by canvas backends.
///
/// All coordinates and lengths are in bitmap (device) pixels. Path state
/// follows the usual begin/move/line/stroke model; style setters persist
/// until changed.
pub trait Canvas {
    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    /// Empty pattern means a solid stroke.
    fn set_line_dash(&mut self, pattern: &[f64]);
    fn set_font_size(&mut self, size_px: f64);
    /// Width of `text` at the current font size.
    fn measure_text(&mut self, text: &str) -> f64;

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self) -> ChartResult<()>;

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;
    fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> ChartResult<()>;
    fn fill_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        h_align: TextHAlign,
        baseline: TextBaseline,
    ) -> ChartResult<()>;

    /// Strokes a single segment with the current stroke state.
    fn stroke_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> ChartResult<()> {
        self.begin_path();
        self.move_to(x1, y1);
        self.line_to(x2, y2);
        self.stroke()
    }
}

/// Canvas handed to renderers together with its bitmap size and pixel ratio.
pub struct BitmapTarget<'a> {
    canvas: &'a mut dyn Canvas,
    bitmap_size: BitmapSize,
    pixel_ratio: f64,
}

impl<'a> BitmapTarget<'a> {
    pub fn new(
        canvas: &'a mut dyn Canvas,
        bitmap_size: BitmapSize,
        pixel_ratio: f64,
    ) -> ChartResult<Self> {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            canvas,
            bitmap_size,
            pixel_ratio,
        })
    }

    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    #[must_use]
    pub fn bitmap_size(&self) -> BitmapSize {
        self.bitmap_size
    }

    #[must_use]
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }
}
