use smallvec::SmallVec;

use crate::error::ChartResult;
use crate::render::{Canvas, Color, TextBaseline, TextHAlign};

/// Average glyph advance relative to the font size used by `measure_text`.
const CHAR_WIDTH_RATIO: f64 = 0.6;

/// One drawing call captured by `RecordingCanvas`, with the style state that
/// was active when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    Stroke {
        segments: Vec<((f64, f64), (f64, f64))>,
        color: Color,
        line_width: f64,
        dash: SmallVec<[f64; 2]>,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    FillRoundedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        color: Color,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
        baseline: TextBaseline,
    },
}

/// Headless canvas used by tests and hosts without a drawing backend.
///
/// Commands are recorded in issue order; text width is estimated from the
/// character count.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    commands: Vec<CanvasCommand>,
    stroke_color: Color,
    fill_color: Color,
    line_width: f64,
    dash: SmallVec<[f64; 2]>,
    font_size_px: f64,
    cursor: Option<(f64, f64)>,
    path: Vec<((f64, f64), (f64, f64))>,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            stroke_color: Color::rgb(0.0, 0.0, 0.0),
            fill_color: Color::rgb(0.0, 0.0, 0.0),
            line_width: 1.0,
            dash: SmallVec::new(),
            font_size_px: 10.0,
            cursor: None,
            path: Vec::new(),
        }
    }
}

impl RecordingCanvas {
    #[must_use]
    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn strokes(&self) -> impl Iterator<Item = &CanvasCommand> {
        self.commands
            .iter()
            .filter(|command| matches!(command, CanvasCommand::Stroke { .. }))
    }

    /// Texts drawn so far, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            CanvasCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        self.dash = SmallVec::from_slice(pattern);
    }

    fn set_font_size(&mut self, size_px: f64) {
        self.font_size_px = size_px;
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.font_size_px * CHAR_WIDTH_RATIO
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.cursor = None;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if let Some(from) = self.cursor {
            self.path.push((from, (x, y)));
        }
        self.cursor = Some((x, y));
    }

    fn stroke(&mut self) -> ChartResult<()> {
        self.commands.push(CanvasCommand::Stroke {
            segments: self.path.clone(),
            color: self.stroke_color,
            line_width: self.line_width,
            dash: self.dash.clone(),
        });
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.commands.push(CanvasCommand::FillRect {
            x,
            y,
            width,
            height,
            color: self.fill_color,
        });
        Ok(())
    }

    fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> ChartResult<()> {
        self.commands.push(CanvasCommand::FillRoundedRect {
            x,
            y,
            width,
            height,
            radius,
            color: self.fill_color,
        });
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        h_align: TextHAlign,
        baseline: TextBaseline,
    ) -> ChartResult<()> {
        self.commands.push(CanvasCommand::FillText {
            text: text.to_owned(),
            x,
            y,
            font_size_px: self.font_size_px,
            color: self.fill_color,
            h_align,
            baseline,
        });
        Ok(())
    }
}
