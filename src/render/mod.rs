mod canvas;
mod primitives;
mod recording_canvas;

pub use canvas::{BitmapSize, BitmapTarget, Canvas};
pub use primitives::{Color, LineStrokeStyle, TextBaseline, TextHAlign};
pub use recording_canvas::{CanvasCommand, RecordingCanvas};

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoCanvas;
