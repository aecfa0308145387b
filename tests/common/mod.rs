#![allow(dead_code)]

use std::rc::Rc;

use chart_drawings::core::{LinearCoordinateSource, Viewport};
use chart_drawings::primitives::{AttachedParams, RepaintRequest, SeriesPrimitive};
use chart_drawings::render::Color;

/// 1000x500 pane: x = time / 4 over 0..=4000 s, y = (250 - price) * 2 over
/// prices 0..=250.
pub fn trend_source() -> Rc<LinearCoordinateSource> {
    Rc::new(
        LinearCoordinateSource::new(Viewport::new(1000, 500), (0.0, 4000.0), (0.0, 250.0))
            .expect("valid source"),
    )
}

/// 1000x500 pane where price 50_000 sits at y = 120 (y = 50_120 - price).
pub fn horizontal_source() -> Rc<LinearCoordinateSource> {
    Rc::new(
        LinearCoordinateSource::new(
            Viewport::new(1000, 500),
            (0.0, 4000.0),
            (49_620.0, 50_120.0),
        )
        .expect("valid source"),
    )
}

pub fn attach(
    primitive: &mut dyn SeriesPrimitive,
    source: Rc<LinearCoordinateSource>,
) -> RepaintRequest {
    let repaint = RepaintRequest::new();
    primitive.attached(AttachedParams::new(source, repaint.callback()));
    repaint
}

pub fn green() -> Color {
    Color::from_hex("#16a34a").expect("valid color")
}

pub fn red() -> Color {
    Color::from_hex("#dc2626").expect("valid color")
}
