use tracing::{trace, warn};

use crate::error::ChartResult;
use crate::render::{BitmapTarget, Color};

use super::SeriesPrimitive;

/// Snapshot of one price-axis label produced by a paint pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub coordinate: f64,
    pub text: String,
    pub back_color: Color,
    pub text_color: Color,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaintOutcome {
    pub pane_views_drawn: usize,
    pub axis_labels: Vec<AxisLabel>,
}

/// Runs one host paint pass for `primitive`.
///
/// Views are refreshed first, pane views are drawn in z-order (stable for
/// equal orders) and the price-axis labels are returned for the host gutter.
pub fn paint_primitive(
    primitive: &mut dyn SeriesPrimitive,
    target: &mut BitmapTarget<'_>,
) -> ChartResult<PaintOutcome> {
    primitive.update_all_views();

    let mut views = primitive.pane_views();
    views.sort_by_key(|view| view.z_order());
    for view in &views {
        view.renderer()
            .draw(target)
            .inspect_err(|err| warn!(error = %err, "pane view draw failed"))?;
    }

    let axis_labels: Vec<AxisLabel> = primitive
        .price_axis_views()
        .into_iter()
        .map(|view| AxisLabel {
            coordinate: view.coordinate(),
            text: view.text().to_owned(),
            back_color: view.back_color(),
            text_color: view.text_color(),
        })
        .collect();

    trace!(
        pane_views = views.len(),
        axis_labels = axis_labels.len(),
        "painted primitive"
    );
    Ok(PaintOutcome {
        pane_views_drawn: views.len(),
        axis_labels,
    })
}
