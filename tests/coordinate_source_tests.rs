mod common;

use std::rc::Rc;

use chart_drawings::ChartError;
use chart_drawings::core::{CoordinateSource, LinearCoordinateSource, Viewport};
use chart_drawings::primitives::{
    AttachedParams, HorizontalLine, HorizontalLinePrimitive, RepaintRequest, SeriesPrimitive,
};

use common::{green, trend_source};

#[test]
fn price_axis_is_inverted_and_bounded() {
    let source = trend_source();
    assert_eq!(source.price_to_coordinate(250.0), Some(0.0));
    assert_eq!(source.price_to_coordinate(0.0), Some(500.0));
    assert_eq!(source.price_to_coordinate(100.0), Some(300.0));
    assert_eq!(source.price_to_coordinate(250.5), None);
    assert_eq!(source.price_to_coordinate(-0.5), None);
    assert_eq!(source.price_to_coordinate(f64::NAN), None);

    assert_eq!(source.coordinate_to_price(300.0), Some(100.0));
    assert_eq!(source.coordinate_to_price(500.5), None);
    assert_eq!(source.coordinate_to_price(f64::INFINITY), None);
}

#[test]
fn time_axis_maps_visible_range_to_width() {
    let source = trend_source();
    assert_eq!(source.time_to_coordinate(0), Some(0.0));
    assert_eq!(source.time_to_coordinate(4000), Some(1000.0));
    assert_eq!(source.time_to_coordinate(4001), None);
    assert_eq!(source.time_to_coordinate(-1), None);

    assert_eq!(source.coordinate_to_time(250.0), Some(1000));
    assert_eq!(source.coordinate_to_time(0.3), Some(1));
    assert_eq!(source.coordinate_to_time(1000.1), None);
}

#[test]
fn ranges_and_viewport_can_change_through_a_shared_handle() {
    let source = trend_source();
    let shared: Rc<dyn CoordinateSource> = source.clone();

    source
        .set_viewport(Viewport::new(2000, 1000))
        .expect("valid viewport");
    assert_eq!(shared.time_to_coordinate(1000), Some(500.0));
    assert_eq!(shared.price_to_coordinate(100.0), Some(600.0));

    source.set_price_range(50.0, 150.0).expect("valid range");
    assert_eq!(source.price_range(), (50.0, 150.0));
    assert_eq!(shared.price_to_coordinate(100.0), Some(500.0));
    assert_eq!(shared.price_to_coordinate(200.0), None);

    source
        .set_visible_time_range(1000.0, 3000.0)
        .expect("valid range");
    assert_eq!(source.visible_time_range(), (1000.0, 3000.0));
    assert_eq!(shared.time_to_coordinate(2000), Some(1000.0));
}

#[test]
fn invalid_configuration_is_rejected() {
    let err = LinearCoordinateSource::new(Viewport::new(0, 500), (0.0, 1.0), (0.0, 1.0))
        .expect_err("zero width");
    assert!(matches!(
        err,
        ChartError::InvalidViewport {
            width: 0,
            height: 500
        }
    ));

    assert!(
        LinearCoordinateSource::new(Viewport::new(10, 10), (5.0, 1.0), (0.0, 1.0)).is_err()
    );
    assert!(
        LinearCoordinateSource::new(Viewport::new(10, 10), (0.0, 1.0), (2.0, 2.0)).is_err()
    );

    let source = trend_source();
    assert!(source.set_viewport(Viewport::new(100, 0)).is_err());
    assert_eq!(source.viewport(), Viewport::new(1000, 500));
    assert!(source.set_price_range(10.0, 5.0).is_err());
    assert_eq!(source.price_range(), (0.0, 250.0));
}

/// Host adapter with a fixed price mapping and no time axis.
struct FixedPriceSource;

impl CoordinateSource for FixedPriceSource {
    fn price_to_coordinate(&self, price: f64) -> Option<f64> {
        (price == 50_000.0).then_some(120.0)
    }

    fn coordinate_to_price(&self, _coordinate: f64) -> Option<f64> {
        None
    }

    fn time_to_coordinate(&self, _time: i64) -> Option<f64> {
        None
    }

    fn coordinate_to_time(&self, _coordinate: f64) -> Option<i64> {
        None
    }
}

#[test]
fn any_coordinate_source_can_back_a_primitive() {
    let mut primitive = HorizontalLinePrimitive::new();
    let repaint = RepaintRequest::new();
    primitive.attached(AttachedParams::new(
        Rc::new(FixedPriceSource),
        repaint.callback(),
    ));
    primitive.add_line(HorizontalLine::new("h1", 50_000.0, green()));
    primitive.add_line(HorizontalLine::new("h2", 10.0, green()));

    primitive.update_all_views();
    let records = primitive.render_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "h1");
    assert_eq!(records[0].y, 120.0);
    assert_eq!(primitive.coordinate_to_price(120.0), None);
    assert!(repaint.take());
}
