use std::cell::Cell;
use std::rc::Rc;

use crate::core::{LinearScale, Viewport};
use crate::error::{ChartError, ChartResult};

/// Price/time to pixel transforms supplied by the host chart.
///
/// Every method returns `None` when the value cannot be represented in the
/// currently visible viewport. Consumers treat `None` as "omit": nothing is
/// drawn and no query result is produced.
pub trait CoordinateSource {
    fn price_to_coordinate(&self, price: f64) -> Option<f64>;
    fn coordinate_to_price(&self, coordinate: f64) -> Option<f64>;
    fn time_to_coordinate(&self, time: i64) -> Option<f64>;
    fn coordinate_to_time(&self, coordinate: f64) -> Option<i64>;
}

impl<T: CoordinateSource + ?Sized> CoordinateSource for Rc<T> {
    fn price_to_coordinate(&self, price: f64) -> Option<f64> {
        (**self).price_to_coordinate(price)
    }

    fn coordinate_to_price(&self, coordinate: f64) -> Option<f64> {
        (**self).coordinate_to_price(coordinate)
    }

    fn time_to_coordinate(&self, time: i64) -> Option<f64> {
        (**self).time_to_coordinate(time)
    }

    fn coordinate_to_time(&self, coordinate: f64) -> Option<i64> {
        (**self).coordinate_to_time(coordinate)
    }
}

/// Coordinate source over a visible time range and a price range.
///
/// Time grows left to right across `viewport.width`; price grows bottom to
/// top across `viewport.height`. Values outside the visible ranges map to
/// `None`. Ranges can be changed through a shared reference so a host can
/// pan or zoom while primitives hold the source.
#[derive(Debug, Clone)]
pub struct LinearCoordinateSource {
    viewport: Cell<Viewport>,
    time_scale: Cell<LinearScale>,
    price_scale: Cell<LinearScale>,
}

impl LinearCoordinateSource {
    pub fn new(
        viewport: Viewport,
        time_range: (f64, f64),
        price_range: (f64, f64),
    ) -> ChartResult<Self> {
        validate_viewport(viewport)?;
        Ok(Self {
            viewport: Cell::new(viewport),
            time_scale: Cell::new(time_scale(time_range)?),
            price_scale: Cell::new(price_scale(price_range)?),
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    /// Returns the visible `(start, end)` time range in seconds.
    #[must_use]
    pub fn visible_time_range(&self) -> (f64, f64) {
        self.time_scale.get().domain()
    }

    /// Returns the visible `(min, max)` price range.
    #[must_use]
    pub fn price_range(&self) -> (f64, f64) {
        let (max, min) = self.price_scale.get().domain();
        (min, max)
    }

    pub fn set_viewport(&self, viewport: Viewport) -> ChartResult<()> {
        validate_viewport(viewport)?;
        self.viewport.set(viewport);
        Ok(())
    }

    pub fn set_visible_time_range(&self, start: f64, end: f64) -> ChartResult<()> {
        self.time_scale.set(time_scale((start, end))?);
        Ok(())
    }

    pub fn set_price_range(&self, min: f64, max: f64) -> ChartResult<()> {
        self.price_scale.set(price_scale((min, max))?);
        Ok(())
    }

    fn width(&self) -> f64 {
        f64::from(self.viewport.get().width)
    }

    fn height(&self) -> f64 {
        f64::from(self.viewport.get().height)
    }
}

impl CoordinateSource for LinearCoordinateSource {
    fn price_to_coordinate(&self, price: f64) -> Option<f64> {
        if !price.is_finite() {
            return None;
        }
        let y = self.price_scale.get().domain_to_pixel(price, self.height());
        within_extent(y, self.height())
    }

    fn coordinate_to_price(&self, coordinate: f64) -> Option<f64> {
        let y = within_extent(coordinate, self.height())?;
        Some(self.price_scale.get().pixel_to_domain(y, self.height()))
    }

    fn time_to_coordinate(&self, time: i64) -> Option<f64> {
        let x = self
            .time_scale
            .get()
            .domain_to_pixel(time as f64, self.width());
        within_extent(x, self.width())
    }

    fn coordinate_to_time(&self, coordinate: f64) -> Option<i64> {
        let x = within_extent(coordinate, self.width())?;
        let time = self.time_scale.get().pixel_to_domain(x, self.width()).round();
        Some(time as i64)
    }
}

fn within_extent(pixel: f64, extent_px: f64) -> Option<f64> {
    (pixel.is_finite() && (0.0..=extent_px).contains(&pixel)).then_some(pixel)
}

fn validate_viewport(viewport: Viewport) -> ChartResult<()> {
    if viewport.is_valid() {
        Ok(())
    } else {
        Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}

fn time_scale((start, end): (f64, f64)) -> ChartResult<LinearScale> {
    if start > end {
        return Err(ChartError::InvalidData(
            "visible time range start must not exceed end".to_owned(),
        ));
    }
    LinearScale::new(start, end)
}

fn price_scale((min, max): (f64, f64)) -> ChartResult<LinearScale> {
    if min > max {
        return Err(ChartError::InvalidData(
            "price range min must not exceed max".to_owned(),
        ));
    }
    LinearScale::new(max, min)
}
