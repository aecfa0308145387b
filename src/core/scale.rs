use crate::error::{ChartError, ChartResult};

/// Linear mapping between a domain interval and a pixel extent starting at 0.
///
/// `domain_start` maps to pixel 0 and `domain_end` maps to `extent_px`, so an
/// inverted axis (price grows upwards) is expressed by passing the interval
/// in descending order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn domain_to_pixel(self, value: f64, extent_px: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        (value - self.domain_start) * extent_px / span
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64, extent_px: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        self.domain_start + pixel * span / extent_px
    }
}
