use crate::core::DomainRange;
use crate::error::{ChartError, ChartResult};

/// Linear mapping between a data domain and a pixel span `[0, width_px]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: DomainRange,
    width_px: f64,
}

impl LinearScale {
    pub fn new(domain: DomainRange, width_px: f64) -> ChartResult<Self> {
        if !domain.min.is_finite() || !domain.max.is_finite() || domain.span() == 0.0 {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "scale pixel width must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self { domain, width_px })
    }

    #[must_use]
    pub fn domain(self) -> DomainRange {
        self.domain
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain.min) / (self.domain.max - self.domain.min);
        Ok(normalized * self.width_px)
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = pixel / self.width_px;
        Ok(self.domain.min + normalized * (self.domain.max - self.domain.min))
    }

    /// Domain distance covered by `delta_px` pixels.
    #[must_use]
    pub fn pixels_to_domain_delta(self, delta_px: f64) -> f64 {
        delta_px / self.width_px * (self.domain.max - self.domain.min)
    }
}
