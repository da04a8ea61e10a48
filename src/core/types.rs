use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a time-series sample: x is unix seconds (millisecond precision).
    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        let y = value.to_f64().ok_or_else(|| {
            ChartError::InvalidData(format!("sample value {value} cannot be represented as f64"))
        })?;
        Ok(Self {
            x: time.timestamp_millis() as f64 / 1000.0,
            y,
        })
    }
}

/// Closed interval on one data axis.
///
/// Used for both the full data domain of a series and the window currently
/// shown by a chart. Reversed bounds are accepted; `span` is always absolute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainRange {
    pub min: f64,
    pub max: f64,
}

impl DomainRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Validating constructor for ranges coming from user input.
    pub fn checked(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "domain range bounds must be finite".to_owned(),
            ));
        }
        Ok(Self::new(min.min(max), min.max(max)))
    }

    #[must_use]
    pub fn span(self) -> f64 {
        (self.max - self.min).abs()
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (lo, hi) = self.ordered();
        value >= lo && value <= hi
    }

    #[must_use]
    pub fn ordered(self) -> (f64, f64) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }

    /// Fraction of `full` covered by `self`, in `[0, 1]`.
    ///
    /// A zero-width or non-finite `full` range yields `1.0`.
    #[must_use]
    pub fn ratio_of(self, full: DomainRange) -> f64 {
        let full_span = full.span();
        if !full_span.is_finite() || full_span == 0.0 {
            return 1.0;
        }
        let ratio = self.span() / full_span;
        if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

impl From<(f64, f64)> for DomainRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}
