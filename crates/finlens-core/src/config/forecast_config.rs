//! Trend forecaster configuration.

use serde::{Deserialize, Serialize};

/// Growth-rate extrapolation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of future years to forecast. Default: 3.
    pub years_ahead: Option<u32>,
    /// Growth substituted when the historical rate is out of bounds. Default: 0.05.
    pub fallback_growth: Option<f64>,
    /// Lowest accepted historical growth rate. Default: 0.0.
    pub growth_min: Option<f64>,
    /// Highest accepted historical growth rate. Default: 0.15.
    pub growth_max: Option<f64>,
}

impl ForecastConfig {
    pub const DEFAULT_YEARS_AHEAD: u32 = 3;
    pub const DEFAULT_FALLBACK_GROWTH: f64 = 0.05;
    pub const DEFAULT_GROWTH_BOUNDS: (f64, f64) = (0.0, 0.15);

    pub fn effective_years_ahead(&self) -> u32 {
        self.years_ahead.unwrap_or(Self::DEFAULT_YEARS_AHEAD)
    }

    pub fn effective_fallback_growth(&self) -> f64 {
        self.fallback_growth.unwrap_or(Self::DEFAULT_FALLBACK_GROWTH)
    }

    /// `(min, max)` accepted growth.
    pub fn effective_growth_bounds(&self) -> (f64, f64) {
        (
            self.growth_min.unwrap_or(Self::DEFAULT_GROWTH_BOUNDS.0),
            self.growth_max.unwrap_or(Self::DEFAULT_GROWTH_BOUNDS.1),
        )
    }
}
