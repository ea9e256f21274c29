//! Trend forecasting.
//!
//! Derives a historical average growth rate per metric from yearly means
//! and extrapolates it forward, substituting a conservative fallback when
//! the historical rate falls outside accepted bounds. An external
//! [`ForecastModel`](finlens_core::traits::ForecastModel) can replace the
//! extrapolation for a call.

pub mod forecaster;
pub mod growth;

pub use forecaster::{
    forecast, ForecastMethod, ForecastParams, ForecastPoint, ForecastSeries, TrendForecaster,
};
pub use growth::{estimate_growth, extrapolate, horizon, yearly_means, GrowthEstimate};
