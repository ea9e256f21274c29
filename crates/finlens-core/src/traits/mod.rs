//! Plug-in traits implemented outside the core pipeline.

pub mod forecast_model;

pub use forecast_model::{ForecastModel, GrowthModel};
