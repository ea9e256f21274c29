//! Configuration system for finlens.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod finlens_config;
pub mod forecast_config;
pub mod loader_config;

pub use analysis_config::{AnalysisConfig, AnomalyScope};
pub use finlens_config::{CliOverrides, FinlensConfig};
pub use forecast_config::ForecastConfig;
pub use loader_config::LoaderConfig;
