//! Top-level finlens configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, AnomalyScope, ForecastConfig, LoaderConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "finlens.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`FINLENS_*`)
/// 3. Project config (`finlens.toml` in project root)
/// 4. User config (`~/.finlens/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FinlensConfig {
    pub analysis: AnalysisConfig,
    pub forecast: ForecastConfig,
    pub loader: LoaderConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub anomaly_threshold: Option<f64>,
    pub anomaly_scope: Option<AnomalyScope>,
    pub top_n: Option<usize>,
    pub years_ahead: Option<u32>,
}

impl FinlensConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. A broken user file is fatal only when
        // it fails to parse; anything else falls back to defaults.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &FinlensConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.analysis.anomaly_threshold {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(invalid("analysis.anomaly_threshold", "must be a positive number"));
            }
        }
        if config.analysis.top_n == Some(0) {
            return Err(invalid("analysis.top_n", "must be greater than 0"));
        }
        match config.forecast.years_ahead {
            Some(0) => return Err(invalid("forecast.years_ahead", "must be at least 1")),
            Some(n) if i32::try_from(n).is_err() => {
                return Err(invalid("forecast.years_ahead", "must fit in the i32 year range"));
            }
            _ => {}
        }
        if let Some(fallback) = config.forecast.fallback_growth {
            if !fallback.is_finite() {
                return Err(invalid("forecast.fallback_growth", "must be a finite number"));
            }
        }
        let (min, max) = config.forecast.effective_growth_bounds();
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(invalid(
                "forecast.growth_min",
                "growth bounds must be finite with growth_min <= growth_max",
            ));
        }
        if config.loader.cache_capacity == Some(0) {
            return Err(invalid("loader.cache_capacity", "must be greater than 0"));
        }
        Ok(())
    }

    /// Returns the user config path: `~/.finlens/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".finlens").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut FinlensConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: FinlensConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut FinlensConfig, other: &FinlensConfig) {
        // Analysis
        let (a, o) = (&mut base.analysis, &other.analysis);
        if o.anomaly_threshold.is_some() {
            a.anomaly_threshold = o.anomaly_threshold;
        }
        if o.anomaly_scope.is_some() {
            a.anomaly_scope = o.anomaly_scope;
        }
        if o.top_n.is_some() {
            a.top_n = o.top_n;
        }
        if o.top_metric.is_some() {
            a.top_metric = o.top_metric;
        }
        for (dst, src) in [
            (&mut a.trend_metrics, &o.trend_metrics),
            (&mut a.seasonality_metrics, &o.seasonality_metrics),
            (&mut a.department_metrics, &o.department_metrics),
            (&mut a.correlation_metrics, &o.correlation_metrics),
            (&mut a.anomaly_metrics, &o.anomaly_metrics),
        ] {
            if !src.is_empty() {
                dst.clone_from(src);
            }
        }

        // Forecast
        let (f, o) = (&mut base.forecast, &other.forecast);
        if o.years_ahead.is_some() {
            f.years_ahead = o.years_ahead;
        }
        if o.fallback_growth.is_some() {
            f.fallback_growth = o.fallback_growth;
        }
        if o.growth_min.is_some() {
            f.growth_min = o.growth_min;
        }
        if o.growth_max.is_some() {
            f.growth_max = o.growth_max;
        }

        // Loader
        let (l, o) = (&mut base.loader, &other.loader);
        if o.cache_capacity.is_some() {
            l.cache_capacity = o.cache_capacity;
        }
        if o.allow_unknown_columns.is_some() {
            l.allow_unknown_columns = o.allow_unknown_columns;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `FINLENS_ANOMALY_THRESHOLD`, `FINLENS_FORECAST_YEARS_AHEAD`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut FinlensConfig) {
        if let Some(v) = env_parse::<f64>("FINLENS_ANOMALY_THRESHOLD") {
            config.analysis.anomaly_threshold = Some(v);
        }
        if let Ok(val) = std::env::var("FINLENS_ANOMALY_SCOPE") {
            if let Some(scope) = AnomalyScope::parse(&val) {
                config.analysis.anomaly_scope = Some(scope);
            }
        }
        if let Some(v) = env_parse::<usize>("FINLENS_TOP_N") {
            config.analysis.top_n = Some(v);
        }
        if let Some(v) = env_parse::<u32>("FINLENS_FORECAST_YEARS_AHEAD") {
            config.forecast.years_ahead = Some(v);
        }
        if let Some(v) = env_parse::<f64>("FINLENS_FORECAST_FALLBACK_GROWTH") {
            config.forecast.fallback_growth = Some(v);
        }
        if let Some(v) = env_parse::<u64>("FINLENS_LOADER_CACHE_CAPACITY") {
            config.loader.cache_capacity = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut FinlensConfig, cli: &CliOverrides) {
        if let Some(v) = cli.anomaly_threshold {
            config.analysis.anomaly_threshold = Some(v);
        }
        if let Some(v) = cli.anomaly_scope {
            config.analysis.anomaly_scope = Some(v);
        }
        if let Some(v) = cli.top_n {
            config.analysis.top_n = Some(v);
        }
        if let Some(v) = cli.years_ahead {
            config.forecast.years_ahead = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
