//! The trend forecaster: validated parameters, built-in extrapolation and
//! the external-model bypass.

use finlens_core::config::ForecastConfig;
use finlens_core::errors::{AnalysisError, AnalysisResult};
use finlens_core::traits::ForecastModel;
use finlens_core::types::{Dataset, MetricName};
use serde::Serialize;
use tracing::{info, warn};

use super::growth::{self, GrowthEstimate};

/// Forecaster parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastParams {
    pub years_ahead: u32,
    pub fallback_growth: f64,
    /// Inclusive `(min, max)` accepted historical growth.
    pub growth_bounds: (f64, f64),
}

impl ForecastParams {
    /// Parameters for `years_ahead` years with the default 5% fallback and
    /// `[0, 0.15]` bounds.
    pub fn new(years_ahead: u32) -> Self {
        Self {
            years_ahead,
            fallback_growth: ForecastConfig::DEFAULT_FALLBACK_GROWTH,
            growth_bounds: ForecastConfig::DEFAULT_GROWTH_BOUNDS,
        }
    }

    pub fn with_fallback_growth(mut self, fallback_growth: f64) -> Self {
        self.fallback_growth = fallback_growth;
        self
    }

    pub fn with_growth_bounds(mut self, min: f64, max: f64) -> Self {
        self.growth_bounds = (min, max);
        self
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        if self.years_ahead < 1 {
            return Err(AnalysisError::invalid_parameter("years_ahead", "must be at least 1"));
        }
        if i32::try_from(self.years_ahead).is_err() {
            return Err(AnalysisError::invalid_parameter(
                "years_ahead",
                format!("must be at most {}, got {}", i32::MAX, self.years_ahead),
            ));
        }
        if !self.fallback_growth.is_finite() {
            return Err(AnalysisError::invalid_parameter(
                "fallback_growth",
                format!("must be finite, got {}", self.fallback_growth),
            ));
        }
        let (min, max) = self.growth_bounds;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(AnalysisError::invalid_parameter(
                "growth_bounds",
                format!("expected finite min <= max, got ({min}, {max})"),
            ));
        }
        Ok(())
    }
}

impl From<&ForecastConfig> for ForecastParams {
    fn from(config: &ForecastConfig) -> Self {
        let (min, max) = config.effective_growth_bounds();
        Self::new(config.effective_years_ahead())
            .with_fallback_growth(config.effective_fallback_growth())
            .with_growth_bounds(min, max)
    }
}

/// A forecast value for one future year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub year: i32,
    pub value: f64,
}

/// How the forecast values were produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForecastMethod {
    Extrapolation { growth: GrowthEstimate },
    Model { name: String },
}

/// Forecast for one metric: the yearly history it was derived from and the
/// future points, strictly increasing in year from the last observed year + 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSeries {
    pub metric: MetricName,
    pub history: Vec<ForecastPoint>,
    pub points: Vec<ForecastPoint>,
    pub method: ForecastMethod,
}

impl ForecastSeries {
    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.year).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Growth estimate, for extrapolated forecasts.
    pub fn growth(&self) -> Option<&GrowthEstimate> {
        match &self.method {
            ForecastMethod::Extrapolation { growth } => Some(growth),
            ForecastMethod::Model { .. } => None,
        }
    }
}

/// Guard-railed growth extrapolation over yearly means.
///
/// Stateless: every call recomputes from the full history, so identical
/// inputs always give identical output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendForecaster {
    params: ForecastParams,
}

impl TrendForecaster {
    pub fn new(params: ForecastParams) -> AnalysisResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ForecastParams {
        &self.params
    }

    /// Forecast `target` by extrapolating its average yearly growth.
    ///
    /// Needs at least two distinct years.
    pub fn forecast(
        &self,
        dataset: &Dataset,
        target: MetricName,
    ) -> AnalysisResult<ForecastSeries> {
        let history = growth::yearly_means(dataset, target)?;
        if history.len() < 2 {
            return Err(AnalysisError::InsufficientData {
                operation: "growth forecast",
                required: 2,
                actual: history.len(),
            });
        }

        let means: Vec<f64> = history.iter().map(|&(_, v)| v).collect();
        let estimate = growth::estimate_growth(
            &means,
            self.params.fallback_growth,
            self.params.growth_bounds,
        );
        if estimate.fell_back {
            warn!(
                metric = %target,
                candidate = estimate.candidate,
                fallback = estimate.applied,
                "historical growth outside bounds, using fallback"
            );
        }

        let (last_year, last_value) = history[history.len() - 1];
        let points = growth::extrapolate(
            last_year,
            last_value,
            estimate.applied,
            self.params.years_ahead,
        )?
        .into_iter()
        .map(|(year, value)| ForecastPoint { year, value })
        .collect();

        info!(
            metric = %target,
            applied_growth = estimate.applied,
            years_ahead = self.params.years_ahead,
            "extrapolated forecast"
        );

        Ok(ForecastSeries {
            metric: target,
            history: to_points(&history),
            points,
            method: ForecastMethod::Extrapolation { growth: estimate },
        })
    }

    /// Forecast `target` with an external model instead of extrapolation.
    ///
    /// Needs at least one observed year to anchor the forecast horizon. The
    /// model must return one finite value per requested year.
    pub fn forecast_with_model(
        &self,
        dataset: &Dataset,
        target: MetricName,
        model: &dyn ForecastModel,
    ) -> AnalysisResult<ForecastSeries> {
        let history = growth::yearly_means(dataset, target)?;
        let Some(&(last_year, _)) = history.last() else {
            return Err(AnalysisError::InsufficientData {
                operation: "model forecast",
                required: 1,
                actual: 0,
            });
        };

        let years = growth::horizon(last_year, self.params.years_ahead)?;
        let model_error = |message: String| AnalysisError::ForecastModel {
            model: model.name().to_string(),
            message,
        };

        let values = model.predict(&years).map_err(model_error)?;
        if values.len() != years.len() {
            return Err(model_error(format!(
                "returned {} values for {} years",
                values.len(),
                years.len()
            )));
        }
        if let Some((year, value)) = years.iter().zip(&values).find(|(_, v)| !v.is_finite()) {
            return Err(model_error(format!("non-finite prediction {value} for {year}")));
        }

        info!(metric = %target, model = model.name(), years_ahead = years.len(), "model forecast");

        Ok(ForecastSeries {
            metric: target,
            history: to_points(&history),
            points: years
                .into_iter()
                .zip(values)
                .map(|(year, value)| ForecastPoint { year, value })
                .collect(),
            method: ForecastMethod::Model {
                name: model.name().to_string(),
            },
        })
    }
}

/// Forecast `target` `years_ahead` years out with explicit guard-rail
/// parameters.
pub fn forecast(
    dataset: &Dataset,
    target: MetricName,
    years_ahead: u32,
    fallback_growth: f64,
    growth_bounds: (f64, f64),
) -> AnalysisResult<ForecastSeries> {
    let params = ForecastParams::new(years_ahead)
        .with_fallback_growth(fallback_growth)
        .with_growth_bounds(growth_bounds.0, growth_bounds.1);
    TrendForecaster::new(params)?.forecast(dataset, target)
}

fn to_points(pairs: &[(i32, f64)]) -> Vec<ForecastPoint> {
    pairs
        .iter()
        .map(|&(year, value)| ForecastPoint { year, value })
        .collect()
}
