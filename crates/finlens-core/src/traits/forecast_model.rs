//! ForecastModel trait: the external predictive-model plug-in point.
//!
//! The built-in trend forecaster extrapolates a guard-railed growth rate.
//! Callers holding a trained model (a regression, a persisted artifact)
//! implement this trait instead; when supplied, the built-in extrapolation
//! is bypassed for that call.

/// A predictive function from future years to values.
pub trait ForecastModel: Send + Sync {
    /// Name used in logs and in the forecast result.
    fn name(&self) -> &str;

    /// Predict one value per requested year, in the same order.
    fn predict(&self, years: &[i32]) -> Result<Vec<f64>, String>;
}

/// Fixed compound-growth model anchored at a base year and value.
///
/// Mostly useful as a reference implementation and in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthModel {
    pub base_year: i32,
    pub base_value: f64,
    pub rate: f64,
}

impl GrowthModel {
    pub fn new(base_year: i32, base_value: f64, rate: f64) -> Self {
        Self {
            base_year,
            base_value,
            rate,
        }
    }
}

impl ForecastModel for GrowthModel {
    fn name(&self) -> &str {
        "compound-growth"
    }

    fn predict(&self, years: &[i32]) -> Result<Vec<f64>, String> {
        years
            .iter()
            .map(|&y| {
                let steps = y - self.base_year;
                if steps < 0 {
                    return Err(format!("year {y} precedes base year {}", self.base_year));
                }
                Ok(self.base_value * (1.0 + self.rate).powi(steps))
            })
            .collect()
    }
}
