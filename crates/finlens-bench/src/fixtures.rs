//! Synthetic company datasets for benchmarks and tests.
//! Deterministic: same seed → same dataset across runs.

use std::io::Write;

use finlens_core::errors::AnalysisResult;
use finlens_core::types::{Dataset, MetricName, Month, Record};

/// First year of every generated history.
pub const BASE_YEAR: i32 = 2018;

/// Share of records that get their revenue and profit inflated.
const OUTLIER_RATE: f64 = 0.05;

/// Shape of a generated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureSpec {
    pub years: u32,
    pub departments: u32,
}

impl FixtureSpec {
    /// 2 years × 3 departments: unit test scale.
    pub const MICRO: Self = Self { years: 2, departments: 3 };
    /// 3 years × 10 departments.
    pub const SMALL: Self = Self { years: 3, departments: 10 };
    /// 5 years × 50 departments.
    pub const MEDIUM: Self = Self { years: 5, departments: 50 };
    /// 10 years × 125 departments, the size of the reference company file.
    pub const FULL: Self = Self { years: 10, departments: 125 };

    pub fn record_count(&self) -> usize {
        self.years as usize * 12 * self.departments as usize
    }
}

/// Seasonal revenue multiplier, peaking in June and December.
pub fn seasonal_factor(month: Month) -> f64 {
    match month {
        Month::January => 0.8,
        Month::February => 0.85,
        Month::March => 0.9,
        Month::April => 0.95,
        Month::May => 1.0,
        Month::June => 1.2,
        Month::July => 1.1,
        Month::August => 1.0,
        Month::September => 0.95,
        Month::October => 0.9,
        Month::November => 0.95,
        Month::December => 1.3,
    }
}

pub fn department_name(index: u32) -> String {
    format!("Dept_{index:03}")
}

/// Generate a dataset with yearly growth, seasonality, derived ratios and
/// injected revenue/profit outliers.
pub fn generate_dataset(spec: FixtureSpec, seed: u64) -> AnalysisResult<Dataset> {
    let mut rng = SimpleRng::new(seed);
    let mut records = Vec::with_capacity(spec.record_count());

    for offset in 0..spec.years as i32 {
        let year = BASE_YEAR + offset;
        let year_factor = 1.0 + offset as f64 * 0.05;
        for month in Month::ALL {
            for dept in 1..=spec.departments {
                records.push(generate_record(&mut rng, year, month, year_factor, offset, dept));
            }
        }
    }

    // One multiplier per metric for every outlier row.
    let revenue_boost = rng.uniform(1.5, 3.0);
    let profit_boost = rng.uniform(1.5, 3.0);
    let records = records
        .into_iter()
        .map(|record| {
            if rng.next_f64() >= OUTLIER_RATE {
                return record;
            }
            let revenue = record.metric(MetricName::Revenue).unwrap_or_default();
            let profit = record.metric(MetricName::NetProfit).unwrap_or_default();
            record
                .with_metric(MetricName::Revenue, revenue * revenue_boost)
                .with_metric(MetricName::NetProfit, profit * profit_boost)
        })
        .collect();

    Dataset::new(records)
}

fn generate_record(
    rng: &mut SimpleRng,
    year: i32,
    month: Month,
    year_factor: f64,
    offset: i32,
    dept: u32,
) -> Record {
    let base_revenue = rng.uniform(1_000_000.0, 2_000_000.0);
    let revenue = round2(base_revenue * year_factor * seasonal_factor(month));
    let assets_raw = rng.uniform(200_000.0, 500_000.0) * year_factor;
    let expenses_ratio = rng.uniform(0.6, 0.8);
    let profit = round2(revenue * (1.0 - expenses_ratio) * 0.8);
    let assets = round2(assets_raw);
    let liabilities_ratio = rng.uniform(0.4, 0.6);
    let liabilities = round2(assets_raw * liabilities_ratio);
    let current_assets = assets_raw * rng.uniform(0.4, 0.6);
    let current_liabilities = assets_raw * liabilities_ratio * rng.uniform(0.3, 0.5);
    let market_share = rng.uniform(10.0, 20.0) * (1.0 + offset as f64 * 0.01);
    let employees = (200 + rng.below(300)) as f64 * (1.0 + offset as f64 * 0.02);

    Record::new(year, month, department_name(dept))
        .with_metric(MetricName::Revenue, revenue)
        .with_metric(MetricName::NetProfit, profit)
        .with_metric(MetricName::OperatingExpenses, round2(revenue * expenses_ratio))
        .with_metric(MetricName::Assets, assets)
        .with_metric(MetricName::Liabilities, liabilities)
        .with_metric(MetricName::CurrentRatio, round2(current_assets / current_liabilities))
        .with_metric(MetricName::MarketShare, round2(market_share))
        .with_metric(MetricName::Employees, employees.trunc())
        .with_metric(MetricName::SalesMargin, round2(profit / revenue * 100.0))
        .with_metric(MetricName::AssetTurnover, round2(revenue / assets))
        .with_metric(MetricName::ReturnOnAssets, round2(profit / assets * 100.0))
        .with_metric(MetricName::Leverage, round2(liabilities / assets * 100.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Write `dataset` as CSV with source-language headers, the layout the
/// loader sees from real exports. Absent metrics become empty cells.
pub fn write_csv<W: Write>(dataset: &Dataset, out: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["Год", "Месяц", "Подразделение"];
    header.extend(MetricName::ALL.iter().map(MetricName::source_label));
    writer.write_record(&header)?;

    for record in dataset.records() {
        let mut row = vec![
            record.year.to_string(),
            record.month.source_name().to_string(),
            record.department.clone(),
        ];
        row.extend(
            MetricName::ALL
                .iter()
                .map(|&m| record.metric(m).map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Xorshift64 PRNG. Not cryptographic; only here for reproducible fixtures.
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[low, high)`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Uniform integer in `[0, bound)`.
    pub fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}
