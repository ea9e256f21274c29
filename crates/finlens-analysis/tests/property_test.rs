//! Property tests over randomly generated datasets.

use finlens_analysis::aggregation::{aggregate, top_n, GroupBy, Reducer};
use finlens_analysis::anomaly::AnomalyDetector;
use finlens_analysis::correlation::correlate;
use finlens_analysis::forecast::{estimate_growth, ForecastParams, TrendForecaster};
use finlens_core::types::{Dataset, MetricName, Month, Record};
use proptest::prelude::*;

const METRICS: [MetricName; 3] =
    [MetricName::Revenue, MetricName::NetProfit, MetricName::MarketShare];
const MEAN_MAX: [Reducer; 2] = [Reducer::Mean, Reducer::Max];

fn arb_record() -> impl Strategy<Value = Record> {
    (
        2015i32..2025,
        0usize..12,
        0u8..6,
        1.0f64..1e6,
        -1e5f64..1e5,
        0.0f64..100.0,
    )
        .prop_map(|(year, month, dept, revenue, profit, share)| {
            Record::new(year, Month::ALL[month], format!("D{dept}"))
                .with_metric(MetricName::Revenue, revenue)
                .with_metric(MetricName::NetProfit, profit)
                .with_metric(MetricName::MarketShare, share)
        })
}

fn arb_dataset(min: usize) -> impl Strategy<Value = Dataset> {
    prop::collection::vec(arb_record(), min..60).prop_map(|records| Dataset::new(records).unwrap())
}

proptest! {
    #[test]
    fn group_counts_partition_the_dataset(ds in arb_dataset(1)) {
        for group_by in [GroupBy::Year, GroupBy::Month, GroupBy::Department] {
            let result = aggregate(&ds, group_by, &METRICS, &MEAN_MAX).unwrap();
            let total: usize = result.groups.iter().map(|g| g.count).sum();
            prop_assert_eq!(total, ds.len());
            prop_assert!(result.groups.windows(2).all(|w| w[0].key < w[1].key));
        }
    }

    #[test]
    fn group_mean_never_exceeds_group_max(ds in arb_dataset(1)) {
        let result = aggregate(&ds, GroupBy::Department, &METRICS, &MEAN_MAX).unwrap();
        for group in &result.groups {
            for values in group.metrics.values() {
                let (mean, max) = (values.mean.unwrap(), values.max.unwrap());
                prop_assert!(mean <= max + 1e-9 * max.abs().max(1.0));
            }
        }
    }

    #[test]
    fn top_n_is_bounded_and_descending(ds in arb_dataset(1), n in 1usize..10) {
        let ranked = top_n(&ds, GroupBy::Department, MetricName::Revenue, n).unwrap();
        prop_assert!(ranked.len() <= n);
        prop_assert_eq!(ranked.len(), n.min(ds.departments().len()));
        prop_assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal(ds in arb_dataset(2)) {
        let matrix = correlate(&ds, &METRICS).unwrap();
        for i in 0..matrix.size() {
            prop_assert_eq!(matrix.values[i][i], 1.0);
            for j in 0..matrix.size() {
                let (a, b) = (matrix.values[i][j], matrix.values[j][i]);
                prop_assert!(a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan()));
                prop_assert!(a.is_nan() || (-1.0..=1.0).contains(&a));
            }
        }
    }

    #[test]
    fn anomalies_exceed_threshold(ds in arb_dataset(1), threshold in 0.5f64..4.0) {
        let set = AnomalyDetector::new(threshold).unwrap().detect(&ds, &METRICS).unwrap();
        for (metric, anomalies) in &set.by_metric {
            for a in anomalies {
                prop_assert!(a.z_score.abs() > threshold);
                prop_assert_eq!(ds.records()[a.index].metric(*metric), Some(a.value));
            }
        }
    }

    #[test]
    fn forecast_is_deterministic_and_contiguous(ds in arb_dataset(2), years_ahead in 1u32..6) {
        prop_assume!(ds.years().len() >= 2);
        let forecaster = TrendForecaster::new(ForecastParams::new(years_ahead)).unwrap();
        let first = forecaster.forecast(&ds, MetricName::Revenue).unwrap();
        let second = forecaster.forecast(&ds, MetricName::Revenue).unwrap();
        prop_assert_eq!(&first, &second);

        let last_year = *ds.years().last().unwrap();
        let expected: Vec<i32> = (1..=years_ahead as i32).map(|k| last_year + k).collect();
        prop_assert_eq!(first.years(), expected);
    }

    #[test]
    fn applied_growth_is_within_bounds_or_fallback(
        means in prop::collection::vec(1.0f64..1e4, 2..8),
        fallback in -0.1f64..0.3,
    ) {
        let estimate = estimate_growth(&means, fallback, (0.0, 0.15));
        if estimate.fell_back {
            prop_assert_eq!(estimate.applied, fallback);
        } else {
            prop_assert!((0.0..=0.15).contains(&estimate.applied));
            prop_assert_eq!(estimate.applied, estimate.candidate);
        }
    }
}
