//! Partition-and-reduce over a dataset.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use finlens_core::errors::{AnalysisError, AnalysisResult};
use finlens_core::types::{Dataset, MetricName, Record};
use rustc_hash::FxHashMap;
use tracing::debug;

use super::types::{AggregationResult, GroupBy, GroupKey, GroupStats, ReducedValues, Reducer};
use crate::stats;

/// Partition `dataset` by `group_by` and apply each reducer to each metric.
///
/// Every record lands in exactly one group. Groups come back in natural key
/// order. An empty dataset yields an empty result. A record lacking one of
/// the requested metrics is `InvalidSchema`. `Reducer::Std` is the sample
/// deviation and is NaN for single-record groups.
pub fn aggregate(
    dataset: &Dataset,
    group_by: GroupBy,
    metrics: &[MetricName],
    reducers: &[Reducer],
) -> AnalysisResult<AggregationResult> {
    let metrics: BTreeSet<MetricName> = metrics.iter().copied().collect();
    let reducers: BTreeSet<Reducer> = reducers.iter().copied().collect();

    let groups = partition(dataset, group_by)
        .into_iter()
        .map(|(key, records)| {
            let mut reduced = BTreeMap::new();
            for &metric in &metrics {
                let values = metric_values(&records, metric)?;
                reduced.insert(metric, reduce(&values, &reducers));
            }
            Ok(GroupStats {
                key,
                count: records.len(),
                metrics: reduced,
            })
        })
        .collect::<AnalysisResult<Vec<_>>>()?;

    debug!(
        group_by = ?group_by,
        group_count = groups.len(),
        record_count = dataset.len(),
        "aggregated dataset"
    );

    Ok(AggregationResult { group_by, groups })
}

/// Rank groups by the mean of `metric`, highest first, keeping at most `n`.
///
/// Ties are broken by group key ascending so the ranking is deterministic.
pub fn top_n(
    dataset: &Dataset,
    group_by: GroupBy,
    metric: MetricName,
    n: usize,
) -> AnalysisResult<Vec<(GroupKey, f64)>> {
    if n == 0 {
        return Err(AnalysisError::invalid_parameter("n", "must be at least 1"));
    }

    let mut ranked = partition(dataset, group_by)
        .into_iter()
        .map(|(key, records)| {
            let values = metric_values(&records, metric)?;
            Ok((key, stats::mean(&values)))
        })
        .collect::<AnalysisResult<Vec<_>>>()?;

    ranked.sort_by(|(ka, va), (kb, vb)| match vb.total_cmp(va) {
        Ordering::Equal => ka.cmp(kb),
        other => other,
    });
    ranked.truncate(n);
    Ok(ranked)
}

/// Group records by key, sorted by key.
fn partition(dataset: &Dataset, group_by: GroupBy) -> Vec<(GroupKey, Vec<&Record>)> {
    let mut groups: FxHashMap<GroupKey, Vec<&Record>> = FxHashMap::default();
    for record in dataset.records() {
        groups.entry(group_by.key_of(record)).or_default().push(record);
    }
    let mut groups: Vec<_> = groups.into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| a.cmp(b));
    groups
}

fn metric_values(records: &[&Record], metric: MetricName) -> AnalysisResult<Vec<f64>> {
    records
        .iter()
        .map(|r| {
            r.metric(metric).ok_or_else(|| {
                AnalysisError::InvalidSchema(format!(
                    "{} {}/{} has no value for {metric}",
                    r.department,
                    r.year,
                    r.month.number()
                ))
            })
        })
        .collect()
}

fn reduce(values: &[f64], reducers: &BTreeSet<Reducer>) -> ReducedValues {
    let mut out = ReducedValues::default();
    for reducer in reducers {
        match reducer {
            Reducer::Mean => out.mean = Some(stats::mean(values)),
            Reducer::Std => out.std = Some(stats::sample_std(values)),
            Reducer::Max => out.max = stats::min_max(values).map(|(_, hi)| hi),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use finlens_core::types::Month;

    use super::*;

    fn rec(year: i32, month: Month, dept: &str, revenue: f64) -> Record {
        Record::new(year, month, dept).with_metric(MetricName::Revenue, revenue)
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            rec(2019, Month::March, "B", 30.0),
            rec(2018, Month::January, "A", 10.0),
            rec(2018, Month::March, "B", 20.0),
            rec(2019, Month::January, "A", 40.0),
        ])
        .unwrap()
    }

    #[test]
    fn groups_by_year_in_chronological_order() {
        let result =
            aggregate(&sample(), GroupBy::Year, &[MetricName::Revenue], &[Reducer::Mean]).unwrap();
        let keys: Vec<_> = result.keys().cloned().collect();
        assert_eq!(keys, vec![GroupKey::Year(2018), GroupKey::Year(2019)]);
        assert_eq!(result.mean(&GroupKey::Year(2018), MetricName::Revenue), Some(15.0));
        assert_eq!(result.mean(&GroupKey::Year(2019), MetricName::Revenue), Some(35.0));
    }

    #[test]
    fn groups_by_month_in_calendar_order() {
        let result =
            aggregate(&sample(), GroupBy::Month, &[MetricName::Revenue], &[Reducer::Max]).unwrap();
        let keys: Vec<_> = result.keys().cloned().collect();
        assert_eq!(keys, vec![GroupKey::Month(Month::January), GroupKey::Month(Month::March)]);
        let jan = result.values(&GroupKey::Month(Month::January), MetricName::Revenue).unwrap();
        assert_eq!(jan.max, Some(40.0));
        assert_eq!(jan.mean, None);
    }

    #[test]
    fn std_is_nan_for_single_record_groups() {
        let ds = Dataset::new(vec![rec(2018, Month::May, "Solo", 5.0)]).unwrap();
        let result = aggregate(&ds, GroupBy::Department, &[MetricName::Revenue], &[Reducer::Std])
            .unwrap();
        let std = result.groups[0].metrics[&MetricName::Revenue].std.unwrap();
        assert!(std.is_nan());
    }

    #[test]
    fn empty_dataset_yields_empty_result() {
        let result = aggregate(
            &Dataset::default(),
            GroupBy::Department,
            &[MetricName::Revenue],
            &[Reducer::Mean, Reducer::Std],
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn missing_metric_is_invalid_schema() {
        let err = aggregate(&sample(), GroupBy::Year, &[MetricName::Assets], &[Reducer::Mean])
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSchema(_)));
    }

    #[test]
    fn top_n_breaks_ties_by_key() {
        let ds = Dataset::new(vec![
            rec(2018, Month::May, "C", 50.0),
            rec(2018, Month::May, "B", 50.0),
            rec(2018, Month::May, "A", 10.0),
            rec(2018, Month::May, "D", 70.0),
        ])
        .unwrap();
        let ranked = top_n(&ds, GroupBy::Department, MetricName::Revenue, 3).unwrap();
        let names: Vec<String> = ranked.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(names, vec!["D", "B", "C"]);
    }

    #[test]
    fn top_n_rejects_zero() {
        assert!(top_n(&sample(), GroupBy::Department, MetricName::Revenue, 0).is_err());
    }
}
