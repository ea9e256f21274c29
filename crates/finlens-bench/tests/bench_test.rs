//! Tests for finlens-bench: fixture shape, determinism and loader round trip.

use finlens_analysis::loader::{CsvLoader, DatasetCache};
use finlens_analysis::report::ReportAssembler;
use finlens_bench::fixtures::{generate_dataset, write_csv, FixtureSpec, BASE_YEAR};
use finlens_core::types::{MetricName, Month};

#[test]
fn small_fixture_has_full_calendar() {
    let ds = generate_dataset(FixtureSpec::SMALL, 1).unwrap();
    assert_eq!(ds.len(), 3 * 12 * 10);
    assert_eq!(ds.years(), vec![BASE_YEAR, BASE_YEAR + 1, BASE_YEAR + 2]);
    for month in Month::ALL {
        assert_eq!(ds.records().iter().filter(|r| r.month == month).count(), 30);
    }
}

#[test]
fn fixture_deterministic_same_seed() {
    let a = generate_dataset(FixtureSpec::MICRO, 42).unwrap();
    let b = generate_dataset(FixtureSpec::MICRO, 42).unwrap();
    assert_eq!(a.records(), b.records());
}

#[test]
fn fixture_different_seeds_differ() {
    let a = generate_dataset(FixtureSpec::MICRO, 42).unwrap();
    let b = generate_dataset(FixtureSpec::MICRO, 99).unwrap();
    assert_ne!(a.records(), b.records());
}

#[test]
fn csv_round_trip_through_loader() {
    let ds = generate_dataset(FixtureSpec::MICRO, 5).unwrap();
    let mut buf = Vec::new();
    write_csv(&ds, &mut buf).unwrap();

    let loaded = CsvLoader::new().load_reader(buf.as_slice()).unwrap();
    assert_eq!(loaded.len(), ds.len());
    assert_eq!(loaded.departments(), ds.departments());
    assert_eq!(
        loaded.column(MetricName::Revenue).unwrap(),
        ds.column(MetricName::Revenue).unwrap()
    );
}

#[test]
fn cached_load_of_generated_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("company.csv");
    let file = std::fs::File::create(&path).unwrap();
    write_csv(&generate_dataset(FixtureSpec::MICRO, 8).unwrap(), file).unwrap();

    let cache = DatasetCache::new(2, CsvLoader::new());
    let first = cache.load(&path).unwrap();
    let second = cache.load(&path).unwrap();
    assert!(first.same_snapshot(&second));
}

#[test]
fn default_report_over_fixture() {
    let ds = generate_dataset(FixtureSpec::SMALL, 42).unwrap();
    let report = ReportAssembler::default().build_report(&ds).unwrap();

    assert_eq!(report.yearly_trends.len(), 3);
    assert_eq!(report.seasonality.len(), 12);
    assert_eq!(report.departments.len(), 10);
    assert_eq!(report.top_departments.len(), 10);
    assert_eq!(report.correlations.size(), MetricName::ALL.len());
    assert!(report.to_json().is_ok());
}
