//! Tests for the finlens configuration system.

use std::sync::Mutex;

use finlens_core::config::{AnomalyScope, CliOverrides, FinlensConfig};
use finlens_core::errors::ConfigError;
use finlens_core::types::MetricName;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const FINLENS_VARS: [&str; 6] = [
    "FINLENS_ANOMALY_THRESHOLD",
    "FINLENS_ANOMALY_SCOPE",
    "FINLENS_TOP_N",
    "FINLENS_FORECAST_YEARS_AHEAD",
    "FINLENS_FORECAST_FALLBACK_GROWTH",
    "FINLENS_LOADER_CACHE_CAPACITY",
];

/// Clear all FINLENS_ env vars and point HOME at an empty directory so a
/// developer's own user config cannot leak into the tests.
fn isolate_env(home: &std::path::Path) {
    for key in FINLENS_VARS {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
}

#[test]
fn layered_resolution_cli_beats_env_beats_project() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    isolate_env(home.path());

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("finlens.toml"),
        r#"
[analysis]
anomaly_threshold = 2.5
top_n = 5

[forecast]
years_ahead = 2
"#,
    )
    .unwrap();

    std::env::set_var("FINLENS_TOP_N", "7");
    std::env::set_var("FINLENS_FORECAST_YEARS_AHEAD", "4");

    let cli = CliOverrides {
        years_ahead: Some(6),
        ..Default::default()
    };
    let config = FinlensConfig::load(dir.path(), Some(&cli)).unwrap();

    // Project value survives where nothing overrides it.
    assert_eq!(config.analysis.effective_anomaly_threshold(), 2.5);
    // Env overrides project.
    assert_eq!(config.analysis.effective_top_n(), 7);
    // CLI overrides env.
    assert_eq!(config.forecast.effective_years_ahead(), 6);

    isolate_env(home.path());
}

#[test]
fn user_config_is_lowest_file_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    isolate_env(home.path());

    let user_dir = home.path().join(".finlens");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        "[analysis]\ntop_n = 3\nanomaly_scope = \"full\"\n",
    )
    .unwrap();

    let project = tempfile::tempdir().unwrap();
    std::fs::write(project.path().join("finlens.toml"), "[analysis]\ntop_n = 12\n").unwrap();

    let config = FinlensConfig::load(project.path(), None).unwrap();
    assert_eq!(config.analysis.effective_top_n(), 12);
    assert_eq!(config.analysis.effective_anomaly_scope(), AnomalyScope::Full);
}

#[test]
fn missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    isolate_env(home.path());

    let dir = tempfile::tempdir().unwrap();
    let config = FinlensConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.analysis.effective_anomaly_threshold(), 3.0);
    assert_eq!(config.analysis.effective_anomaly_scope(), AnomalyScope::Filtered);
    assert_eq!(config.analysis.effective_top_n(), 10);
    assert_eq!(config.analysis.effective_top_metric(), MetricName::Revenue);
    assert_eq!(config.analysis.effective_correlation_metrics().len(), 12);
    assert_eq!(config.forecast.effective_years_ahead(), 3);
    assert_eq!(config.forecast.effective_fallback_growth(), 0.05);
    assert_eq!(config.forecast.effective_growth_bounds(), (0.0, 0.15));
    assert_eq!(config.loader.effective_cache_capacity(), 8);
    assert!(!config.loader.effective_allow_unknown_columns());
}

#[test]
fn unparseable_env_values_are_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    isolate_env(home.path());

    std::env::set_var("FINLENS_ANOMALY_THRESHOLD", "three");
    std::env::set_var("FINLENS_ANOMALY_SCOPE", "sideways");
    let dir = tempfile::tempdir().unwrap();
    let config = FinlensConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.analysis.anomaly_threshold, None);
    assert_eq!(config.analysis.anomaly_scope, None);

    isolate_env(home.path());
}

#[test]
fn invalid_project_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::tempdir().unwrap();
    isolate_env(home.path());

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("finlens.toml"), "[analysis\ntop_n = ").unwrap();
    let err = FinlensConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn metric_typos_are_rejected_at_parse_time() {
    let err = FinlensConfig::from_toml("[analysis]\nanomaly_metrics = [\"Revenu\"]\n").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn metric_lists_parse_by_canonical_name() {
    let config =
        FinlensConfig::from_toml("[analysis]\nanomaly_metrics = [\"NetProfit\", \"Leverage\"]\n")
            .unwrap();
    assert_eq!(
        config.analysis.effective_anomaly_metrics(),
        vec![MetricName::NetProfit, MetricName::Leverage]
    );
}

#[test]
fn validation_rejects_bad_parameters() {
    let cases = [
        ("[analysis]\nanomaly_threshold = 0.0\n", "analysis.anomaly_threshold"),
        ("[analysis]\nanomaly_threshold = -1.0\n", "analysis.anomaly_threshold"),
        ("[analysis]\ntop_n = 0\n", "analysis.top_n"),
        ("[forecast]\nyears_ahead = 0\n", "forecast.years_ahead"),
        ("[forecast]\nyears_ahead = 3000000000\n", "forecast.years_ahead"),
        ("[forecast]\ngrowth_min = 0.2\ngrowth_max = 0.1\n", "forecast.growth_min"),
        ("[loader]\ncache_capacity = 0\n", "loader.cache_capacity"),
    ];
    for (toml_str, expected_field) in cases {
        match FinlensConfig::from_toml(toml_str) {
            Err(ConfigError::ValidationFailed { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected validation failure for {expected_field}, got {other:?}"),
        }
    }
}

#[test]
fn toml_round_trip_preserves_values() {
    let config = FinlensConfig::from_toml(
        "[analysis]\ntop_n = 4\ntrend_metrics = [\"Revenue\"]\n\
         [forecast]\nfallback_growth = 0.02\n",
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let back = FinlensConfig::from_toml(&text).unwrap();
    assert_eq!(back.analysis.top_n, Some(4));
    assert_eq!(back.analysis.trend_metrics, vec![MetricName::Revenue]);
    assert_eq!(back.forecast.fallback_growth, Some(0.02));
}
