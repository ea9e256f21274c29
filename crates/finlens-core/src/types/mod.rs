//! Typed data model: metrics, months, records and immutable datasets.

pub mod dataset;
pub mod metric;
pub mod month;
pub mod record;

pub use dataset::{Dataset, DatasetFilter};
pub use metric::MetricName;
pub use month::Month;
pub use record::Record;

/// Normalizes an external label for lookup: trimmed, lowercased, with
/// spaces, underscores and hyphens removed.
pub fn normalize_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}
