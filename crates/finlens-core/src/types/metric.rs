//! The closed set of financial metrics a record can carry.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalize_label;

/// One named numeric financial indicator.
///
/// External column labels are mapped onto this enum once, at load time, so
/// a typo in a column name fails loudly instead of producing an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetricName {
    Revenue,
    NetProfit,
    OperatingExpenses,
    Assets,
    Liabilities,
    CurrentRatio,
    MarketShare,
    Employees,
    SalesMargin,
    AssetTurnover,
    ReturnOnAssets,
    Leverage,
}

impl MetricName {
    /// All metrics in declaration order.
    pub const ALL: [MetricName; 12] = [
        Self::Revenue,
        Self::NetProfit,
        Self::OperatingExpenses,
        Self::Assets,
        Self::Liabilities,
        Self::CurrentRatio,
        Self::MarketShare,
        Self::Employees,
        Self::SalesMargin,
        Self::AssetTurnover,
        Self::ReturnOnAssets,
        Self::Leverage,
    ];

    /// Canonical identifier, as used in config files and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::NetProfit => "NetProfit",
            Self::OperatingExpenses => "OperatingExpenses",
            Self::Assets => "Assets",
            Self::Liabilities => "Liabilities",
            Self::CurrentRatio => "CurrentRatio",
            Self::MarketShare => "MarketShare",
            Self::Employees => "Employees",
            Self::SalesMargin => "SalesMargin",
            Self::AssetTurnover => "AssetTurnover",
            Self::ReturnOnAssets => "ReturnOnAssets",
            Self::Leverage => "Leverage",
        }
    }

    /// Human-readable English label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::NetProfit => "Net profit",
            Self::OperatingExpenses => "Operating expenses",
            Self::Assets => "Assets",
            Self::Liabilities => "Liabilities",
            Self::CurrentRatio => "Current ratio",
            Self::MarketShare => "Market share",
            Self::Employees => "Employees",
            Self::SalesMargin => "Sales margin",
            Self::AssetTurnover => "Asset turnover",
            Self::ReturnOnAssets => "Return on assets",
            Self::Leverage => "Leverage",
        }
    }

    /// Column label used by the Russian-language source dataset.
    pub fn source_label(&self) -> &'static str {
        match self {
            Self::Revenue => "Выручка",
            Self::NetProfit => "Чистая прибыль",
            Self::OperatingExpenses => "Операционные расходы",
            Self::Assets => "Активы",
            Self::Liabilities => "Обязательства",
            Self::CurrentRatio => "Коэффициент текущей ликвидности",
            Self::MarketShare => "Доля рынка",
            Self::Employees => "Количество сотрудников",
            Self::SalesMargin => "Рентабельность продаж",
            Self::AssetTurnover => "Оборачиваемость активов",
            Self::ReturnOnAssets => "Рентабельность активов",
            Self::Leverage => "Долговая нагрузка",
        }
    }

    /// Whether every value of this metric must be strictly positive.
    /// Ratios divide by these, so a zero would poison derived metrics.
    pub fn requires_positive(&self) -> bool {
        matches!(self, Self::Revenue | Self::Assets)
    }

    /// Resolve an external column label to a metric.
    ///
    /// Accepts the canonical identifier, the English label and the source
    /// label, ignoring case, spaces and underscores. Returns `None` for
    /// anything else.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = normalize_label(label);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|m| {
            normalize_label(m.as_str()) == wanted
                || normalize_label(m.label()) == wanted
                || normalize_label(m.source_label()) == wanted
        })
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_all_label_forms() {
        assert_eq!(MetricName::from_label("NetProfit"), Some(MetricName::NetProfit));
        assert_eq!(MetricName::from_label("net profit"), Some(MetricName::NetProfit));
        assert_eq!(MetricName::from_label("NET_PROFIT"), Some(MetricName::NetProfit));
        assert_eq!(MetricName::from_label("Чистая прибыль"), Some(MetricName::NetProfit));
        assert_eq!(
            MetricName::from_label("Коэффициент текущей ликвидности"),
            Some(MetricName::CurrentRatio)
        );
    }

    #[test]
    fn rejects_typos() {
        assert_eq!(MetricName::from_label("Revenu"), None);
        assert_eq!(MetricName::from_label(""), None);
        assert_eq!(MetricName::from_label("   "), None);
    }

    #[test]
    fn every_metric_round_trips_through_its_labels() {
        for m in MetricName::ALL {
            assert_eq!(MetricName::from_label(m.as_str()), Some(m));
            assert_eq!(MetricName::from_label(m.label()), Some(m));
            assert_eq!(MetricName::from_label(m.source_label()), Some(m));
        }
    }

    #[test]
    fn only_revenue_and_assets_must_be_positive() {
        let positive: Vec<_> = MetricName::ALL
            .into_iter()
            .filter(MetricName::requires_positive)
            .collect();
        assert_eq!(positive, vec![MetricName::Revenue, MetricName::Assets]);
    }
}
