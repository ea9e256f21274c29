//! Calendar months, ordered January through December.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalize_label;

/// A calendar month. Ordering is chronological, so grouping by month
/// yields a seasonality profile in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

const SOURCE_NAMES: [&str; 12] = [
    "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь",
    "Октябрь", "Ноябрь", "Декабрь",
];

impl Month {
    pub const ALL: [Month; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// 1-based month number.
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    /// Month from its 1-based number.
    pub fn from_number(n: u32) -> Option<Self> {
        n.checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize))
            .copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// Month name as written in the Russian-language source dataset.
    pub fn source_name(&self) -> &'static str {
        SOURCE_NAMES[*self as usize]
    }

    /// Parse a month from a full English name, a three-letter abbreviation,
    /// a number 1..=12, or a source-language name.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = normalize_label(label);
        if wanted.is_empty() {
            return None;
        }
        if let Ok(n) = wanted.parse::<u32>() {
            return Self::from_number(n);
        }
        Self::ALL.into_iter().find(|m| {
            let name = normalize_label(m.name());
            name == wanted
                || (wanted.len() == 3 && name.starts_with(&wanted))
                || normalize_label(m.source_name()) == wanted
        })
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
