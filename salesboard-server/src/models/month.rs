//! Month filter shared by the statistics and chart endpoints

use serde::Deserialize;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Calendar month a query is restricted to.
///
/// Anything that does not name a month resolves to [`Month::NONE`], which
/// binds as SQL NULL and therefore matches no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month(Option<u8>);

impl Month {
    pub const NONE: Month = Month(None);

    /// Accepts `3`, `03`, `March` or `mar` (case-insensitive).
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<u8>() {
            return if (1..=12).contains(&n) {
                Self(Some(n))
            } else {
                Self::NONE
            };
        }

        let lower = raw.to_ascii_lowercase();
        if lower.len() < 3 {
            return Self::NONE;
        }
        MONTH_NAMES
            .iter()
            .position(|name| *name == lower || (lower.len() == 3 && name.starts_with(&lower)))
            .map(|idx| Self(Some(idx as u8 + 1)))
            .unwrap_or(Self::NONE)
    }

    /// Two-digit key compared against characters 6-7 of `dateOfSale`.
    pub fn key(&self) -> Option<String> {
        self.0.map(|n| format!("{n:02}"))
    }
}

/// `?month=` query parameter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthParams {
    pub month: Option<String>,
}

impl From<MonthParams> for Month {
    fn from(params: MonthParams) -> Self {
        params.month.as_deref().map(Month::parse).unwrap_or(Month::NONE)
    }
}
