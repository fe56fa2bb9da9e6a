//! Aggregate shapes returned by the analytics endpoints

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One bar-chart price range, labelled `min-max`.
///
/// The first range is `[0, 100]`; every later one is `(previous max, max]`,
/// so fractional prices such as 100.50 still land in exactly one range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }

    /// Lower bound and whether it is inclusive.
    pub fn lower_bound(&self) -> (i64, bool) {
        if self.min == 0 {
            (0, true)
        } else {
            (self.min as i64 - 1, false)
        }
    }

    /// Inclusive upper bound.
    pub fn upper_bound(&self) -> i64 {
        self.max as i64
    }
}

/// The ten bar-chart buckets in ascending order, covering `[0, 1000]`.
pub const PRICE_RANGES: [PriceRange; 10] = [
    PriceRange::new(0, 100),
    PriceRange::new(101, 200),
    PriceRange::new(201, 300),
    PriceRange::new(301, 400),
    PriceRange::new(401, 500),
    PriceRange::new(501, 600),
    PriceRange::new(601, 700),
    PriceRange::new(701, 800),
    PriceRange::new(801, 900),
    PriceRange::new(901, 1000),
];

/// Monthly sales totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_sale_amount: f64,
    pub total_sold: i64,
    pub total_not_sold: i64,
}

/// One bar of the bar chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBucket {
    pub range: String,
    pub count: i64,
}

/// One slice of the pie chart, serialized as `{ "<category>": count }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

impl Serialize for CategoryCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.category, &self.count)?;
        map.end()
    }
}

/// Statistics, bar chart and pie chart for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    pub total_statistics: Statistics,
    pub bar_chart_data: Vec<PriceBucket>,
    pub pie_chart_data: Vec<CategoryCount>,
}
