use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mobility category, keyed by its percent-change field name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "groceryChange")]
    Grocery,
    #[serde(rename = "parksChange")]
    Parks,
    #[default]
    #[serde(rename = "retailChange")]
    Retail,
    #[serde(rename = "transitChange")]
    Transit,
    #[serde(rename = "workplacesChange")]
    Workplaces,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Grocery,
        Metric::Parks,
        Metric::Retail,
        Metric::Transit,
        Metric::Workplaces,
    ];

    /// Field name used in records, e.g. `retailChange`.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Grocery => "groceryChange",
            Metric::Parks => "parksChange",
            Metric::Retail => "retailChange",
            Metric::Transit => "transitChange",
            Metric::Workplaces => "workplacesChange",
        }
    }

    /// Label for a metric picker.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Grocery => "Grocery",
            Metric::Parks => "Parks",
            Metric::Retail => "Retail",
            Metric::Transit => "Transit",
            Metric::Workplaces => "Workplace",
        }
    }

    /// Singular noun for captions ("travel to park locations").
    pub fn noun(self) -> &'static str {
        match self {
            Metric::Grocery => "grocery",
            Metric::Parks => "park",
            Metric::Retail => "retail",
            Metric::Transit => "transit",
            Metric::Workplaces => "workplace",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetric(pub String);

impl fmt::Display for UnknownMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown metric '{}' (expected one of groceryChange, parksChange, retailChange, transitChange, workplacesChange)",
            self.0
        )
    }
}

impl std::error::Error for UnknownMetric {}

impl FromStr for Metric {
    type Err = UnknownMetric;

    /// Accepts the field name (`parksChange`) or the bare category (`parks`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| {
                m.key().eq_ignore_ascii_case(needle)
                    || m.key().trim_end_matches("Change").eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// Which values count as "no data" for fill and styling.
///
/// `ZeroIsNoData` keeps the long-standing map behavior where a 0% change is
/// shown exactly like a missing value. `MissingOnly` renders 0% with the
/// neutral scale color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoDataPolicy {
    #[default]
    ZeroIsNoData,
    MissingOnly,
}

/// Per-country percent changes for one date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MobilityRecord {
    pub country_code: String,
    pub country_name: String,
    values: [Option<f64>; 5],
}

impl MobilityRecord {
    pub fn new(country_code: impl Into<String>, country_name: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            country_name: country_name.into(),
            values: [None; 5],
        }
    }

    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        self.values[metric.slot()] = value;
    }

    /// The stored value, exactly as ingested.
    pub fn raw(&self, metric: Metric) -> Option<f64> {
        self.values[metric.slot()]
    }

    /// The value to display under `policy`, or `None` for "no data".
    ///
    /// This is the single source of truth for both the fill color and the
    /// no-data style class.
    pub fn value(&self, metric: Metric, policy: NoDataPolicy) -> Option<f64> {
        let v = self.raw(metric).filter(|v| v.is_finite())?;
        match policy {
            NoDataPolicy::ZeroIsNoData if v == 0.0 => None,
            _ => Some(v),
        }
    }
}
