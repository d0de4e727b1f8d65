//! Chart-ready series derived from analytics distributions.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::model::Distribution;

/// Chart cell color. Crosses the bridge as its hex code, e.g. `#dc2626`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Swatch {
    Red,
    Amber,
    Green,
    Gray,
}

impl Swatch {
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Red => "#dc2626",
            Self::Amber => "#d97706",
            Self::Green => "#059669",
            Self::Gray => "#6b7280",
        }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        [Self::Red, Self::Amber, Self::Green, Self::Gray]
            .into_iter()
            .find(|swatch| swatch.hex().eq_ignore_ascii_case(hex))
    }
}

impl Serialize for Swatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

impl<'de> Deserialize<'de> for Swatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex)
            .ok_or_else(|| de::Error::custom(format!("unknown chart color `{hex}`")))
    }
}

pub fn severity_swatch(key: &str) -> Swatch {
    match key {
        "severe" => Swatch::Red,
        "moderate" => Swatch::Amber,
        "mild" => Swatch::Green,
        _ => Swatch::Gray,
    }
}

pub fn outcome_swatch(key: &str) -> Swatch {
    match key {
        "recovered" => Swatch::Green,
        "ongoing" => Swatch::Amber,
        "fatal" => Swatch::Red,
        _ => Swatch::Gray,
    }
}

/// How points are ordered. The service's own key order is the default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartOrder {
    #[default]
    AsReceived,
    /// Largest first; equal counts keep service order.
    CountDescending,
    LabelAscending,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: u64,
    pub color: Swatch,
}

/// Upper-cases the first character and leaves the rest as is.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn series(
    dist: &Distribution,
    order: ChartOrder,
    palette: fn(&str) -> Swatch,
) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = dist
        .iter()
        .map(|(key, value)| ChartPoint {
            label: capitalize_first(key),
            value,
            color: palette(key),
        })
        .collect();

    match order {
        ChartOrder::AsReceived => {}
        ChartOrder::CountDescending => points.sort_by(|a, b| b.value.cmp(&a.value)),
        ChartOrder::LabelAscending => points.sort_by(|a, b| a.label.cmp(&b.label)),
    }

    points
}

pub fn severity_series(dist: &Distribution, order: ChartOrder) -> Vec<ChartPoint> {
    series(dist, order, severity_swatch)
}

pub fn outcome_series(dist: &Distribution, order: ChartOrder) -> Vec<ChartPoint> {
    series(dist, order, outcome_swatch)
}
