use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Server-assigned report identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub u64);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Severe,
    Moderate,
    Mild,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Severe => "severe",
            Self::Moderate => "moderate",
            Self::Mild => "mild",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Recovered,
    Ongoing,
    Fatal,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recovered => "recovered",
            Self::Ongoing => "ongoing",
            Self::Fatal => "fatal",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured extraction returned for one submitted report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub drug: String,
    #[serde(default)]
    pub adverse_events: Vec<String>,
    pub severity: Severity,
    pub outcome: Outcome,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: ReportId,
    pub drug: String,
    #[serde(default)]
    pub adverse_events: Vec<String>,
    pub severity: Severity,
    pub outcome: Outcome,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_report: Option<String>,
}

/// Envelope of the list-reports payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportList {
    #[serde(default)]
    pub reports: Vec<HistoryEntry>,
}

/// Category → count, in the order the service sent the keys.
///
/// JSON objects carry no ordering guarantee, but the service ranks some of
/// these maps (most common drugs first), so decoding keeps key order instead
/// of going through a hash map. A repeated key overwrites the earlier count in
/// place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Distribution(Vec<(String, u64)>);

impl Distribution {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, count: u64) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = count,
            None => self.0.push((key, count)),
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, v)| *v).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Distribution {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut dist = Self::new();
        for (k, v) in iter {
            dist.insert(k, v);
        }
        dist
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Distribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistributionVisitor;

        impl<'de> Visitor<'de> for DistributionVisitor {
            type Value = Distribution;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category names to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut dist = Distribution(Vec::with_capacity(access.size_hint().unwrap_or(0)));
                while let Some((key, count)) = access.next_entry::<String, u64>()? {
                    dist.insert(key, count);
                }
                Ok(dist)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Distribution::new())
            }
        }

        deserializer.deserialize_any(DistributionVisitor)
    }
}

/// Aggregate counts over every processed report at fetch time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub total_reports: u64,
    #[serde(default)]
    pub severity_distribution: Distribution,
    #[serde(default)]
    pub outcome_distribution: Distribution,
    #[serde(default)]
    pub common_drugs: Distribution,
    #[serde(default)]
    pub common_adverse_events: Distribution,
}

/// Service-defined translation target, e.g. `french`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetLanguage(String);

impl TargetLanguage {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_lowercase())
    }

    pub fn french() -> Self {
        Self::new("french")
    }

    pub fn swahili() -> Self {
        Self::new("swahili")
    }

    /// Languages the service is known to accept.
    pub fn known() -> [Self; 2] {
        [Self::french(), Self::swahili()]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
    pub target_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessReportRequest<'a> {
    pub report: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: TargetLanguage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_severity_and_outcome_decode_to_unknown() {
        let result: ProcessResult = serde_json::from_value(json!({
            "drug": "Drug X",
            "adverse_events": ["rash"],
            "severity": "life-threatening",
            "outcome": "unknown"
        }))
        .unwrap();
        assert_eq!(result.severity, Severity::Unknown);
        assert_eq!(result.outcome, Outcome::Unknown);
    }

    #[test]
    fn distribution_keeps_service_order() {
        let dist: Distribution =
            serde_json::from_str(r#"{"zeta": 5, "alpha": 3, "mid": 1}"#).unwrap();
        let keys: Vec<&str> = dist.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(dist.total(), 9);
    }

    #[test]
    fn distribution_repeated_key_overwrites_in_place() {
        let dist: Distribution = serde_json::from_str(r#"{"a": 1, "b": 2, "a": 7}"#).unwrap();
        assert_eq!(dist.len(), 2);
        assert_eq!(dist.get("a"), Some(7));
        assert_eq!(dist.iter().next(), Some(("a", 7)));
    }

    #[test]
    fn distribution_serializes_as_object() {
        let dist: Distribution = [("severe", 2), ("mild", 1)].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&dist).unwrap(),
            r#"{"severe":2,"mild":1}"#
        );
    }

    #[test]
    fn analytics_tolerates_missing_maps() {
        let snapshot: AnalyticsSnapshot =
            serde_json::from_value(json!({ "total_reports": 0 })).unwrap();
        assert!(snapshot.severity_distribution.is_empty());
        assert!(snapshot.common_drugs.is_empty());
    }

    #[test]
    fn history_entry_decodes_service_timestamps() {
        let entry: HistoryEntry = serde_json::from_value(json!({
            "id": 12,
            "original_report": "Patient had a rash.",
            "drug": "Drug Y",
            "adverse_events": ["rash"],
            "severity": "mild",
            "outcome": "ongoing",
            "created_at": "2024-03-01T09:30:00.123456Z"
        }))
        .unwrap();
        assert_eq!(entry.id, ReportId(12));
        assert_eq!(entry.created_at.format("%Y-%m-%d").to_string(), "2024-03-01");
        assert_eq!(entry.original_report.as_deref(), Some("Patient had a rash."));
    }

    #[test]
    fn target_language_is_normalized() {
        assert_eq!(TargetLanguage::new(" French "), TargetLanguage::french());
        assert_eq!(
            serde_json::to_value(TargetLanguage::swahili()).unwrap(),
            json!("swahili")
        );
    }
}
