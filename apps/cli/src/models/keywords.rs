//! Keyword suggestion contract, including the trend-verified variant.

use serde::{Deserialize, Serialize};

/// POST /keywords request body. `verify_trends`, `market`, and
/// `timeframe` only matter when the backend cross-checks suggestions
/// against the external trends provider.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeywordRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(rename = "verifyTrends", skip_serializing_if = "Option::is_none")]
    pub verify_trends: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
}

/// POST /keywords response. A missing `keywords` field is a valid
/// "no suggestions" outcome, not a malformed payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordList {
    #[serde(default)]
    pub keywords: Vec<KeywordEntry>,
}

impl KeywordList {
    /// Normalizes every wire entry exactly once. Nothing downstream
    /// re-interprets the string-or-object shapes.
    pub fn normalize(self) -> Vec<Keyword> {
        self.keywords
            .into_iter()
            .map(KeywordEntry::normalize)
            .collect()
    }
}

/// A keyword as it appears on the wire: a bare phrase when trends were
/// not requested, or an object carrying the trends provider's verdict.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KeywordEntry {
    Phrase(String),
    Detailed {
        keyword: String,
        trend: Option<TrendLevel>,
        interest: Option<f64>,
    },
}

impl KeywordEntry {
    pub fn normalize(self) -> Keyword {
        match self {
            KeywordEntry::Phrase(phrase) => Keyword {
                phrase,
                trend: None,
            },
            KeywordEntry::Detailed { keyword, trend, .. } => Keyword {
                phrase: keyword,
                trend,
            },
        }
    }
}

/// Search-interest classification assigned by the external trends
/// provider. Opaque here; thresholds are theirs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendLevel {
    Rising,
    Stable,
    Low,
    NoData,
}

/// Normalized keyword used everywhere past the wire boundary, including
/// the persisted session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub phrase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keywords_defaults_to_empty() {
        let list: KeywordList = serde_json::from_str("{}").unwrap();
        assert!(list.keywords.is_empty());
    }

    #[test]
    fn test_string_keywords_validate_unchanged() {
        let list: KeywordList = serde_json::from_str(r#"{"keywords": ["a", "b"]}"#).unwrap();
        let normalized = list.normalize();
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].phrase, "a");
        assert_eq!(normalized[0].trend, None);
    }

    #[test]
    fn test_numeric_keywords_reject() {
        assert!(serde_json::from_str::<KeywordList>(r#"{"keywords": [1, 2]}"#).is_err());
    }

    #[test]
    fn test_detailed_entry_carries_trend() {
        let json = r#"{"keywords": [{"keyword": "rust seo", "trend": "rising", "interest": 72.5}]}"#;
        let list: KeywordList = serde_json::from_str(json).unwrap();
        let normalized = list.normalize();
        assert_eq!(normalized[0].phrase, "rust seo");
        assert_eq!(normalized[0].trend, Some(TrendLevel::Rising));
    }

    #[test]
    fn test_detailed_entry_without_trend() {
        let json = r#"{"keywords": [{"keyword": "rust seo"}]}"#;
        let list: KeywordList = serde_json::from_str(json).unwrap();
        assert_eq!(list.normalize()[0].trend, None);
    }

    #[test]
    fn test_mixed_entries_normalize() {
        let json = r#"{"keywords": ["plain", {"keyword": "verified", "trend": "no-data"}]}"#;
        let normalized: Vec<Keyword> = serde_json::from_str::<KeywordList>(json)
            .unwrap()
            .normalize();
        assert_eq!(normalized[0].phrase, "plain");
        assert_eq!(normalized[1].trend, Some(TrendLevel::NoData));
    }

    #[test]
    fn test_trend_levels_use_kebab_case() {
        assert_eq!(
            serde_json::from_str::<TrendLevel>(r#""no-data""#).unwrap(),
            TrendLevel::NoData
        );
        assert_eq!(
            serde_json::to_string(&TrendLevel::Rising).unwrap(),
            r#""rising""#
        );
    }

    #[test]
    fn test_request_uses_wire_field_names() {
        let request = KeywordRequest {
            content: "hello".to_string(),
            verify_trends: Some(true),
            market: Some("US".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["verifyTrends"], true);
        assert_eq!(value["market"], "US");
        assert!(value.get("audience").is_none());
    }
}
