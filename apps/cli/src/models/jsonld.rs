use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// POST /schema request body. `faqs` feeds an FAQPage entry when present.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub faqs: Vec<FaqItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Generated JSON-LD entries (free-form objects, schema.org vocabulary is
/// the backend's concern) plus lint findings about them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonLdResult {
    pub jsonld: Vec<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lint: Vec<LintFinding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintFinding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LintLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintLevel {
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsonld_with_lint_findings() {
        let json = r#"{
            "jsonld": [{"@type": "Article", "headline": "Rust SEO"}],
            "lint": [{"level": "warning", "field": "datePublished", "message": "missing"}]
        }"#;
        let result: JsonLdResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.jsonld.len(), 1);
        assert_eq!(result.jsonld[0]["@type"], "Article");
        assert_eq!(result.lint[0].level, Some(LintLevel::Warning));
        assert_eq!(result.lint[0].field.as_deref(), Some("datePublished"));
    }

    #[test]
    fn test_missing_lint_defaults_to_empty() {
        let json = r#"{"jsonld": []}"#;
        let result: JsonLdResult = serde_json::from_str(json).unwrap();
        assert!(result.lint.is_empty());
    }

    #[test]
    fn test_lint_finding_without_level() {
        let json = r#"{"jsonld": [], "lint": [{"message": "empty document"}]}"#;
        let result: JsonLdResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.lint[0].level, None);
        assert_eq!(result.lint[0].message, "empty document");
    }

    #[test]
    fn test_missing_jsonld_rejects() {
        assert!(serde_json::from_str::<JsonLdResult>(r#"{"lint": []}"#).is_err());
    }
}
