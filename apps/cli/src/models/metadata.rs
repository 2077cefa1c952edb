use serde::{Deserialize, Serialize};

/// POST /metadata request body.
#[derive(Debug, Clone, Serialize)]
pub struct MetadataRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

/// Page metadata: title/description pair plus the social preview cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataResult {
    pub title: String,
    #[serde(rename = "metaDescription")]
    pub meta_description: String,
    #[serde(rename = "og")]
    pub open_graph: OpenGraph,
    #[serde(rename = "twitter")]
    pub twitter_card: TwitterCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub og_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_deserializes_wire_names() {
        let json = r#"{
            "title": "Rust SEO",
            "metaDescription": "A short pitch.",
            "og": {"title": "Rust SEO", "description": "A short pitch.", "type": "article"},
            "twitter": {"card": "summary"},
            "canonical": "https://example.com/rust-seo"
        }"#;
        let result: MetadataResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.meta_description, "A short pitch.");
        assert_eq!(result.open_graph.og_type.as_deref(), Some("article"));
        assert_eq!(result.twitter_card.card.as_deref(), Some("summary"));
        assert_eq!(
            result.canonical.as_deref(),
            Some("https://example.com/rust-seo")
        );
    }

    #[test]
    fn test_metadata_optional_fields_may_be_absent() {
        let json = r#"{
            "title": "Rust SEO",
            "metaDescription": "A short pitch.",
            "og": {"title": "Rust SEO", "description": "A short pitch."},
            "twitter": {}
        }"#;
        let result: MetadataResult = serde_json::from_str(json).unwrap();
        assert!(result.canonical.is_none());
        assert!(result.open_graph.image.is_none());
        assert!(result.twitter_card.title.is_none());
    }

    #[test]
    fn test_metadata_missing_title_rejects() {
        let json = r#"{
            "metaDescription": "A short pitch.",
            "og": {"title": "t", "description": "d"},
            "twitter": {}
        }"#;
        assert!(serde_json::from_str::<MetadataResult>(json).is_err());
    }
}
