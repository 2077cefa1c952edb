use serde::{Deserialize, Serialize};

/// POST /social request body.
#[derive(Debug, Clone, Serialize)]
pub struct SocialRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

/// Per-network post drafts. Networks the backend chose to skip come back
/// absent; a missing thread sequence means no thread was drafted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub threads: Vec<ThreadPost>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadPost {
    pub post: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}
