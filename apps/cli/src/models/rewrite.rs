use serde::{Deserialize, Serialize};

/// POST /rewrite request body.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// The rewritten content: an HTML fragment plus the server-side path
/// where the rendered page can be fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteResult {
    pub html_block: String,
    pub download_path: String,
}

/// POST /download request body. `jsonld` is embedded into the rendered
/// page's head when present.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadRequest {
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonld: Option<serde_json::Value>,
}
