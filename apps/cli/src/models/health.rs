use serde::{Deserialize, Serialize};

/// GET /health response — liveness plus the model the backend is running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}
