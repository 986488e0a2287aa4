use serde::{Deserialize, Serialize};

/// Static liveness payload served by `/health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
            service: "stocktrack-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
