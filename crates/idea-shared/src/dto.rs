//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to create an idea.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIdeaRequest {
    pub title: String,
    pub description: String,
}

/// Request to edit an idea. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateIdeaRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthInfo {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started.
    pub uptime: f64,
    pub environment: String,
    pub version: String,
}

/// Payload of `GET /api/health/db`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbHealth {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub connection: String,
}
