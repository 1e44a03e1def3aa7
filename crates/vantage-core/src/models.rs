//! Payload models for the backend API.
//!
//! These mirror the backend's JSON responses field-for-field; the client
//! decodes them verbatim and leaves interpretation to its callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response from `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// The currently authenticated user, as reported by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub organization_id: i64,
    pub created_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    /// Returns true if this user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Aggregate usage counts from `/analytics/usage-summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSummary {
    pub total_events: i64,
    pub active_users: i64,
    pub features_tracked: i64,
}

/// Per-feature usage metrics from `/analytics/feature-usage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureUsage {
    pub feature_id: i64,
    #[serde(default)]
    pub feature_name: Option<String>,
    pub event_count: i64,
    pub daily_active_users: i64,
    pub avg_session_duration: f64,
}

/// Per-user activity over a trailing window, from `/analytics/user-activity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActivity {
    pub user_id: i64,
    #[serde(default)]
    pub email: Option<String>,
    pub event_count: i64,
    pub avg_session_duration: f64,
}

/// A detected usage anomaly from `/ai/anomalies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub feature_id: i64,
    #[serde(default)]
    pub feature_name: Option<String>,
    pub score: f64,
    /// Free-form diagnostic payload; shape varies by detector.
    pub details: serde_json::Value,
}

/// Natural-language insight strings from `/ai/usage-insights`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    pub insights: Vec<String>,
}

/// Per-feature z-scores against the population, part of [`ChartData`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureZScore {
    pub feature_id: i64,
    pub feature_name: String,
    pub z_event_count: f64,
    pub z_avg_session: f64,
    pub z_dau: f64,
    pub norm_score: f64,
    pub is_anomaly: bool,
}

/// Histogram bucket of z-score magnitudes, part of [`ChartData`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZScoreBucket {
    /// Bucket label, e.g. "0-1", "1-2", "4+".
    pub bucket: String,
    pub count: i64,
}

/// Raw per-feature metric row, part of [`ChartData`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureMetricRow {
    pub feature_id: i64,
    pub feature_name: String,
    pub event_count: i64,
    pub avg_session_duration: f64,
    pub daily_active_users: i64,
}

/// Pre-aggregated statistics for visualization, from `/ai/chart-data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub feature_z_scores: Vec<FeatureZScore>,
    pub z_distribution: Vec<ZScoreBucket>,
    pub feature_metrics: Vec<FeatureMetricRow>,
    pub threshold: f64,
    pub mean_event_count: f64,
    pub std_event_count: f64,
    pub mean_session: f64,
    pub std_session: f64,
    pub mean_dau: f64,
    pub std_dau: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn authenticated_user_decodes_backend_shape() {
        let user: AuthenticatedUser = serde_json::from_value(json!({
            "id": 7,
            "email": "admin@example.com",
            "role": "admin",
            "organization_id": 1,
            "created_at": "2026-01-15T09:30:00Z"
        }))
        .unwrap();

        assert_eq!(user.email, "admin@example.com");
        assert!(user.is_admin());
    }

    #[test]
    fn token_response_defaults_token_type() {
        let token: TokenResponse =
            serde_json::from_value(json!({ "access_token": "abc123" })).unwrap();
        assert_eq!(token.access_token, "abc123");
        assert_eq!(token.token_type, "bearer");
    }

    #[test]
    fn anomaly_accepts_arbitrary_details() {
        let anomaly: Anomaly = serde_json::from_value(json!({
            "feature_id": 3,
            "feature_name": "exports",
            "score": 4.2,
            "details": { "z_event_count": 4.2, "window_days": 30 }
        }))
        .unwrap();

        assert_eq!(anomaly.feature_name.as_deref(), Some("exports"));
        assert_eq!(anomaly.details["window_days"], 30);
    }

    #[test]
    fn feature_usage_tolerates_missing_name() {
        let usage: FeatureUsage = serde_json::from_value(json!({
            "feature_id": 1,
            "event_count": 120,
            "daily_active_users": 14,
            "avg_session_duration": 33.5
        }))
        .unwrap();
        assert!(usage.feature_name.is_none());
    }
}
