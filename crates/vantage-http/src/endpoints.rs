//! Backend endpoint paths and data-access functions.
//!
//! One thin function per endpoint: call through the dispatcher, return
//! the decoded payload verbatim. No transformation or business logic
//! lives here; the presentation layer attaches at this seam.

use serde::Serialize;

use vantage_core::models::{
    Anomaly, AuthenticatedUser, ChartData, FeatureUsage, Insights, TokenResponse, UsageSummary,
    UserActivity,
};
use vantage_core::{Credentials, Result};

use crate::dispatcher::Dispatcher;

/// Exchange credentials for a token. Form-encoded, public.
pub const LOGIN: &str = "/auth/login";

/// Resolve the current token to a user.
pub const ME: &str = "/auth/me";

/// Aggregate usage counts.
pub const USAGE_SUMMARY: &str = "/analytics/usage-summary";

/// Per-feature usage metrics.
pub const FEATURE_USAGE: &str = "/analytics/feature-usage";

/// Per-user activity over a trailing window.
pub const USER_ACTIVITY: &str = "/analytics/user-activity";

/// Detected usage anomalies.
pub const ANOMALIES: &str = "/ai/anomalies";

/// Natural-language insight strings.
pub const USAGE_INSIGHTS: &str = "/ai/usage-insights";

/// Pre-aggregated statistics for visualization.
pub const CHART_DATA: &str = "/ai/chart-data";

/// Form body for the login endpoint. Field names are fixed by the
/// backend's OAuth2 password form.
#[derive(Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

/// Query parameters for the user-activity endpoint.
#[derive(Debug, Serialize)]
struct UserActivityQuery {
    days: u32,
}

/// Submit credentials to `/auth/login`.
///
/// Goes through the dispatcher like every other call; the endpoint is
/// public, so an empty token store is fine.
pub async fn login(dispatcher: &Dispatcher, credentials: &Credentials) -> Result<TokenResponse> {
    let form = LoginForm {
        username: credentials.email(),
        password: credentials.password(),
    };
    dispatcher.post_form(LOGIN, &form).await
}

/// Resolve the current token to an [`AuthenticatedUser`] via `/auth/me`.
pub async fn me(dispatcher: &Dispatcher) -> Result<AuthenticatedUser> {
    dispatcher.get(ME).await
}

/// Fetch aggregate usage counts.
pub async fn usage_summary(dispatcher: &Dispatcher) -> Result<UsageSummary> {
    dispatcher.get(USAGE_SUMMARY).await
}

/// Fetch per-feature usage metrics.
pub async fn feature_usage(dispatcher: &Dispatcher) -> Result<Vec<FeatureUsage>> {
    dispatcher.get(FEATURE_USAGE).await
}

/// Fetch per-user activity over the trailing `days` window.
pub async fn user_activity(dispatcher: &Dispatcher, days: u32) -> Result<Vec<UserActivity>> {
    dispatcher
        .get_query(USER_ACTIVITY, &UserActivityQuery { days })
        .await
}

/// Fetch detected anomalies.
pub async fn anomalies(dispatcher: &Dispatcher) -> Result<Vec<Anomaly>> {
    dispatcher.get(ANOMALIES).await
}

/// Fetch natural-language usage insights.
pub async fn usage_insights(dispatcher: &Dispatcher) -> Result<Insights> {
    dispatcher.get(USAGE_INSIGHTS).await
}

/// Fetch pre-aggregated chart statistics.
pub async fn chart_data(dispatcher: &Dispatcher) -> Result<ChartData> {
    dispatcher.get(CHART_DATA).await
}
