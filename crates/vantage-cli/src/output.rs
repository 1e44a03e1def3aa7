//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use vantage_core::{Anomaly, FeatureUsage, FeatureZScore, UserActivity};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a section heading.
pub fn heading(msg: &str) {
    println!("{}", msg.bold());
}

/// Print an insight bullet.
pub fn bullet(msg: &str) {
    println!("  - {}", msg);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Label a feature by name, falling back to its id.
fn feature_label(id: i64, name: Option<&str>) -> String {
    match name {
        Some(name) => name.to_string(),
        None => format!("feature #{}", id),
    }
}

/// Print a per-feature usage row.
pub fn feature_row(feature: &FeatureUsage) {
    println!(
        "  {}: {} events, {} daily active users, {:.1}s avg session",
        feature_label(feature.feature_id, feature.feature_name.as_deref()),
        feature.event_count,
        feature.daily_active_users,
        feature.avg_session_duration
    );
}

/// Print a per-user activity row.
pub fn activity_row(row: &UserActivity) {
    let who = match row.email.as_deref() {
        Some(email) => email.to_string(),
        None => format!("user #{}", row.user_id),
    };
    println!(
        "  {}: {} events, {:.1}s avg session",
        who, row.event_count, row.avg_session_duration
    );
}

/// Print a detected anomaly row.
pub fn anomaly_row(anomaly: &Anomaly) {
    println!(
        "  {} (score {:.2})",
        feature_label(anomaly.feature_id, anomaly.feature_name.as_deref()),
        anomaly.score
    );
}

/// Print a per-feature z-score row.
pub fn z_score_row(score: &FeatureZScore) {
    let marker = if score.is_anomaly { " [anomaly]" } else { "" };
    println!(
        "  {}: norm {:.2} (events {:.2}, session {:.2}, dau {:.2}){}",
        score.feature_name,
        score.norm_score,
        score.z_event_count,
        score.z_avg_session,
        score.z_dau,
        marker
    );
}
