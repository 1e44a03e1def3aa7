//! Chart data command implementation.

use anyhow::{Context, Result};

use vantage_http::endpoints;

use crate::cli::Cli;
use crate::output;
use crate::session;

pub async fn run(cli: &Cli) -> Result<()> {
    let controller = session::connect(&cli.api)?;
    let chart = endpoints::chart_data(controller.dispatcher())
        .await
        .context("Failed to fetch chart data")?;

    if cli.json {
        return output::json_pretty(&chart);
    }

    output::heading("Feature z-scores");
    for score in &chart.feature_z_scores {
        output::z_score_row(score);
    }

    println!();
    output::heading("Z-score distribution");
    for bucket in &chart.z_distribution {
        println!("  {}: {}", bucket.bucket, bucket.count);
    }

    println!();
    output::field("Anomaly threshold", &format!("{:.2}", chart.threshold));
    output::field(
        "Event count mean/std",
        &format!("{:.1} / {:.1}", chart.mean_event_count, chart.std_event_count),
    );
    output::field(
        "Session mean/std",
        &format!("{:.1} / {:.1}", chart.mean_session, chart.std_session),
    );
    output::field(
        "DAU mean/std",
        &format!("{:.1} / {:.1}", chart.mean_dau, chart.std_dau),
    );

    Ok(())
}
