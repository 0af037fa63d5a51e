//! API availability probe.

use std::time::Duration;

use tracing::{debug, info};
use tubetrend_client::TubularClient;

use crate::error::PipelineResult;

/// Sample the concurrency allowance twice, `interval` apart.
///
/// The API counts as available only if both samples have capacity left.
pub async fn probe_availability(client: &TubularClient, interval: Duration) -> PipelineResult<bool> {
    let first = client.rate_limit_details().await?;
    debug!(remaining = first.concurrency_remaining, "First availability sample");

    tokio::time::sleep(interval).await;

    let second = client.rate_limit_details().await?;
    debug!(remaining = second.concurrency_remaining, "Second availability sample");

    let available = first.concurrency_remaining > 0 && second.concurrency_remaining > 0;
    info!(available, "API availability probed");
    Ok(available)
}
