use crate::error::DashboardError;
use crate::models::snapshot::StatsSnapshot;
use async_trait::async_trait;

pub mod http;

/// Source of stats snapshots.
#[async_trait]
pub trait StatsClient: Send + Sync {
    /// Fetches the latest snapshot. `Ok(None)` means the endpoint had no stats to report yet.
    async fn get_stats(&self) -> Result<Option<StatsSnapshot>, DashboardError>;
}
