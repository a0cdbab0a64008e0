use super::StatsClient;
use crate::configs::dashboard::SourceConfig;
use crate::error::DashboardError;
use crate::models::snapshot::StatsSnapshot;
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

/// Fetches stats snapshots from the load test's web API.
#[derive(Debug)]
pub struct HttpStatsClient {
    stats_url: Url,
    client: reqwest::Client,
}

impl HttpStatsClient {
    pub fn create(config: &SourceConfig) -> Result<Self, DashboardError> {
        let api_url = Url::parse(&config.api_url)
            .map_err(|_| DashboardError::CannotParseUrl(config.api_url.clone()))?;
        let stats_url = api_url
            .join(&config.stats_path)
            .map_err(|_| DashboardError::CannotParseUrl(config.stats_path.clone()))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { stats_url, client })
    }

    pub fn stats_url(&self) -> &Url {
        &self.stats_url
    }
}

#[async_trait]
impl StatsClient for HttpStatsClient {
    async fn get_stats(&self) -> Result<Option<StatsSnapshot>, DashboardError> {
        let response = self.client.get(self.stats_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::InvalidResponse(status.as_u16()));
        }

        let body = response.text().await?;
        parse_snapshot(&body)
    }
}

/// An empty or `null` body means there are no stats yet.
fn parse_snapshot(body: &str) -> Result<Option<StatsSnapshot>, DashboardError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(None);
    }

    let snapshot: Option<StatsSnapshot> = serde_json::from_str(body)?;
    Ok(snapshot)
}
