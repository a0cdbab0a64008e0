use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

pub const CURRENT_RPS: &str = "currentRps";
pub const CURRENT_FAIL_PER_SEC: &str = "currentFailPerSec";
pub const TOTAL_AVG_RESPONSE_TIME: &str = "totalAvgResponseTime";
pub const USER_COUNT: &str = "userCount";

const PERCENTILE_PREFIX: &str = "responseTimePercentile";

/// Identifier of one logical metric, e.g. `currentRps` or `responseTimePercentile0.95`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MetricKey(String);

impl MetricKey {
    /// Key of the response time percentile series, `0.95` → `responseTimePercentile0.95`.
    pub fn percentile(percentile: f64) -> Self {
        Self(format!("{PERCENTILE_PREFIX}{percentile}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_percentile(&self) -> bool {
        self.0.starts_with(PERCENTILE_PREFIX)
    }

    /// Keys that are always charted, regardless of what the snapshots report.
    pub fn builtin(percentiles: &[f64]) -> Vec<MetricKey> {
        let mut keys = percentiles
            .iter()
            .map(|p| MetricKey::percentile(*p))
            .collect::<Vec<_>>();
        keys.extend(
            [
                CURRENT_RPS,
                CURRENT_FAIL_PER_SEC,
                TOTAL_AVG_RESPONSE_TIME,
                USER_COUNT,
            ]
            .map(MetricKey::from),
        );
        keys
    }
}

impl From<&str> for MetricKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl Borrow<str> for MetricKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
