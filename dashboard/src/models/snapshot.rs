use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use swarm_dashboard_charts::run_state::RunState;

/// Stats snapshot reported by the load test while it runs.
///
/// Numeric fields are kept as raw JSON values; the normalizer decides how bad or missing
/// values degrade.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// The run state of the swarm.
    #[serde(default, deserialize_with = "lenient_state")]
    pub state: RunState,
    /// Aggregate requests per second.
    #[serde(default)]
    pub total_rps: Value,
    /// Aggregate failures per second.
    #[serde(default)]
    pub total_fail_per_sec: Value,
    /// Failure ratio, 0 to 1.
    #[serde(default)]
    pub fail_ratio: Value,
    /// Average response time in milliseconds.
    #[serde(default)]
    pub total_avg_response_time: Value,
    /// The number of simulated users.
    #[serde(default)]
    pub user_count: Value,
    /// Response time percentile series name to value.
    #[serde(default, deserialize_with = "lenient_map")]
    pub current_response_time_percentiles: Map<String, Value>,
    /// User defined metrics; only numeric entries are charted.
    #[serde(default, deserialize_with = "lenient_map")]
    pub custom_metrics: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub workers: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub errors: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub extended_stats: Vec<Value>,
}

/// Anything but a known state string decodes as the default state.
fn lenient_state<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RunState, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// `null` or a non-object decodes as an empty map.
fn lenient_map<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Map<String, Value>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

/// `null` or a non-array decodes as an empty list.
fn lenient_vec<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(values) => Ok(values),
        _ => Ok(Vec::new()),
    }
}

/// Latest swarm figures outside of the charted series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SwarmSummary {
    pub state: RunState,
    pub total_rps: f64,
    /// Failure ratio as a whole percentage.
    pub fail_ratio: f64,
    pub user_count: f64,
    pub workers: usize,
    pub errors: usize,
    pub custom_metrics: Map<String, Value>,
}

impl Display for SwarmSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "state: {}, users: {}, RPS: {}, failures: {}%, workers: {}, errors: {}",
            self.state, self.user_count, self.total_rps, self.fail_ratio, self.workers, self.errors
        )
    }
}
