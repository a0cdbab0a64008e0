use super::normalizer::{
    admit_custom_metric, numeric_or_zero, percentile_or_zero, round_to_decimal_places,
    rounded_or_zero,
};
use crate::client::StatsClient;
use crate::error::DashboardError;
use crate::models::snapshot::{StatsSnapshot, SwarmSummary};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use swarm_dashboard_charts::metric_key::{
    CURRENT_FAIL_PER_SEC, CURRENT_RPS, TOTAL_AVG_RESPONSE_TIME, USER_COUNT,
};
use swarm_dashboard_charts::run_state::RunState;
use swarm_dashboard_charts::store::TimeSeriesStore;
use swarm_dashboard_charts::tick::Tick;
use tracing::{debug, error, info};

const RATE_DECIMAL_PLACES: u32 = 2;
const CUSTOM_METRIC_DECIMAL_PLACES: u32 = 2;

/// What a single ingestion cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A tick was appended; `new_run` tells whether a gap and marker preceded it.
    Appended { keys: usize, new_run: bool },
    /// The endpoint answered without stats.
    NoStats,
    /// The snapshot reports a state outside spawning or running; its stats are not charted.
    Inactive,
    /// Both the fetch and its immediate retry failed.
    FetchFailed,
}

/// Turns stats snapshots into ticks on the time-series store and tracks run boundaries.
///
/// The pipeline is the only writer of the store.
pub struct IngestionPipeline {
    client: Arc<dyn StatsClient>,
    store: TimeSeriesStore,
    previous_run_state: RunState,
    pending_marker: bool,
    latest_summary: Option<SwarmSummary>,
}

impl IngestionPipeline {
    pub fn new(
        client: Arc<dyn StatsClient>,
        store: TimeSeriesStore,
        initial_run_state: RunState,
    ) -> Self {
        Self {
            client,
            store,
            previous_run_state: initial_run_state,
            pending_marker: false,
            latest_summary: None,
        }
    }

    /// Ingestion runs only while the swarm is spawning or running.
    pub fn should_poll(&self) -> bool {
        self.previous_run_state.is_active()
    }

    pub fn run_state(&self) -> RunState {
        self.previous_run_state
    }

    pub fn has_pending_marker(&self) -> bool {
        self.pending_marker
    }

    pub fn store(&self) -> &TimeSeriesStore {
        &self.store
    }

    pub fn latest_summary(&self) -> Option<&SwarmSummary> {
        self.latest_summary.as_ref()
    }

    /// Records a run state observation. A `stopped` → `running` change only arms the marker;
    /// it is written by the next cycle that has stats to append.
    pub fn observe_run_state(&mut self, state: RunState) {
        if RunState::starts_new_run(self.previous_run_state, state) {
            info!("Swarm went from {} to {state}, marking a new run.", self.previous_run_state);
            self.pending_marker = true;
        } else if state != self.previous_run_state {
            debug!("Swarm state changed: {} -> {state}", self.previous_run_state);
        }
        self.previous_run_state = state;
    }

    /// Fetches a snapshot, retrying once right away when the first attempt fails.
    pub async fn fetch_with_retry(&self) -> Result<Option<StatsSnapshot>, DashboardError> {
        match self.client.get_stats().await {
            Ok(snapshot) => Ok(snapshot),
            Err(error) => {
                error!("Error fetching stats: {error}");
                self.client.get_stats().await.inspect_err(|error| {
                    error!("Forced stats refetch failed: {error}");
                })
            }
        }
    }

    /// One polling cycle: fetch, detect run boundaries, normalize and append. Never fails;
    /// fetch errors are logged and the cycle is dropped.
    pub async fn run_cycle(&mut self, now: DateTime<Utc>) -> CycleOutcome {
        let snapshot = match self.fetch_with_retry().await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!("Stats endpoint returned no data.");
                return CycleOutcome::NoStats;
            }
            Err(_) => return CycleOutcome::FetchFailed,
        };

        self.observe_run_state(snapshot.state);
        self.latest_summary = Some(summarize(&snapshot));
        if !snapshot.state.is_active() {
            debug!("Swarm is {}, skipping its stats.", snapshot.state);
            return CycleOutcome::Inactive;
        }

        let new_run = if self.pending_marker {
            self.pending_marker = false;
            let marker = *self.store.start_new_run(now);
            info!(
                "Marked start of run #{} at {}",
                self.store.markers().len(),
                marker.at
            );
            true
        } else {
            false
        };

        let tick = build_tick(&snapshot);
        self.store.append_tick(&tick, now);

        CycleOutcome::Appended {
            keys: tick.len(),
            new_run,
        }
    }

    /// Fetch used while ingestion is suspended: only the run state is taken from it.
    pub async fn check_run_state(&mut self) -> Option<RunState> {
        match self.fetch_with_retry().await {
            Ok(Some(snapshot)) => {
                self.observe_run_state(snapshot.state);
                Some(snapshot.state)
            }
            Ok(None) | Err(_) => None,
        }
    }
}

/// Normalizes every charted field of the snapshot into one tick.
pub fn build_tick(snapshot: &StatsSnapshot) -> Tick {
    let mut tick = Tick::new();
    for (key, value) in &snapshot.current_response_time_percentiles {
        tick.insert(key.as_str(), percentile_or_zero(value));
    }
    tick.insert(
        CURRENT_RPS,
        rounded_or_zero(&snapshot.total_rps, RATE_DECIMAL_PLACES),
    );
    tick.insert(
        CURRENT_FAIL_PER_SEC,
        rounded_or_zero(&snapshot.total_fail_per_sec, RATE_DECIMAL_PLACES),
    );
    tick.insert(
        TOTAL_AVG_RESPONSE_TIME,
        rounded_or_zero(&snapshot.total_avg_response_time, RATE_DECIMAL_PLACES),
    );
    tick.insert(USER_COUNT, numeric_or_zero(&snapshot.user_count));

    for (key, value) in &snapshot.custom_metrics {
        match admit_custom_metric(value, CUSTOM_METRIC_DECIMAL_PLACES) {
            Some(value) => tick.insert_custom(key.as_str(), value),
            None => debug!("Skipping non-numeric custom metric: {key} = {value}"),
        }
    }
    tick
}

fn summarize(snapshot: &StatsSnapshot) -> SwarmSummary {
    SwarmSummary {
        state: snapshot.state,
        total_rps: rounded_or_zero(&snapshot.total_rps, RATE_DECIMAL_PLACES),
        fail_ratio: round_to_decimal_places(numeric_or_zero(&snapshot.fail_ratio) * 100.0, 0),
        user_count: numeric_or_zero(&snapshot.user_count),
        workers: snapshot.workers.len(),
        errors: snapshot.errors.len(),
        custom_metrics: snapshot.custom_metrics.clone(),
    }
}
