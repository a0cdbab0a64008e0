use crate::analytics::ingestion::{CycleOutcome, IngestionPipeline};
use crate::client::StatsClient;
use crate::configs::dashboard::{DashboardConfig, PollingConfig};
use crate::error::DashboardError;
use crate::plot::ChartPlotter;
use chrono::Utc;
use human_repr::HumanDuration;
use std::sync::Arc;
use std::time::Instant;
use swarm_dashboard_charts::run_state::RunState;
use swarm_dashboard_charts::store::TimeSeriesStore;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Drives the ingestion pipeline on a fixed period until interrupted or out of cycles.
pub struct DashboardRunner {
    pipeline: IngestionPipeline,
    plotter: Option<ChartPlotter>,
    polling: PollingConfig,
}

impl DashboardRunner {
    pub fn new(config: &DashboardConfig, client: Arc<dyn StatsClient>) -> Self {
        let store = TimeSeriesStore::new(&config.charts.percentiles);
        Self {
            pipeline: IngestionPipeline::new(client, store, RunState::default()),
            plotter: ChartPlotter::new(&config.renderer, &config.charts),
            polling: config.polling.clone(),
        }
    }

    pub fn pipeline(&self) -> &IngestionPipeline {
        &self.pipeline
    }

    pub async fn run(&mut self) -> Result<(), DashboardError> {
        let period = self.polling.interval.get_duration();
        match &self.plotter {
            Some(plotter) => info!(
                "Polling stats every {}, rendering charts to: {}",
                self.polling.interval,
                plotter.output_dir().display()
            ),
            None => info!("Polling stats every {}, chart rendering is disabled.", self.polling.interval),
        }

        if let Some(plotter) = &self.plotter {
            plotter.prepare()?;
        }

        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        let started = Instant::now();
        let mut cycles = 0u64;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.poll_once().await;
                    cycles += 1;
                    if self.polling.max_cycles > 0 && cycles >= self.polling.max_cycles {
                        info!("Reached {cycles} polling cycles, stopping.");
                        break;
                    }
                }
                _ = &mut shutdown => {
                    info!("Received Ctrl+C, stopping.");
                    break;
                }
            }
        }

        if let Some(plotter) = &self.plotter {
            match plotter.plot(self.pipeline.store(), Utc::now()) {
                Ok(panels) => info!("Rendered {panels} final charts."),
                Err(error) => error!("Failed to render final charts: {error}"),
            }
        }
        info!(
            "Dashboard ran {cycles} polling cycles in {}",
            started.elapsed().human_duration()
        );
        self.pipeline.store().print_summary();
        if let Some(summary) = self.pipeline.latest_summary() {
            info!("Last swarm status: {summary}");
        }
        Ok(())
    }

    /// One polling period: a full ingestion cycle while the swarm is active, otherwise a
    /// run state check. Charts are re-rendered after every appended tick; render failures
    /// are logged and never stop polling.
    pub async fn poll_once(&mut self) {
        if !self.pipeline.should_poll() {
            if let Some(state) = self.pipeline.check_run_state().await {
                debug!("Polling suspended, swarm is: {state}");
            }
            return;
        }

        let now = Utc::now();
        if let CycleOutcome::Appended { keys, new_run } = self.pipeline.run_cycle(now).await {
            debug!("Appended tick with {keys} metrics, new run: {new_run}");
            if let Some(summary) = self.pipeline.latest_summary() {
                info!("{summary}");
            }
            if let Some(plotter) = &self.plotter {
                if let Err(error) = plotter.plot(self.pipeline.store(), now) {
                    error!("Failed to render charts, polling continues: {error}");
                }
            }
        }
    }
}
