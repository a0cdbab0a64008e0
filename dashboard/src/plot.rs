use crate::configs::dashboard::{ChartsConfig, RendererConfig};
use crate::error::DashboardError;
use charming::theme::Theme;
use charming::HtmlRenderer;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::Instant;
use swarm_dashboard_charts::display_config::ChartDisplayConfig;
use swarm_dashboard_charts::plotting::export::file_stem;
use swarm_dashboard_charts::store::TimeSeriesStore;
use swarm_dashboard_charts::LiveChart;
use tracing::{debug, error};

/// Renders every dashboard panel from the store into `<panel>.json` and `<panel>.html` files.
pub struct ChartPlotter {
    output_dir: PathBuf,
    width: u64,
    height: u64,
    dark: bool,
    panels: Vec<ChartDisplayConfig>,
    custom_metrics_panel: bool,
}

impl ChartPlotter {
    /// `None` when no output directory is configured.
    pub fn new(renderer: &RendererConfig, charts: &ChartsConfig) -> Option<Self> {
        let output_dir = renderer.output_dir.as_ref()?;
        Some(Self {
            output_dir: PathBuf::from(output_dir),
            width: renderer.width,
            height: renderer.height,
            dark: renderer.dark,
            panels: charts.panels(),
            custom_metrics_panel: charts.custom_metrics_panel,
        })
    }

    /// Creates the output directory, failing when it cannot be used.
    pub fn prepare(&self) -> Result<(), DashboardError> {
        std::fs::create_dir_all(&self.output_dir).inspect_err(|e| {
            error!(
                "Cannot use chart output directory: {}, {e}",
                self.output_dir.display()
            );
        })?;
        Ok(())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Panels for the current store: the configured ones plus, once custom metrics exist,
    /// the custom metrics panel.
    pub fn panels(&self, store: &TimeSeriesStore) -> Vec<ChartDisplayConfig> {
        let mut panels = self.panels.clone();
        if self.custom_metrics_panel {
            panels.extend(ChartDisplayConfig::custom_metrics_panel(store.custom_keys()));
        }
        panels
    }

    /// Rebuilds every panel from the store and overwrites its files. Returns the number of
    /// panels written.
    pub fn plot(&self, store: &TimeSeriesStore, now: DateTime<Utc>) -> Result<usize, DashboardError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let snapshot = store.snapshot();
        let panels = self.panels(store);
        for panel in &panels {
            let build_start = Instant::now();
            let chart = LiveChart::build(&snapshot, panel, now);
            let build_time = build_start.elapsed();

            let render_start = Instant::now();
            let stem = file_stem(&panel.title);
            self.save_chart(&chart, &stem).inspect_err(|e| {
                error!("Failed to save {} chart: {e}", panel.title);
            })?;
            debug!(
                "Generated {} chart at: {} (build: {:.2?}, render: {:.2?})",
                panel.title,
                self.output_dir.join(format!("{stem}.html")).display(),
                build_time,
                render_start.elapsed()
            );
        }
        Ok(panels.len())
    }

    fn save_chart(&self, chart: &LiveChart, file_name: &str) -> Result<(), DashboardError> {
        let json = serde_json::to_string_pretty(&chart.inner)?;
        std::fs::write(self.output_dir.join(format!("{file_name}.json")), json)?;

        let theme = if self.dark { Theme::Dark } else { Theme::Default };
        let mut renderer = HtmlRenderer::new(chart.export_name.as_str(), self.width, self.height)
            .theme(theme);
        renderer
            .save(&chart.inner, self.output_dir.join(format!("{file_name}.html")))
            .map_err(|e| DashboardError::CannotRenderChart(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use swarm_dashboard_charts::metric_key::CURRENT_RPS;
    use swarm_dashboard_charts::tick::Tick;

    fn plotter(output_dir: &Path) -> ChartPlotter {
        let renderer = RendererConfig {
            output_dir: Some(output_dir.to_string_lossy().to_string()),
            ..Default::default()
        };
        ChartPlotter::new(&renderer, &ChartsConfig::default()).unwrap()
    }

    #[test]
    fn plotter_should_be_disabled_without_output_dir() {
        assert!(ChartPlotter::new(&RendererConfig::default(), &ChartsConfig::default()).is_none());
    }

    #[test]
    fn custom_metrics_panel_should_appear_once_discovered() {
        let dir = tempfile::tempdir().unwrap();
        let plotter = plotter(dir.path());
        let mut store = TimeSeriesStore::new(&[0.95]);
        assert_eq!(plotter.panels(&store).len(), 3);

        let mut tick = Tick::new();
        tick.insert_custom("cartSize", 3.0);
        store.append_tick(&tick, Utc::now());

        let panels = plotter.panels(&store);
        assert_eq!(panels.len(), 4);
        assert_eq!(panels[3].lines[0].key.as_str(), "cartSize");
    }

    #[test]
    fn plot_should_write_json_and_html_per_panel() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("charts");
        let plotter = plotter(&output_dir);
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut store = TimeSeriesStore::new(&[0.95]);
        let mut tick = Tick::new();
        tick.insert(CURRENT_RPS, 5.12);
        store.append_tick(&tick, now);

        let written = plotter.plot(&store, now).unwrap();

        assert_eq!(written, 3);
        let json = std::fs::read_to_string(output_dir.join("total_requests_per_second.json")).unwrap();
        let chart: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(chart["series"][0]["data"][0][1], 5.12);
        assert!(output_dir.join("number_of_users.html").exists());
        assert!(output_dir.join("response_times_(ms).html").exists());
    }
}
