use super::defaults::*;
use crate::utils::duration::HumanDuration;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use swarm_dashboard_charts::display_config::ChartDisplayConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardConfig {
    pub source: SourceConfig,
    pub polling: PollingConfig,
    pub charts: ChartsConfig,
    pub renderer: RendererConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub api_url: String,
    pub stats_path: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollingConfig {
    pub interval: HumanDuration,
    /// Stop after this many polling periods, 0 runs until interrupted.
    pub max_cycles: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartsConfig {
    pub percentiles: Vec<f64>,
    /// Panels to render; the built-in panels are used when empty.
    pub panels: Vec<ChartDisplayConfig>,
    pub custom_metrics_panel: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    pub output_dir: Option<String>,
    pub width: u64,
    pub height: u64,
    pub dark: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            stats_path: DEFAULT_STATS_PATH.to_owned(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: HumanDuration::from_str(DEFAULT_POLLING_INTERVAL).unwrap_or_default(),
            max_cycles: 0,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            percentiles: DEFAULT_PERCENTILES.to_vec(),
            panels: Vec::new(),
            custom_metrics_panel: DEFAULT_CUSTOM_METRICS_PANEL,
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            dark: DEFAULT_DARK_THEME,
        }
    }
}

impl ChartsConfig {
    pub fn panels(&self) -> Vec<ChartDisplayConfig> {
        if self.panels.is_empty() {
            ChartDisplayConfig::default_panels(&self.percentiles)
        } else {
            self.panels.clone()
        }
    }
}
