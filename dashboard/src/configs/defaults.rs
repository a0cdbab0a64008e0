pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8089";
pub const DEFAULT_STATS_PATH: &str = "/stats/requests";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_POLLING_INTERVAL: &str = "2s";
pub const DEFAULT_PERCENTILES: [f64; 2] = [0.5, 0.95];
pub const DEFAULT_CUSTOM_METRICS_PANEL: bool = true;
pub const DEFAULT_CHART_WIDTH: u64 = 1600;
pub const DEFAULT_CHART_HEIGHT: u64 = 600;
pub const DEFAULT_DARK_THEME: bool = true;
pub const DEFAULT_CONFIG_PATH: &str = "configs/dashboard.toml";
pub const ENV_PREFIX: &str = "SWARM_DASHBOARD_";
