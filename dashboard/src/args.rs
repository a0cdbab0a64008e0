use crate::configs::dashboard::DashboardConfig;
use crate::configs::defaults::DEFAULT_CONFIG_PATH;
use crate::utils::duration::HumanDuration;
use clap::Parser;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct DashboardArgs {
    /// Path to the TOML configuration file, missing file falls back to defaults
    #[arg(long, short = 'c', default_value_t = DEFAULT_CONFIG_PATH.to_owned())]
    pub config: String,

    /// Base URL of the load generator web API, overrides `source.api_url`
    #[arg(long, short = 'u')]
    pub api_url: Option<String>,

    /// Polling period (e.g. 2s, 500ms), overrides `polling.interval`
    #[arg(long, short = 'i', value_parser = HumanDuration::from_str)]
    pub interval: Option<HumanDuration>,

    /// Stop after this many polling periods, overrides `polling.max_cycles`
    #[arg(long, short = 'm')]
    pub max_cycles: Option<u64>,

    /// Directory to render chart files into, overrides `renderer.output_dir`
    #[arg(long, short = 'o')]
    pub output_dir: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, short = 'l', default_value = "info")]
    pub log_level: String,

    /// Print the effective configuration as TOML and exit
    #[arg(long, default_value_t = false)]
    pub print_config: bool,
}

impl DashboardArgs {
    /// Command line flags take precedence over file and environment configuration.
    pub fn apply_overrides(&self, config: &mut DashboardConfig) {
        if let Some(api_url) = &self.api_url {
            config.source.api_url = api_url.clone();
        }
        if let Some(interval) = self.interval {
            config.polling.interval = interval;
        }
        if let Some(max_cycles) = self.max_cycles {
            config.polling.max_cycles = max_cycles;
        }
        if let Some(output_dir) = &self.output_dir {
            config.renderer.output_dir = Some(output_dir.clone());
        }
    }
}
