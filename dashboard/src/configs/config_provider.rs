use super::dashboard::DashboardConfig;
use super::defaults::ENV_PREFIX;
use crate::error::DashboardError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;
use tracing::{info, warn};

pub trait ConfigProvider {
    fn load_config(&self) -> Result<DashboardConfig, DashboardError>;
}

/// Built-in defaults, overridden by an optional TOML file, overridden by
/// `SWARM_DASHBOARD_*` environment variables (`__` separates nested keys).
#[derive(Debug)]
pub struct FileConfigProvider {
    path: String,
}

impl FileConfigProvider {
    pub fn new(path: String) -> Self {
        Self { path }
    }

    fn figment(&self) -> Figment {
        let figment = Figment::from(Serialized::defaults(DashboardConfig::default()));
        let figment = if Path::new(&self.path).exists() {
            info!("Loading config from path: '{}'...", self.path);
            figment.merge(Toml::file(&self.path))
        } else {
            warn!(
                "Config file: '{}' does not exist, using default values.",
                self.path
            );
            figment
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

impl ConfigProvider for FileConfigProvider {
    fn load_config(&self) -> Result<DashboardConfig, DashboardError> {
        let config: DashboardConfig = self.figment().extract().map_err(Box::new)?;
        info!("Config loaded from path: '{}'", self.path);
        Ok(config)
    }
}
