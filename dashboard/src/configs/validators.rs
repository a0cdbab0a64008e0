use super::dashboard::{ChartsConfig, DashboardConfig, PollingConfig, RendererConfig};
use crate::error::DashboardError;
use tracing::error;

pub trait Validatable<E> {
    fn validate(&self) -> Result<(), E>;
}

impl Validatable<DashboardError> for DashboardConfig {
    fn validate(&self) -> Result<(), DashboardError> {
        self.polling.validate()?;
        self.charts.validate()?;
        self.renderer.validate()?;

        Ok(())
    }
}

impl Validatable<DashboardError> for PollingConfig {
    fn validate(&self) -> Result<(), DashboardError> {
        if self.interval.is_zero() {
            error!("Polling configuration -> interval must be greater than zero.");
            return Err(DashboardError::InvalidConfiguration(
                "polling interval must be greater than zero".to_owned(),
            ));
        }

        Ok(())
    }
}

impl Validatable<DashboardError> for ChartsConfig {
    fn validate(&self) -> Result<(), DashboardError> {
        if let Some(percentile) = self
            .percentiles
            .iter()
            .find(|p| !(**p > 0.0 && **p <= 1.0))
        {
            error!("Charts configuration -> percentile {percentile} is outside of (0, 1].");
            return Err(DashboardError::InvalidConfiguration(format!(
                "invalid percentile: {percentile}"
            )));
        }

        for panel in &self.panels {
            if panel.lines.is_empty() {
                error!("Charts configuration -> panel '{}' has no lines.", panel.title);
                return Err(DashboardError::InvalidConfiguration(format!(
                    "panel '{}' has no lines",
                    panel.title
                )));
            }
            if panel.colors.is_empty() {
                error!("Charts configuration -> panel '{}' has no colors.", panel.title);
                return Err(DashboardError::InvalidConfiguration(format!(
                    "panel '{}' has no colors",
                    panel.title
                )));
            }
        }

        Ok(())
    }
}

impl Validatable<DashboardError> for RendererConfig {
    fn validate(&self) -> Result<(), DashboardError> {
        if self.width == 0 || self.height == 0 {
            error!("Renderer configuration -> chart size cannot be zero.");
            return Err(DashboardError::InvalidConfiguration(
                "chart width and height must be greater than zero".to_owned(),
            ));
        }

        Ok(())
    }
}
