use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Cannot parse URL: {0}")]
    CannotParseUrl(String),
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Invalid response status: {0}")]
    InvalidResponse(u16),
    #[error("Cannot parse stats snapshot: {0}")]
    CannotParseSnapshot(#[from] serde_json::Error),
    #[error("Cannot load configuration: {0}")]
    CannotLoadConfig(#[from] Box<figment::Error>),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Cannot serialize configuration: {0}")]
    CannotSerializeConfig(#[from] toml::ser::Error),
    #[error("Cannot write to file: {0}")]
    CannotWriteToFile(#[from] std::io::Error),
    #[error("Cannot render chart: {0}")]
    CannotRenderChart(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_should_keep_their_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
        assert_eq!(
            DashboardError::from(io).to_string(),
            "Cannot write to file: no such directory"
        );
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(DashboardError::from(json)
            .to_string()
            .starts_with("Cannot parse stats snapshot: EOF"));
    }
}
