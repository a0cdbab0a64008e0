pub mod display_config;
pub mod marker;
pub mod metric_key;
pub mod run_state;
pub mod store;
pub mod tick;
pub mod time_series;
