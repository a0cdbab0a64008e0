pub mod config_provider;
pub mod dashboard;
pub mod defaults;
pub mod validators;
