pub mod axis;
pub mod chart;
pub mod export;
pub mod markers;
pub mod tooltip;
pub mod zoom;
