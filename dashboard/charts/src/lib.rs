mod prints;

pub mod plotting;
pub mod types;

pub use plotting::chart::LiveChart;
pub use types::*;
