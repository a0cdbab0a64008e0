use crate::types::metric_key::MetricKey;
use crate::types::store::TimeSeriesStore;
use crate::types::time_series::TimeSeries;
use colored::{Color, ColoredString, Colorize};
use human_repr::HumanCount;
use tracing::info;

impl TimeSeriesStore {
    pub fn print_summary(&self) {
        let samples: usize = self
            .known_keys()
            .filter_map(|key| self.series(key.as_str()))
            .map(TimeSeries::len)
            .sum();
        let summary_print = format!(
            "Session: {} series ({} custom), {} samples, {} runs marked\n",
            self.known_keys().count(),
            self.custom_keys().len(),
            (samples as u64).human_count_bare(),
            self.markers().len(),
        )
        .blue();

        info!("{}", summary_print);

        for key in self.known_keys() {
            if let Some(series) = self.series(key.as_str()) {
                info!("{}", series.formatted_string(key, self.custom_keys().contains(key)));
            }
        }
    }
}

impl TimeSeries {
    pub fn formatted_string(&self, key: &MetricKey, custom: bool) -> ColoredString {
        let (prefix, color) = if custom {
            ("Custom", Color::Magenta)
        } else if key.is_percentile() {
            ("Percentile", Color::Yellow)
        } else {
            ("Core", Color::Green)
        };

        let last = self
            .last_value()
            .map(|value| format!("{value:.2}"))
            .unwrap_or_else(|| "-".to_owned());

        format!(
            "{prefix} {key}: {} samples, {} gaps, last value: {last}",
            self.len(),
            self.gaps(),
        )
        .color(color)
    }
}
