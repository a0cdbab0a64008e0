use super::metric_key::{
    MetricKey, CURRENT_FAIL_PER_SEC, CURRENT_RPS, TOTAL_AVG_RESPONSE_TIME, USER_COUNT,
};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const CUSTOM_METRICS_TITLE: &str = "Custom Metrics";
const CUSTOM_METRICS_COLORS: [&str; 6] = [
    "#00ca5a", "#ff6d6d", "#ff9f00", "#9966cc", "#0099ff", "#8a2be2",
];

/// Legend name of a percentile line, e.g. `95th percentile`, rounded to two decimals of a
/// percent.
fn percentile_label(percentile: f64) -> String {
    let percent = (percentile * 10_000.0).round() / 100.0;
    format!("{percent}th percentile")
}

/// One line of a chart panel: which series to draw and how it is named in the legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct LineDefinition {
    #[new(into)]
    pub key: MetricKey,
    #[new(into)]
    pub name: String,
}

/// Axis label(s), either one label or one per axis when the axis is split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YAxisLabels {
    Single(String),
    Many(Vec<String>),
}

/// How tooltip values are printed when the panel overrides the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueFormat {
    Fixed { decimals: usize },
    Milliseconds,
    Percent,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Fixed { decimals } => format!("{:.*}", *decimals, value),
            ValueFormat::Milliseconds => format!("{value} ms"),
            ValueFormat::Percent => format!("{value}%"),
        }
    }
}

/// Configuration of one chart panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDisplayConfig {
    pub title: String,
    pub lines: Vec<LineDefinition>,
    pub colors: Vec<String>,
    #[serde(default)]
    pub value_format: Option<ValueFormat>,
    #[serde(default)]
    pub split_axis: bool,
    #[serde(default)]
    pub y_axis_labels: Option<YAxisLabels>,
    #[serde(default)]
    pub scatterplot: bool,
}

impl ChartDisplayConfig {
    pub fn new(title: &str, lines: Vec<LineDefinition>, colors: &[&str]) -> Self {
        Self {
            title: title.to_owned(),
            lines,
            colors: colors.iter().map(|c| c.to_string()).collect(),
            value_format: None,
            split_axis: false,
            y_axis_labels: None,
            scatterplot: false,
        }
    }

    pub fn with_value_format(mut self, value_format: ValueFormat) -> Self {
        self.value_format = Some(value_format);
        self
    }

    pub fn with_split_axis(mut self, labels: Option<YAxisLabels>) -> Self {
        self.split_axis = true;
        self.y_axis_labels = labels;
        self
    }

    pub fn with_scatterplot(mut self) -> Self {
        self.scatterplot = true;
        self
    }

    /// The panels every dashboard shows: throughput, response times and users.
    pub fn default_panels(percentiles: &[f64]) -> Vec<ChartDisplayConfig> {
        let mut response_time_lines = percentiles
            .iter()
            .map(|p| {
                LineDefinition::new(
                    MetricKey::percentile(*p),
                    percentile_label(*p),
                )
            })
            .collect::<Vec<_>>();
        response_time_lines.push(LineDefinition::new(
            TOTAL_AVG_RESPONSE_TIME,
            "Average Response Time",
        ));

        vec![
            ChartDisplayConfig::new(
                "Total Requests per Second",
                vec![
                    LineDefinition::new(CURRENT_RPS, "RPS"),
                    LineDefinition::new(CURRENT_FAIL_PER_SEC, "Failures/s"),
                ],
                &["#00ca5a", "#ff6d6d"],
            ),
            ChartDisplayConfig::new(
                "Response Times (ms)",
                response_time_lines,
                &["#ff9f00", "#9966cc", "#8a2be2", "#8e44ad", "#ffaa00"],
            )
            .with_value_format(ValueFormat::Milliseconds),
            ChartDisplayConfig::new(
                "Number of Users",
                vec![LineDefinition::new(USER_COUNT, "Number of Users")],
                &["#0099ff"],
            ),
        ]
    }

    /// A panel charting every discovered custom metric, or `None` when there are none yet.
    pub fn custom_metrics_panel(keys: &BTreeSet<MetricKey>) -> Option<ChartDisplayConfig> {
        if keys.is_empty() {
            return None;
        }

        let lines = keys
            .iter()
            .map(|key| LineDefinition::new(key.clone(), key.as_str()))
            .collect();
        Some(ChartDisplayConfig::new(
            CUSTOM_METRICS_TITLE,
            lines,
            &CUSTOM_METRICS_COLORS,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_panels_should_chart_each_configured_percentile() {
        let panels = ChartDisplayConfig::default_panels(&[0.5, 0.95]);
        assert_eq!(panels.len(), 3);
        let response_times = &panels[1];
        assert_eq!(response_times.lines.len(), 3);
        assert_eq!(response_times.lines[1].name, "95th percentile");
        assert_eq!(
            response_times.lines[1].key,
            MetricKey::from("responseTimePercentile0.95")
        );
    }

    #[test]
    fn custom_metrics_panel_should_exist_only_once_keys_are_known() {
        let mut keys = BTreeSet::new();
        assert!(ChartDisplayConfig::custom_metrics_panel(&keys).is_none());
        keys.insert(MetricKey::from("cartSize"));
        let panel = ChartDisplayConfig::custom_metrics_panel(&keys).unwrap();
        assert_eq!(panel.lines, vec![LineDefinition::new("cartSize", "cartSize")]);
    }

    #[test]
    fn y_axis_labels_should_accept_single_or_list() {
        let single: YAxisLabels = serde_json::from_str("\"ms\"").unwrap();
        assert_eq!(single, YAxisLabels::Single("ms".to_owned()));
        let many: YAxisLabels = serde_json::from_str("[\"rps\", \"users\"]").unwrap();
        assert_eq!(
            many,
            YAxisLabels::Many(vec!["rps".to_owned(), "users".to_owned()])
        );
    }

    #[test]
    fn value_format_should_render_units() {
        assert_eq!(ValueFormat::Fixed { decimals: 1 }.format(2.345), "2.3");
        assert_eq!(ValueFormat::Milliseconds.format(120.5), "120.5 ms");
        assert_eq!(ValueFormat::Percent.format(3.0), "3%");
    }

    #[test]
    fn percentile_labels_should_not_show_float_noise() {
        assert_eq!(percentile_label(0.57), "57th percentile");
        assert_eq!(percentile_label(0.95), "95th percentile");
        assert_eq!(percentile_label(0.995), "99.5th percentile");
        let panels = ChartDisplayConfig::default_panels(&[0.57]);
        assert_eq!(panels[1].lines[0].name, "57th percentile");
    }
}
