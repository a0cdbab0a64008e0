use super::axis::{time_axis, value_axes};
use super::export::export_file_name;
use super::markers::mark_line;
use super::tooltip::{format_tooltip, tooltip_formatter, TooltipEntry};
use super::zoom::{SliderState, ZoomEvent};
use crate::types::display_config::{ChartDisplayConfig, LineDefinition, ValueFormat};
use crate::types::store::StoreSnapshot;
use charming::{
    component::{
        Axis, Feature, Grid, Legend, LegendType, SaveAsImage, Title, Toolbox, ToolboxDataZoom,
    },
    datatype::CompositeValue,
    element::{Color, Formatter, Orient, Tooltip, Trigger},
    series::{Line, Scatter},
    Chart,
};
use chrono::{DateTime, Utc};

const SYMBOL_SIZE: f64 = 4.0;
const RUN_MARKERS_SERIES: &str = "Runs";

/// Declarative chart for one dashboard panel, together with the pieces the renderer calls
/// back into: tooltip formatting and zoom handling.
pub struct LiveChart {
    pub inner: Chart,
    pub export_name: String,
    value_format: Option<ValueFormat>,
    slider: SliderState,
}

impl LiveChart {
    /// Builds the chart for `config` from the current store contents. `now` is used as the
    /// time axis start of an empty store and as the export timestamp.
    pub fn build(
        snapshot: &StoreSnapshot<'_>,
        config: &ChartDisplayConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let export_name = export_file_name(&config.title, now);
        let slider = SliderState::default();
        let chart = Chart::new()
            .title(Title::new().text(config.title.as_str()).left("center").top("0"))
            .tooltip(
                Tooltip::new()
                    .trigger(Trigger::Axis)
                    .formatter(Formatter::Function(tooltip_formatter(
                        config.value_format.as_ref(),
                    ))),
            )
            .legend(
                Legend::new()
                    .type_(LegendType::Scroll)
                    .orient(Orient::Horizontal)
                    .top("25"),
            )
            .grid(Grid::new().left("10%").right("5%").top("60").bottom("10%"))
            .x_axis(time_axis(snapshot.earliest_time, now))
            .color(
                config
                    .colors
                    .iter()
                    .map(|color| Color::from(color.as_str()))
                    .collect(),
            )
            .toolbox(
                Toolbox::new().feature(
                    Feature::new()
                        .data_zoom(ToolboxDataZoom::new())
                        .save_as_image(SaveAsImage::new().name(export_name.as_str())),
                ),
            )
            .data_zoom(slider.data_zoom());

        let axes = value_axes(config.split_axis, config.y_axis_labels.as_ref());
        let split = axes.len() > 1;
        let chart = axes
            .iter()
            .fold(chart, |chart, axis| chart.y_axis(Axis::from(axis)));
        let chart = Self::add_series(chart, snapshot, config, split);

        Self {
            inner: chart,
            export_name,
            value_format: config.value_format,
            slider,
        }
    }

    /// With a split axis every line after the first is drawn against the second axis.
    fn add_series(
        chart: Chart,
        snapshot: &StoreSnapshot<'_>,
        config: &ChartDisplayConfig,
        split: bool,
    ) -> Chart {
        let has_markers = !snapshot.markers.is_empty();
        let mut chart = chart;
        for (index, line) in config.lines.iter().enumerate() {
            let data = series_data(snapshot, line);
            let y_axis_index = if split && index > 0 { 1.0 } else { 0.0 };
            chart = if config.scatterplot {
                chart.series(
                    Scatter::new()
                        .name(line.name.as_str())
                        .symbol_size(SYMBOL_SIZE)
                        .y_axis_index(y_axis_index)
                        .data(data),
                )
            } else {
                let mut series = Line::new()
                    .name(line.name.as_str())
                    .symbol_size(SYMBOL_SIZE)
                    .y_axis_index(y_axis_index)
                    .data(data);
                if index == 0 && has_markers {
                    series = series.mark_line(mark_line(snapshot.markers));
                }
                chart.series(series)
            };
        }

        if config.scatterplot && has_markers {
            chart = chart.series(
                Line::new()
                    .name(RUN_MARKERS_SERIES)
                    .data(Vec::<f64>::new())
                    .mark_line(mark_line(snapshot.markers)),
            );
        }
        chart
    }

    pub fn format_tooltip(&self, entries: &[TooltipEntry]) -> String {
        format_tooltip(entries, self.value_format.as_ref())
    }

    /// Updates the slider visibility from a renderer zoom event, returning the partial
    /// option to merge when the event carried a zoom batch.
    pub fn on_zoom(&mut self, event: &ZoomEvent) -> Option<Chart> {
        self.slider.apply(event)?;
        Some(self.slider.slider_option())
    }

    pub fn slider(&self) -> SliderState {
        self.slider
    }
}

/// The `(timestamp, value)` pairs of the line's series, verbatim; unknown keys chart nothing.
pub fn series_data(snapshot: &StoreSnapshot<'_>, line: &LineDefinition) -> Vec<Vec<CompositeValue>> {
    snapshot
        .series(line.key.as_str())
        .map(|series| series.as_charming_points())
        .unwrap_or_default()
}
