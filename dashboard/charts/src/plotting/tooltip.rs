use crate::types::display_config::ValueFormat;
use charming::element::JsFunction;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

pub const NO_DATA: &str = "No data";
const MISSING_VALUE: &str = "-";
const AXIS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One hovered series entry, as delivered by the renderer for an axis-triggered tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipEntry {
    pub axis_value: DateTime<Utc>,
    pub color: String,
    pub series_name: String,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Renders the tooltip body: the hovered time once, then one colored line per series.
pub fn format_tooltip(entries: &[TooltipEntry], value_format: Option<&ValueFormat>) -> String {
    if !entries.iter().any(|entry| entry.value.is_some()) {
        return NO_DATA.to_owned();
    }

    let time = entries[0]
        .axis_value
        .with_timezone(&Local)
        .format(AXIS_TIME_FORMAT)
        .to_string();
    let lines = entries
        .iter()
        .map(|entry| {
            let value = match (entry.value, value_format) {
                (Some(value), Some(format)) => format.format(value),
                (Some(value), None) => value.to_string(),
                (None, _) => MISSING_VALUE.to_owned(),
            };
            format!(
                "<span style=\"color:{};\">{}:&nbsp;{}</span>",
                entry.color, entry.series_name, value
            )
        })
        .collect::<Vec<_>>();

    format!("{time}<br>{}", lines.join("<br>"))
}

/// The same tooltip as [`format_tooltip`], as a formatter function embedded in the chart
/// option for renderers that evaluate it themselves.
pub fn tooltip_formatter(value_format: Option<&ValueFormat>) -> JsFunction {
    let format_value = match value_format {
        Some(ValueFormat::Fixed { decimals }) => format!("value.toFixed({decimals})"),
        Some(ValueFormat::Milliseconds) => "value + ' ms'".to_owned(),
        Some(ValueFormat::Percent) => "value + '%'".to_owned(),
        None => "value".to_owned(),
    };
    let body = format!(
        "var entries = Array.isArray(params) ? params : []; \
         var valueOf = function (entry) {{ \
           var value = Array.isArray(entry.value) ? entry.value[1] : entry.value; \
           return value === '{missing}' || value == null ? undefined : value; \
         }}; \
         if (!entries.some(function (entry) {{ return valueOf(entry) !== undefined; }})) {{ \
           return '{no_data}'; \
         }} \
         var pad = function (n) {{ return String(n).padStart(2, '0'); }}; \
         var time = new Date(entries[0].axisValue); \
         var header = time.getFullYear() + '-' + pad(time.getMonth() + 1) + '-' + \
           pad(time.getDate()) + ' ' + pad(time.getHours()) + ':' + pad(time.getMinutes()) + \
           ':' + pad(time.getSeconds()); \
         return header + '<br>' + entries.map(function (entry) {{ \
           var value = valueOf(entry); \
           var text = value === undefined ? '{missing}' : {format_value}; \
           return '<span style=\"color:' + entry.color + ';\">' + entry.seriesName + \
             ':&nbsp;' + text + '</span>'; \
         }}).join('<br>');",
        missing = MISSING_VALUE,
        no_data = NO_DATA,
    );
    JsFunction::new_with_args("params", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(name: &str, value: Option<f64>) -> TooltipEntry {
        TooltipEntry {
            axis_value: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            color: "#00ca5a".to_owned(),
            series_name: name.to_owned(),
            value,
        }
    }

    #[test]
    fn no_entries_should_render_no_data() {
        assert_eq!(format_tooltip(&[], None), NO_DATA);
    }

    #[test]
    fn entries_without_values_should_render_no_data() {
        let entries = [entry("RPS", None), entry("Failures/s", None)];
        assert_eq!(format_tooltip(&entries, None), NO_DATA);
    }

    #[test]
    fn tooltip_should_prefix_time_once_and_list_each_series() {
        let entries = [entry("RPS", Some(5.12)), entry("Failures/s", Some(0.0))];
        let tooltip = format_tooltip(&entries, None);

        let expected_time = entries[0]
            .axis_value
            .with_timezone(&Local)
            .format(AXIS_TIME_FORMAT)
            .to_string();
        assert!(tooltip.starts_with(&expected_time));
        assert_eq!(tooltip.matches(&expected_time).count(), 1);
        assert!(tooltip.contains("<span style=\"color:#00ca5a;\">RPS:&nbsp;5.12</span>"));
        assert!(tooltip.contains("Failures/s:&nbsp;0</span>"));
    }

    #[test]
    fn tooltip_should_use_panel_value_format() {
        let entries = [entry("Average Response Time", Some(120.5))];
        let tooltip = format_tooltip(&entries, Some(&ValueFormat::Milliseconds));
        assert!(tooltip.contains("Average Response Time:&nbsp;120.5 ms"));
    }

    #[test]
    fn partially_defined_entries_should_mark_missing_values() {
        let entries = [entry("RPS", Some(1.0)), entry("Failures/s", None)];
        let tooltip = format_tooltip(&entries, None);
        assert!(tooltip.contains("Failures/s:&nbsp;-</span>"));
    }

    #[test]
    fn formatter_function_should_follow_value_format() {
        let fixed = serde_json::to_string(&tooltip_formatter(Some(&ValueFormat::Fixed {
            decimals: 2,
        })))
        .unwrap();
        let percent =
            serde_json::to_string(&tooltip_formatter(Some(&ValueFormat::Percent))).unwrap();
        let plain = serde_json::to_string(&tooltip_formatter(None)).unwrap();

        assert!(fixed.contains("value.toFixed(2)"));
        assert!(percent.contains("value + '%'"));
        assert!(plain.contains(": value;"));
        assert!(plain.contains(NO_DATA));
    }
}
