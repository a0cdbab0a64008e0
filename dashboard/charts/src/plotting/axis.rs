use crate::types::display_config::YAxisLabels;
use charming::component::Axis;
use charming::element::{AxisLabel, AxisType};
use chrono::{DateTime, Utc};

const TOP_BOUNDARY_GAP: &str = "5%";
const TIME_AXIS_LABEL_FORMAT: &str = "{HH}:{mm}:{ss}";

/// Value axis of a panel before it is turned into a chart axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueAxis {
    pub name: Option<String>,
}

impl From<&ValueAxis> for Axis {
    fn from(value_axis: &ValueAxis) -> Self {
        let axis = Axis::new()
            .type_(AxisType::Value)
            .boundary_gap(("0", TOP_BOUNDARY_GAP));
        match &value_axis.name {
            Some(name) => axis.name(name.as_str()),
            None => axis,
        }
    }
}

/// Two axes when the panel asks for a split axis and the labels (if any) are a pair,
/// a single axis with at most one label otherwise.
pub fn value_axes(split_axis: bool, labels: Option<&YAxisLabels>) -> Vec<ValueAxis> {
    match (split_axis, labels) {
        (true, None) => vec![ValueAxis::default(), ValueAxis::default()],
        (true, Some(YAxisLabels::Many(pair))) if pair.len() == 2 => pair
            .iter()
            .map(|name| ValueAxis {
                name: Some(name.clone()),
            })
            .collect(),
        (_, labels) => vec![ValueAxis {
            name: labels.and_then(|labels| match labels {
                YAxisLabels::Single(name) => Some(name.clone()),
                YAxisLabels::Many(names) => names.first().cloned(),
            }),
        }],
    }
}

/// Time axis starting at the earliest known sample, or at `now` for an empty store.
pub fn time_axis(earliest_time: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Axis {
    let start = earliest_time.unwrap_or(now);
    Axis::new()
        .type_(AxisType::Time)
        .min(start.to_rfc3339())
        .axis_label(AxisLabel::new().formatter(TIME_AXIS_LABEL_FORMAT))
}
