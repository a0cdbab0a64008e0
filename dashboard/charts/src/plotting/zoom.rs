use charming::component::{DataZoom, DataZoomType};
use charming::Chart;
use serde::{Deserialize, Serialize};

/// One zoom descriptor, percentages of the full range plus the start value of the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomBatch {
    #[serde(default)]
    pub start: f64,
    #[serde(default = "full_range_end")]
    pub end: f64,
    #[serde(default)]
    pub start_value: f64,
}

fn full_range_end() -> f64 {
    100.0
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoomEvent {
    #[serde(default)]
    pub batch: Vec<ZoomBatch>,
}

pub fn is_zoomed(start: f64, end: f64, start_value: f64) -> bool {
    (start > 0.0 && end <= 100.0) || start_value > 0.0
}

/// Visibility of the range slider, driven only by the latest zoom event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliderState {
    #[default]
    Hidden,
    Shown,
}

impl SliderState {
    pub fn is_shown(&self) -> bool {
        *self == SliderState::Shown
    }

    /// Applies a zoom event, consulting only its first batch. Events without a batch leave
    /// the state untouched and return `None`.
    pub fn apply(&mut self, event: &ZoomEvent) -> Option<SliderState> {
        let batch = event.batch.first()?;
        *self = if is_zoomed(batch.start, batch.end, batch.start_value) {
            SliderState::Shown
        } else {
            SliderState::Hidden
        };
        Some(*self)
    }

    pub fn data_zoom(&self) -> DataZoom {
        DataZoom::new()
            .type_(DataZoomType::Slider)
            .show(self.is_shown())
    }

    /// Partial option the renderer merges into the chart to show or hide the slider.
    pub fn slider_option(&self) -> Chart {
        Chart::new().data_zoom(self.data_zoom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: f64, end: f64, start_value: f64) -> ZoomEvent {
        ZoomEvent {
            batch: vec![ZoomBatch {
                start,
                end,
                start_value,
            }],
        }
    }

    #[test]
    fn full_range_should_not_be_zoomed() {
        assert!(!is_zoomed(0.0, 100.0, 0.0));
    }

    #[test]
    fn moved_start_should_be_zoomed() {
        assert!(is_zoomed(10.0, 100.0, 0.0));
    }

    #[test]
    fn positive_start_value_should_be_zoomed() {
        assert!(is_zoomed(0.0, 100.0, 5.0));
    }

    #[test]
    fn slider_should_follow_latest_event_only() {
        let mut slider = SliderState::default();
        assert_eq!(slider.apply(&event(10.0, 90.0, 0.0)), Some(SliderState::Shown));
        assert_eq!(slider.apply(&event(0.0, 100.0, 0.0)), Some(SliderState::Hidden));
        assert_eq!(slider.apply(&event(0.0, 100.0, 5.0)), Some(SliderState::Shown));
    }

    #[test]
    fn only_first_batch_should_be_consulted() {
        let mut slider = SliderState::default();
        let mut zoom = event(0.0, 100.0, 0.0);
        zoom.batch.push(ZoomBatch {
            start: 50.0,
            end: 60.0,
            start_value: 3.0,
        });
        assert_eq!(slider.apply(&zoom), Some(SliderState::Hidden));
    }

    #[test]
    fn event_without_batch_should_leave_slider_untouched() {
        let mut slider = SliderState::Shown;
        assert_eq!(slider.apply(&ZoomEvent::default()), None);
        assert!(slider.is_shown());
    }

    #[test]
    fn zoom_event_should_deserialize_renderer_payload() {
        let zoom: ZoomEvent =
            serde_json::from_str(r#"{"batch":[{"start":12.5,"end":80,"startValue":0}]}"#)
                .unwrap();
        assert_eq!(zoom.batch[0].start, 12.5);
        assert_eq!(zoom.batch[0].end, 80.0);
    }

    #[test]
    fn slider_option_should_reflect_visibility() {
        let option = serde_json::to_string(&SliderState::Shown.slider_option()).unwrap();
        assert!(option.contains("\"show\":true"));
        assert!(option.contains("\"slider\""));
    }
}
