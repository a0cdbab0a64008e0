use charming::datatype::CompositeValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ECharts treats `"-"` as an empty value and breaks the line at that point.
const GAP_VALUE: &str = "-";

/// A timestamped value; a sample without a value is a deliberate gap between runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    pub time: DateTime<Utc>,
    pub value: Option<f64>,
}

impl Sample {
    pub fn new(time: DateTime<Utc>, value: f64) -> Self {
        Self {
            time,
            value: Some(value),
        }
    }

    pub fn gap(time: DateTime<Utc>) -> Self {
        Self { time, value: None }
    }

    pub fn is_gap(&self) -> bool {
        self.value.is_none()
    }

    pub fn as_charming_point(&self) -> Vec<CompositeValue> {
        let value = match self.value {
            Some(value) => CompositeValue::from(value),
            None => CompositeValue::from(GAP_VALUE),
        };
        vec![CompositeValue::from(self.time.to_rfc3339()), value]
    }
}

/// Append-only sequence of samples for one metric key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    pub(crate) fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn gaps(&self) -> usize {
        self.samples.iter().filter(|s| s.is_gap()).count()
    }

    /// Most recent non-gap value.
    pub fn last_value(&self) -> Option<f64> {
        self.samples.iter().rev().find_map(|s| s.value)
    }

    pub fn as_charming_points(&self) -> Vec<Vec<CompositeValue>> {
        self.samples.iter().map(Sample::as_charming_point).collect()
    }
}
