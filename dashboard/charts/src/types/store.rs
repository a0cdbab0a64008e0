use super::marker::Marker;
use super::metric_key::MetricKey;
use super::tick::Tick;
use super::time_series::{Sample, TimeSeries};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// In-memory, append-only store of every charted metric for one dashboard session.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesStore {
    series: BTreeMap<MetricKey, TimeSeries>,
    custom_keys: BTreeSet<MetricKey>,
    tick_times: Vec<DateTime<Utc>>,
    markers: Vec<Marker>,
}

/// Read-only view of the store handed to the chart builder.
#[derive(Debug, Clone, Copy)]
pub struct StoreSnapshot<'a> {
    pub series: &'a BTreeMap<MetricKey, TimeSeries>,
    pub custom_keys: &'a BTreeSet<MetricKey>,
    pub markers: &'a [Marker],
    pub earliest_time: Option<DateTime<Utc>>,
}

impl StoreSnapshot<'_> {
    pub fn series(&self, key: &str) -> Option<&TimeSeries> {
        self.series.get(key)
    }
}

impl TimeSeriesStore {
    /// Creates an empty store seeded with empty series for the statically known keys.
    pub fn new(percentiles: &[f64]) -> Self {
        let series = MetricKey::builtin(percentiles)
            .into_iter()
            .map(|key| (key, TimeSeries::default()))
            .collect();
        Self {
            series,
            ..Default::default()
        }
    }

    /// Appends `(time, value)` for every key present in the tick, registering unknown keys.
    pub fn append_tick(&mut self, tick: &Tick, time: DateTime<Utc>) {
        let mut has_values = false;
        for (key, value) in tick.iter() {
            if !self.series.contains_key(key.as_str()) {
                debug!("Registering new metric series: {key}");
            }
            if tick.is_custom(key.as_str()) {
                self.custom_keys.insert(key.clone());
            }
            let sample = match value {
                Some(value) => {
                    has_values = true;
                    Sample::new(time, value)
                }
                None => Sample::gap(time),
            };
            self.series.entry(key.clone()).or_default().push(sample);
        }

        if has_values {
            self.tick_times.push(time);
        }
    }

    /// Breaks every known series at once, including discovered custom metrics.
    pub fn insert_gap(&mut self, time: DateTime<Utc>) {
        let gaps = Tick::gaps(self.series.keys());
        self.append_tick(&gaps, time);
    }

    /// Records the start of a new run. The first marker is displayed at the earliest known
    /// tick time when there is one.
    pub fn add_marker(&mut self, time: DateTime<Utc>) -> &Marker {
        let display_at = if self.markers.is_empty() {
            self.earliest_time().unwrap_or(time)
        } else {
            time
        };
        self.markers.push(Marker {
            at: time,
            display_at,
        });
        &self.markers[self.markers.len() - 1]
    }

    /// Gap and marker for a run boundary, always applied together.
    pub fn start_new_run(&mut self, time: DateTime<Utc>) -> &Marker {
        self.insert_gap(time);
        self.add_marker(time)
    }

    pub fn snapshot(&self) -> StoreSnapshot<'_> {
        StoreSnapshot {
            series: &self.series,
            custom_keys: &self.custom_keys,
            markers: &self.markers,
            earliest_time: self.earliest_time(),
        }
    }

    pub fn series(&self, key: &str) -> Option<&TimeSeries> {
        self.series.get(key)
    }

    pub fn known_keys(&self) -> impl Iterator<Item = &MetricKey> {
        self.series.keys()
    }

    pub fn custom_keys(&self) -> &BTreeSet<MetricKey> {
        &self.custom_keys
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn earliest_time(&self) -> Option<DateTime<Utc>> {
        self.tick_times.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::marker::marker_label;
    use crate::types::metric_key::{CURRENT_RPS, USER_COUNT};
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn tick(values: &[(&str, f64)]) -> Tick {
        let mut tick = Tick::new();
        for (key, value) in values {
            tick.insert(*key, *value);
        }
        tick
    }

    #[test]
    fn new_store_should_seed_builtin_keys_with_empty_series() {
        let store = TimeSeriesStore::new(&[0.5, 0.95]);
        assert_eq!(store.known_keys().count(), 6);
        assert!(store.series("responseTimePercentile0.5").unwrap().is_empty());
        assert!(store.markers().is_empty());
        assert_eq!(store.earliest_time(), None);
    }

    #[test]
    fn series_length_should_match_ticks_containing_the_key() {
        let mut store = TimeSeriesStore::new(&[]);
        store.append_tick(&tick(&[(CURRENT_RPS, 1.0), (USER_COUNT, 10.0)]), at(1));
        store.append_tick(&tick(&[(CURRENT_RPS, 2.0)]), at(2));
        store.append_tick(&tick(&[(USER_COUNT, 12.0)]), at(3));
        store.append_tick(&tick(&[(CURRENT_RPS, 3.0)]), at(4));

        assert_eq!(store.series(CURRENT_RPS).unwrap().len(), 3);
        assert_eq!(store.series(USER_COUNT).unwrap().len(), 2);
        assert_eq!(store.series("currentFailPerSec").unwrap().len(), 0);
    }

    #[test]
    fn unknown_keys_should_be_registered_on_first_append() {
        let mut store = TimeSeriesStore::new(&[]);
        let mut custom = Tick::new();
        custom.insert_custom("cartSize", 4.0);
        store.append_tick(&custom, at(1));

        assert!(store.custom_keys().contains("cartSize"));
        assert_eq!(store.series("cartSize").unwrap().samples()[0].value, Some(4.0));
    }

    #[test]
    fn custom_key_should_persist_when_later_ticks_omit_it() {
        let mut store = TimeSeriesStore::new(&[]);
        let mut custom = Tick::new();
        custom.insert_custom("cartSize", 4.0);
        store.append_tick(&custom, at(1));
        store.append_tick(&tick(&[(CURRENT_RPS, 1.0)]), at(2));

        assert!(store.custom_keys().contains("cartSize"));
        assert_eq!(store.series("cartSize").unwrap().len(), 1);
    }

    #[test]
    fn gap_and_marker_should_extend_every_known_series_once() {
        let mut store = TimeSeriesStore::new(&[0.95]);
        let mut first = tick(&[(CURRENT_RPS, 1.0)]);
        first.insert_custom("cartSize", 2.0);
        store.append_tick(&first, at(1));
        store.add_marker(at(2));
        let known = store.known_keys().count();
        let before = store
            .known_keys()
            .map(|key| store.series(key.as_str()).unwrap().len())
            .collect::<Vec<_>>();
        let markers_before = store.markers().len();

        store.start_new_run(at(3));

        assert_eq!(store.known_keys().count(), known);
        for (key, len) in store.known_keys().zip(before) {
            let series = store.series(key.as_str()).unwrap();
            assert_eq!(series.len(), len + 1);
            assert!(series.samples().last().unwrap().is_gap());
        }
        assert_eq!(store.markers().len(), markers_before + 1);
        assert_eq!(marker_label(markers_before), "Run #2");
    }

    #[test]
    fn gaps_should_not_move_the_earliest_time() {
        let mut store = TimeSeriesStore::new(&[]);
        store.insert_gap(at(1));
        assert_eq!(store.earliest_time(), None);
        store.append_tick(&tick(&[(CURRENT_RPS, 1.0)]), at(2));
        assert_eq!(store.earliest_time(), Some(at(2)));
    }

    #[test]
    fn first_marker_displays_at_earliest_known_time() {
        let mut store = TimeSeriesStore::new(&[]);
        store.append_tick(&tick(&[(CURRENT_RPS, 1.0)]), at(1));

        let first = *store.add_marker(at(5));
        assert_eq!(first.at, at(5));
        assert_eq!(first.display_at, at(1));

        let second = *store.add_marker(at(9));
        assert_eq!(second.at, at(9));
        assert_eq!(second.display_at, at(9));
    }

    #[test]
    fn first_marker_on_empty_store_displays_at_its_own_time() {
        let mut store = TimeSeriesStore::new(&[]);
        let marker = *store.add_marker(at(5));
        assert_eq!(marker.display_at, at(5));
    }

    #[test]
    fn run_restart_scenario_should_break_the_series() {
        let mut store = TimeSeriesStore::new(&[]);
        store.append_tick(&tick(&[(CURRENT_RPS, 5.12)]), at(1));
        store.start_new_run(at(2));
        store.append_tick(&tick(&[(CURRENT_RPS, 7.0)]), at(3));

        let samples = store.series(CURRENT_RPS).unwrap().samples();
        assert_eq!(
            samples,
            &[
                Sample::new(at(1), 5.12),
                Sample::gap(at(2)),
                Sample::new(at(3), 7.0)
            ]
        );
        assert_eq!(store.markers().len(), 1);
        assert_eq!(store.markers()[0].at, at(2));
        assert_eq!(marker_label(0), "Run #1");
    }
}
