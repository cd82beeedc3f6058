// ── Telemetry query builder ──
//
// One query per counter, all sharing window, objects, aggregation and
// interval. The clock is injected, so building is pure.

use super::{AggregationMode, CounterId, DurationPreset, TimeWindow, interval_for};
use crate::error::CoreError;
use crate::model::DeviceAddress;

/// A fully-shaped counter query, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryQuery {
    pub window: TimeWindow,
    pub object_ids: Vec<DeviceAddress>,
    pub aggregation: AggregationMode,
    pub interval: u32,
    pub counter_id: CounterId,
}

#[derive(Debug, Clone)]
pub struct TelemetryQueryBuilder {
    devices: Vec<DeviceAddress>,
    duration_secs: i64,
    aggregation: AggregationMode,
    counters: Vec<CounterId>,
}

impl Default for TelemetryQueryBuilder {
    fn default() -> Self {
        Self {
            devices: Vec::new(),
            duration_secs: DurationPreset::default().secs(),
            aggregation: AggregationMode::default(),
            counters: vec![CounterId::DISK_USAGE, CounterId::CPU_USAGE],
        }
    }
}

impl TelemetryQueryBuilder {
    /// Start a query for one device over the default window, with the
    /// default aggregation and the disk/CPU counter pair.
    pub fn new(device: DeviceAddress) -> Self {
        Self {
            devices: vec![device],
            ..Self::default()
        }
    }

    /// Add another object to the query.
    pub fn device(mut self, device: DeviceAddress) -> Self {
        if !self.devices.contains(&device) {
            self.devices.push(device);
        }
        self
    }

    pub fn duration(mut self, preset: DurationPreset) -> Self {
        self.duration_secs = preset.secs();
        self
    }

    /// Arbitrary window length. Non-preset lengths use interval 1.
    pub fn duration_secs(mut self, secs: i64) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn aggregation(mut self, mode: AggregationMode) -> Self {
        self.aggregation = mode;
        self
    }

    /// Replace the counter list.
    pub fn counters(mut self, counters: impl IntoIterator<Item = CounterId>) -> Self {
        self.counters = counters.into_iter().collect();
        self
    }

    /// Build one query per counter for the window ending at `now`
    /// (unix seconds).
    pub fn build(&self, now: i64) -> Result<Vec<TelemetryQuery>, CoreError> {
        if self.devices.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "telemetry query needs at least one device".into(),
            });
        }
        if self.counters.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "telemetry query needs at least one counter".into(),
            });
        }

        let window = TimeWindow::ending_at(now, self.duration_secs)?;
        let interval = interval_for(self.duration_secs);

        Ok(self
            .counters
            .iter()
            .map(|&counter_id| TelemetryQuery {
                window,
                object_ids: self.devices.clone(),
                aggregation: self.aggregation,
                interval,
                counter_id,
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn addr(s: &str) -> DeviceAddress {
        DeviceAddress::parse(s).unwrap()
    }

    #[test]
    fn builds_one_query_per_counter() {
        let queries = TelemetryQueryBuilder::new(addr("10.0.0.5"))
            .duration(DurationPreset::Last7Days)
            .aggregation(AggregationMode::Max)
            .build(1_700_000_000)
            .unwrap();

        assert_eq!(queries.len(), 2);
        for (query, counter) in queries.iter().zip([CounterId::DISK_USAGE, CounterId::CPU_USAGE]) {
            assert_eq!(query.counter_id, counter);
            assert_eq!(query.window.to(), 1_700_000_000);
            assert_eq!(query.window.from(), 1_700_000_000 - 604_800);
            assert_eq!(query.interval, 30);
            assert_eq!(query.aggregation, AggregationMode::Max);
            assert_eq!(query.object_ids, vec![addr("10.0.0.5")]);
        }
    }

    #[test]
    fn fixed_clock_is_deterministic() {
        let builder = TelemetryQueryBuilder::new(addr("10.0.0.5"));
        assert_eq!(builder.build(5_000).unwrap(), builder.build(5_000).unwrap());
    }

    #[test]
    fn unknown_duration_uses_finest_interval() {
        let queries = TelemetryQueryBuilder::new(addr("10.0.0.5"))
            .duration_secs(999)
            .counters([CounterId(7)])
            .build(10_000)
            .unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].interval, 1);
        assert_eq!(queries[0].window.from(), 9_001);
    }

    #[test]
    fn multiple_devices_share_query() {
        let queries = TelemetryQueryBuilder::new(addr("10.0.0.1"))
            .device(addr("10.0.0.2"))
            .device(addr("10.0.0.1"))
            .counters([CounterId::CPU_USAGE])
            .build(10_000)
            .unwrap();
        assert_eq!(queries[0].object_ids, vec![addr("10.0.0.1"), addr("10.0.0.2")]);
    }

    #[test]
    fn rejects_empty_window() {
        let err = TelemetryQueryBuilder::new(addr("10.0.0.5"))
            .duration_secs(0)
            .build(10_000)
            .unwrap_err();
        assert_eq!(err, CoreError::InvalidTimeWindow { from: 10_000, to: 10_000 });
    }

    #[test]
    fn rejects_missing_counters() {
        let err = TelemetryQueryBuilder::new(addr("10.0.0.5"))
            .counters(Vec::<CounterId>::new())
            .build(10_000)
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }
}
