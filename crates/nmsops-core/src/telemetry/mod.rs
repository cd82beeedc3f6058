// ── Telemetry ──
//
// Per-device counter time series. `query` shapes requests for the counter
// store; `normalize` turns whatever comes back into ordered samples.

pub mod normalize;
pub mod query;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

pub use normalize::{NormalizedSeries, RawTelemetryResponse, normalize};
pub use query::{TelemetryQuery, TelemetryQueryBuilder};

// ── AggregationMode ─────────────────────────────────────────────────

/// Reduction applied to the counter store's buckets. The same mode is
/// used for both the vertical (per-bucket) and horizontal (cross-object)
/// axes.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AggregationMode {
    #[default]
    Avg,
    Min,
    Max,
    Sum,
    Count,
}

// ── DurationPreset ──────────────────────────────────────────────────

/// The windows an operator can pick from.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum DurationPreset {
    #[default]
    #[strum(serialize = "1h")]
    LastHour,
    #[strum(serialize = "6h")]
    Last6Hours,
    #[strum(serialize = "24h")]
    Last24Hours,
    #[strum(serialize = "2d")]
    Last2Days,
    #[strum(serialize = "7d")]
    Last7Days,
}

impl DurationPreset {
    pub const ALL: [Self; 5] = [
        Self::LastHour,
        Self::Last6Hours,
        Self::Last24Hours,
        Self::Last2Days,
        Self::Last7Days,
    ];

    pub const fn secs(self) -> i64 {
        match self {
            Self::LastHour => 3_600,
            Self::Last6Hours => 21_600,
            Self::Last24Hours => 86_400,
            Self::Last2Days => 172_800,
            Self::Last7Days => 604_800,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LastHour => "Last Hour",
            Self::Last6Hours => "Last 6 Hours",
            Self::Last24Hours => "Last 24 Hours",
            Self::Last2Days => "Last 2 Days",
            Self::Last7Days => "Last 7 Days",
        }
    }

    pub fn interval(self) -> u32 {
        interval_for(self.secs())
    }

    pub fn from_secs(secs: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.secs() == secs)
    }
}

impl fmt::Display for DurationPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bucket width (in counter-store ticks) for a window of `duration_secs`.
///
/// Only the preset windows have a tuned interval; anything else falls
/// back to the finest resolution.
pub fn interval_for(duration_secs: i64) -> u32 {
    match duration_secs {
        21_600 => 5,
        86_400 => 10,
        172_800 | 604_800 => 30,
        _ => 1,
    }
}

// ── TimeWindow ──────────────────────────────────────────────────────

/// A half-open query window in unix seconds. Always `from < to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    from: i64,
    to: i64,
}

impl TimeWindow {
    pub fn new(from: i64, to: i64) -> Result<Self, CoreError> {
        if from < to {
            Ok(Self { from, to })
        } else {
            Err(CoreError::InvalidTimeWindow { from, to })
        }
    }

    /// The `duration_secs` window ending at `now`.
    pub fn ending_at(now: i64, duration_secs: i64) -> Result<Self, CoreError> {
        Self::new(now.saturating_sub(duration_secs), now)
    }

    pub fn from(&self) -> i64 {
        self.from
    }

    pub fn to(&self) -> i64 {
        self.to
    }

    pub fn duration_secs(&self) -> i64 {
        self.to - self.from
    }
}

// ── CounterId ───────────────────────────────────────────────────────

/// Identifier of a counter in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterId(pub u16);

impl CounterId {
    pub const DISK_USAGE: Self = Self(1);
    pub const CPU_USAGE: Self = Self(2);
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── TelemetrySample ─────────────────────────────────────────────────

/// One chart point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub timestamp_millis: i64,
    pub value: f64,
}
