// ── Telemetry response normalization ──
//
// The counter store answers in one of two shapes depending on backend
// version:
//
//   A: { "data": { "<device key>": [ { timestamp, value }, ... ] } }
//   B: [ { timestamp, value }, ... ]
//
// The shape is resolved once into `RawTelemetryResponse`; everything after
// that works on the typed form. Timestamps arrive in seconds (as numbers or
// numeric strings) and leave in milliseconds, sorted ascending.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::TelemetrySample;
use crate::error::CoreError;
use crate::model::DeviceAddress;

// ── Wire shapes ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Seconds(i64),
    Text(String),
}

impl RawTimestamp {
    fn seconds(&self) -> Result<i64, CoreError> {
        match self {
            Self::Seconds(s) => Ok(*s),
            Self::Text(t) => t
                .trim()
                .parse()
                .map_err(|_| malformed(format!("timestamp {t:?} is not an integer"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPoint {
    timestamp: RawTimestamp,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct KeyedEnvelope {
    #[serde(default)]
    data: Option<HashMap<String, Vec<RawPoint>>>,
}

/// A counter-store response with its shape resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTelemetryResponse {
    /// Null body, or an object without a `data` collection.
    Empty,
    /// Shape A: points grouped by device key.
    Keyed(HashMap<String, Vec<RawPoint>>),
    /// Shape B: a single bare series.
    Series(Vec<RawPoint>),
}

impl RawTelemetryResponse {
    /// Resolve the response shape. Anything that is neither shape is
    /// reported as [`CoreError::MalformedTelemetryResponse`].
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        match value {
            Value::Null => Ok(Self::Empty),
            Value::Array(_) => serde_json::from_value(value)
                .map(Self::Series)
                .map_err(|e| malformed(format!("bad series: {e}"))),
            Value::Object(_) => {
                let envelope: KeyedEnvelope = serde_json::from_value(value)
                    .map_err(|e| malformed(format!("bad keyed data: {e}")))?;
                Ok(envelope.data.map_or(Self::Empty, Self::Keyed))
            }
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Err(malformed(
                "expected an object or an array".into(),
            )),
        }
    }

    /// Chart samples for `device`, sorted by timestamp.
    ///
    /// Shape A is looked up by the dotted form first, then by the packed
    /// decimal form. A missing key yields an empty series. Shape B carries
    /// no device key and is returned whole.
    pub fn samples_for(&self, device: DeviceAddress) -> Result<Vec<TelemetrySample>, CoreError> {
        let points: &[RawPoint] = match self {
            Self::Empty => &[],
            Self::Series(points) => points.as_slice(),
            Self::Keyed(map) => map
                .get(&device.to_string())
                .or_else(|| map.get(&device.as_u32().to_string()))
                .map_or(&[][..], Vec::as_slice),
        };

        let mut samples = points
            .iter()
            .map(|p| {
                let secs = p.timestamp.seconds()?;
                let timestamp_millis = secs
                    .checked_mul(1000)
                    .ok_or_else(|| malformed(format!("timestamp {secs} out of range")))?;
                Ok(TelemetrySample {
                    timestamp_millis,
                    value: p.value,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        // Stable, so equal timestamps keep arrival order.
        samples.sort_by_key(|s| s.timestamp_millis);
        Ok(samples)
    }
}

fn malformed(reason: String) -> CoreError {
    CoreError::MalformedTelemetryResponse { reason }
}

// ── Normalization ───────────────────────────────────────────────────

/// Normalizer output. A malformed payload still yields a (empty) series;
/// the problem is carried alongside as a diagnostic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSeries {
    pub samples: Vec<TelemetrySample>,
    pub diagnostic: Option<CoreError>,
}

impl NormalizedSeries {
    pub fn is_malformed(&self) -> bool {
        self.diagnostic.is_some()
    }
}

/// Normalize a raw counter-store body for `device`. Never fails.
pub fn normalize(raw: Value, device: DeviceAddress) -> NormalizedSeries {
    match RawTelemetryResponse::from_value(raw).and_then(|r| r.samples_for(device)) {
        Ok(samples) => NormalizedSeries {
            samples,
            diagnostic: None,
        },
        Err(err) => NormalizedSeries {
            samples: Vec::new(),
            diagnostic: Some(err),
        },
    }
}
