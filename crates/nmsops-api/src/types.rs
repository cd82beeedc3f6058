// Wire types for the nmsops backend REST surface.
//
// These mirror the JSON exactly as the backend sends and accepts it.
// Domain-level validation lives in nmsops-core; nothing here checks
// address ranges or credential associations.

use serde::{Deserialize, Serialize};

// ── Addresses ───────────────────────────────────────────────────────

/// A device address as it appears on the wire.
///
/// Backend versions disagree: some send packed `u32` values, others send
/// dotted-quad strings. Both decode into this enum; nmsops-core resolves
/// the text form through its address codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireAddress {
    Packed(u32),
    Text(String),
}

// ── Devices ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceResponse {
    pub ip: WireAddress,
    #[serde(default)]
    pub credential_id: Option<i64>,
    #[serde(default)]
    pub is_provisioned: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DeviceListResponse {
    #[serde(default)]
    pub devices: Option<Vec<DeviceResponse>>,
}

/// `PUT devices/update-provisioning` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionUpdateRequest {
    pub provision_update_ips: Vec<u32>,
}

// ── Credential profiles ─────────────────────────────────────────────

/// A credential profile as listed by the backend.
///
/// The backend also echoes the password; it is deliberately not captured.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialProfileResponse {
    pub id: i64,
    pub hostname: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CredentialProfileListResponse {
    #[serde(default)]
    pub profiles: Option<Vec<CredentialProfileResponse>>,
}

/// Create/update body for credential profiles. Borrowed so the password
/// is only exposed for the lifetime of the request.
#[derive(Debug, Serialize)]
pub(crate) struct CredentialProfileRequest<'a> {
    pub hostname: &'a str,
    pub password: &'a str,
    pub port: u16,
}

// ── Discovery profiles ──────────────────────────────────────────────

/// The `device_ips` field of a discovery submission: either packed
/// addresses or a single CIDR string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceIps {
    Addresses(Vec<u32>),
    Cidr(String),
}

/// `POST`/`PUT discovery-profiles` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryProfileRequest {
    pub device_ips: DeviceIps,
    pub credential_profile_ids: Vec<i64>,
    pub is_cidr: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryProfileResponse {
    pub id: i64,
    #[serde(default)]
    pub device_ips: Vec<WireAddress>,
    #[serde(default)]
    pub credential_profile_ids: Vec<i64>,
    #[serde(default)]
    pub is_cidr: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DiscoveryProfileListResponse {
    #[serde(default)]
    pub profiles: Option<Vec<DiscoveryProfileResponse>>,
}

// ── Telemetry ───────────────────────────────────────────────────────

/// `POST query` body sent to the counter store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryQueryRequest {
    pub from: i64,
    pub to: i64,
    pub object_ids: Vec<u32>,
    pub vertical_aggregation: String,
    pub horizontal_aggregation: String,
    pub interval: u32,
    pub counter_id: u16,
}
