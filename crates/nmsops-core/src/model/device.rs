// ── Device domain types ──

use serde::{Deserialize, Serialize};

use super::address::DeviceAddress;

/// A device known to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub address: DeviceAddress,
    pub credential_id: Option<i64>,
    pub provisioned: bool,
}

/// Order devices by address, lowest first.
///
/// Numeric order on the packed form equals octet-by-octet order on the
/// dotted form. The sort is stable, so duplicates keep backend order.
pub fn sort_by_address(devices: &mut [Device]) {
    devices.sort_by_key(|d| d.address);
}
