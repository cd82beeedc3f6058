// ── API-to-domain type conversions ──
//
// Bridges raw `nmsops_api` wire types and the canonical domain model in
// both directions. Addresses arriving as text go through the address
// codec; addresses leaving always go out packed.

use nmsops_api::types::{
    CredentialProfileResponse, DeviceIps, DeviceResponse, DiscoveryProfileRequest,
    DiscoveryProfileResponse, ProvisionUpdateRequest, TelemetryQueryRequest, WireAddress,
};

use crate::discovery::{DiscoveryProfile, DiscoverySubmission};
use crate::error::CoreError;
use crate::model::{CredentialProfileRef, Device, DeviceAddress};
use crate::target::{ResolvedTargetSet, ResolvedTargets};
use crate::telemetry::TelemetryQuery;

// ── Addresses ──────────────────────────────────────────────────────

pub fn address_from_wire(wire: &WireAddress) -> Result<DeviceAddress, CoreError> {
    match wire {
        WireAddress::Packed(packed) => Ok(DeviceAddress::new(*packed)),
        WireAddress::Text(text) => DeviceAddress::parse(text.trim()),
    }
}

// ── Device ─────────────────────────────────────────────────────────

impl TryFrom<DeviceResponse> for Device {
    type Error = CoreError;

    fn try_from(d: DeviceResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            address: address_from_wire(&d.ip)?,
            credential_id: d.credential_id,
            provisioned: d.is_provisioned,
        })
    }
}

/// Bulk provisioning body. The single-device form is a one-element list.
pub fn provision_request(addresses: &[DeviceAddress]) -> ProvisionUpdateRequest {
    ProvisionUpdateRequest {
        provision_update_ips: addresses.iter().map(|a| a.as_u32()).collect(),
    }
}

// ── Credential profile ─────────────────────────────────────────────

impl From<CredentialProfileResponse> for CredentialProfileRef {
    fn from(p: CredentialProfileResponse) -> Self {
        Self {
            id: p.id,
            hostname: p.hostname,
            port: p.port,
        }
    }
}

// ── Discovery profile ──────────────────────────────────────────────

impl TryFrom<DiscoveryProfileResponse> for DiscoveryProfile {
    type Error = CoreError;

    fn try_from(p: DiscoveryProfileResponse) -> Result<Self, Self::Error> {
        let mut invalid = Vec::new();
        let mut set = Vec::with_capacity(p.device_ips.len());
        for wire in &p.device_ips {
            match address_from_wire(wire) {
                Ok(addr) => set.push(addr),
                Err(_) => invalid.push(match wire {
                    WireAddress::Packed(n) => n.to_string(),
                    WireAddress::Text(t) => t.clone(),
                }),
            }
        }
        if !invalid.is_empty() {
            return Err(CoreError::InvalidAddressFormat { tokens: invalid });
        }

        Ok(Self {
            id: p.id,
            targets: ResolvedTargets::Addresses(set.into_iter().collect::<ResolvedTargetSet>()),
            credential_profile_ids: p.credential_profile_ids,
            is_cidr: p.is_cidr,
        })
    }
}

impl From<&DiscoverySubmission> for DiscoveryProfileRequest {
    fn from(s: &DiscoverySubmission) -> Self {
        let (device_ips, is_cidr) = match &s.targets {
            ResolvedTargets::Addresses(set) => (
                DeviceIps::Addresses(set.iter().map(DeviceAddress::as_u32).collect()),
                false,
            ),
            ResolvedTargets::Block(block) => (DeviceIps::Cidr(block.to_string()), true),
        };
        Self {
            device_ips,
            credential_profile_ids: s.credential_profile_ids.clone(),
            is_cidr,
        }
    }
}

// ── Telemetry ──────────────────────────────────────────────────────

impl From<&TelemetryQuery> for TelemetryQueryRequest {
    fn from(q: &TelemetryQuery) -> Self {
        let aggregation = q.aggregation.to_string();
        Self {
            from: q.window.from(),
            to: q.window.to(),
            object_ids: q.object_ids.iter().map(|a| a.as_u32()).collect(),
            vertical_aggregation: aggregation.clone(),
            horizontal_aggregation: aggregation,
            interval: q.interval,
            counter_id: q.counter_id.0,
        }
    }
}
