// ── IPv4 address codec ──
//
// Device addresses travel between the operator (dotted-quad text) and the
// backend (packed `u32`). `DeviceAddress` is the one place that converts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::CoreError;

/// A device's IPv4 address, stored packed with the first octet in the
/// most significant byte.
///
/// The text form is four decimal octets joined by `.`. Parsing accepts
/// leading zeros (`"010.0.0.1"` is `10.0.0.1`); formatting never emits
/// them, so `parse(format(a)) == a` for every address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceAddress(u32);

impl DeviceAddress {
    pub const fn new(packed: u32) -> Self {
        Self(packed)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    pub const fn octets(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parse dotted-quad text.
    ///
    /// Exactly four groups separated by `.`, each a non-empty run of ASCII
    /// digits whose value is at most 255. Surrounding whitespace is not
    /// trimmed. On failure the error carries the offending text verbatim.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidAddressFormat {
            tokens: vec![text.to_owned()],
        };

        let mut octets = [0u8; 4];
        let mut groups = text.split('.');
        for slot in &mut octets {
            let group = groups.next().ok_or_else(invalid)?;
            *slot = parse_octet(group).ok_or_else(invalid)?;
        }
        if groups.next().is_some() {
            return Err(invalid());
        }

        Ok(Self(u32::from_be_bytes(octets)))
    }
}

fn parse_octet(group: &str) -> Option<u8> {
    if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Digits only, so the sole failure left is a value above 255.
    group.parse::<u8>().ok()
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl FromStr for DeviceAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u32> for DeviceAddress {
    fn from(packed: u32) -> Self {
        Self(packed)
    }
}

impl From<DeviceAddress> for u32 {
    fn from(addr: DeviceAddress) -> Self {
        addr.0
    }
}

impl From<Ipv4Addr> for DeviceAddress {
    fn from(ip: Ipv4Addr) -> Self {
        Self(u32::from(ip))
    }
}

impl From<DeviceAddress> for Ipv4Addr {
    fn from(addr: DeviceAddress) -> Self {
        Ipv4Addr::from(addr.0)
    }
}
