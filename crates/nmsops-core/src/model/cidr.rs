// ── CIDR blocks ──
//
// A discovery target given as `a.b.c.d/n`. The block is held as
// `(network, prefix)` and only materialized on demand through a bounded
// `expand()`, so a `/8` never allocates sixteen million addresses.

use ipnet::{Ipv4AddrRange, Ipv4Net};
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use super::address::DeviceAddress;
use crate::error::CoreError;

/// An IPv4 CIDR block.
///
/// The address is kept as entered (host bits included) because that is
/// what the backend receives; membership and expansion always work on
/// the truncated network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidrBlock {
    address: DeviceAddress,
    net: Ipv4Net,
}

impl CidrBlock {
    /// Parse `<dotted-quad>/<prefix>`.
    ///
    /// The address part follows the [`DeviceAddress`] codec; the prefix is
    /// a non-empty run of ASCII digits with value in `0..=32`.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidCidrFormat {
            input: text.to_owned(),
        };

        let (addr, prefix) = text.split_once('/').ok_or_else(invalid)?;
        let address = DeviceAddress::parse(addr).map_err(|_| invalid())?;

        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
        let net = Ipv4Net::new(Ipv4Addr::from(address), prefix).map_err(|_| invalid())?;

        Ok(Self { address, net })
    }

    /// The address as entered, host bits included.
    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    /// The first address of the block.
    pub fn network(&self) -> DeviceAddress {
        DeviceAddress::from(self.net.network())
    }

    /// The last address of the block.
    pub fn broadcast(&self) -> DeviceAddress {
        DeviceAddress::from(self.net.broadcast())
    }

    pub fn prefix(&self) -> u8 {
        self.net.prefix_len()
    }

    /// Number of addresses covered: `2^(32 - prefix)`.
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix()))
    }

    pub fn contains(&self, addr: DeviceAddress) -> bool {
        self.net.trunc().contains(&Ipv4Addr::from(addr))
    }

    /// Materialize every address in the block, network through broadcast.
    ///
    /// Fails with [`CoreError::TargetSetTooLarge`] when the block holds more
    /// than `ceiling` addresses.
    pub fn expand(&self, ceiling: u64) -> Result<Vec<DeviceAddress>, CoreError> {
        let size = self.size();
        if size > ceiling {
            return Err(CoreError::TargetSetTooLarge { size, ceiling });
        }
        Ok(Ipv4AddrRange::new(self.net.network(), self.net.broadcast())
            .map(DeviceAddress::from)
            .collect())
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix())
    }
}

impl FromStr for CidrBlock {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CidrBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
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
    fn accepts_slash_24() {
        let block = CidrBlock::parse("192.168.1.0/24").unwrap();
        assert_eq!(block.network(), addr("192.168.1.0"));
        assert_eq!(block.broadcast(), addr("192.168.1.255"));
        assert_eq!(block.prefix(), 24);
        assert_eq!(block.size(), 256);
        assert_eq!(block.to_string(), "192.168.1.0/24");
    }

    #[test]
    fn accepts_prefix_bounds() {
        assert_eq!(CidrBlock::parse("0.0.0.0/0").unwrap().size(), 1 << 32);
        assert_eq!(CidrBlock::parse("10.0.0.7/32").unwrap().size(), 1);
    }

    #[test]
    fn rejects_bad_shapes() {
        for bad in [
            "192.168.1.0/33",
            "192.168.1.0/",
            "192.168.1.0",
            "192.168.1/24",
            "192.168.1.0/+8",
            "192.168.1.0/2 4",
            "192.168.1.0/24/8",
            "300.1.1.1/8",
            "/24",
        ] {
            assert_eq!(
                CidrBlock::parse(bad).unwrap_err(),
                CoreError::InvalidCidrFormat { input: bad.into() },
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn host_bits_are_kept_but_ignored_for_membership() {
        let block = CidrBlock::parse("10.1.2.3/16").unwrap();
        assert_eq!(block.address(), addr("10.1.2.3"));
        assert_eq!(block.network(), addr("10.1.0.0"));
        assert_eq!(block.to_string(), "10.1.2.3/16");
        assert!(block.contains(addr("10.1.255.255")));
        assert!(!block.contains(addr("10.2.0.0")));
    }

    #[test]
    fn contains_checks_block_bounds() {
        let block = CidrBlock::parse("192.168.1.0/24").unwrap();
        assert!(block.contains(addr("192.168.1.0")));
        assert!(block.contains(addr("192.168.1.200")));
        assert!(!block.contains(addr("192.168.2.1")));
        assert!(!block.contains(addr("192.168.0.255")));
    }

    #[test]
    fn expand_lists_whole_block() {
        let block = CidrBlock::parse("10.0.0.4/30").unwrap();
        assert_eq!(
            block.expand(4).unwrap(),
            vec![
                addr("10.0.0.4"),
                addr("10.0.0.5"),
                addr("10.0.0.6"),
                addr("10.0.0.7"),
            ]
        );
    }

    #[test]
    fn expand_respects_ceiling() {
        let block = CidrBlock::parse("10.0.0.0/8").unwrap();
        assert_eq!(
            block.expand(4096).unwrap_err(),
            CoreError::TargetSetTooLarge {
                size: 16_777_216,
                ceiling: 4096
            }
        );
    }

    #[test]
    fn serializes_as_text() {
        let block = CidrBlock::parse("192.168.1.0/24").unwrap();
        assert_eq!(
            serde_json::to_string(&block).unwrap(),
            "\"192.168.1.0/24\""
        );
    }
}
